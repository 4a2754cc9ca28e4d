//! Belegungs-Controller: Zustandsautomat + PWM-Helligkeit
//!
//! Der Controller besitzt Zustand, Helligkeit und Belegungszeitpunkt und
//! bekommt die Hardware als generische Parameter. Jeder Einstiegspunkt nimmt
//! `&mut self` und läuft bis zum Ende durch, die Laufzeitumgebung muss die
//! Aufrufe also nur serialisieren.
//!
//! # Einstiegspunkte
//! - [`initialize`](RoomController::initialize): Startwerte + Banner
//! - [`on_activation_event`](RoomController::on_activation_event): Taster (Toggle)
//! - [`on_command`](RoomController::on_command): ein Byte von der seriellen Schnittstelle
//! - [`tick`](RoomController::tick): periodischer Timeout-Check
//! - [`status_report`](RoomController::status_report): Statuszeile senden

use embedded_hal::delay::DelayNs;
use embedded_hal::pwm::SetDutyCycle;

use crate::config::RoomConfig;
use crate::logic::{pwm_line, ramp_steps, status_line, timeout_elapsed, toggle};
use crate::traits::{Clock, LINE_END, SerialOutput};
use crate::types::{Command, DutyCycle, RoomState, RoomStatus};

// Jede Banner-Zeile endet mit CRLF, auch die Versionszeile
const BANNER: &str = "Controlador de Sala v2.0";
const BANNER_READY: &str = "Sistema inicializado:";
const BANNER_DOOR: &str = "Puerta cerrada";

const NOTICE_OCCUPIED: &str = "Sala ocupada";
const NOTICE_VACANT: &str = "Sala vacía";
const NOTICE_TIMEOUT: &str = "Timeout: Sala vacía";
const UNKNOWN_PREFIX: &str = "Comando desconocido: ";

/// Kommando-Menü (`?`)
pub const MENU: [&str; 8] = [
    "Comandos disponibles:",
    "H: PWM 100%",
    "L: PWM 0%",
    "O: Marcar sala como OCUPADA",
    "I: Marcar sala como VACÍA",
    "S: Enviar estado actual de la sala",
    "G: Rampa de PWM de 0% a 100%",
    "1-5: Establecer PWM a 10%,20%,30%,40%,50%",
];

/// Raum-Controller
///
/// # Generische Parameter
/// - `P`: PWM-Kanal für das dimmbare Licht (`embedded_hal::pwm::SetDutyCycle`)
/// - `S`: serielle Ausgabe ([`SerialOutput`])
/// - `C`: Millisekunden-Uhr ([`Clock`])
/// - `D`: blockierendes Delay für die Rampe (`embedded_hal::delay::DelayNs`)
pub struct RoomController<P, S, C, D> {
    pwm: P,
    serial: S,
    clock: C,
    delay: D,
    config: RoomConfig,
    state: RoomState,
    intensity: DutyCycle,
    occupied_since_ms: u64,
}

impl<P, S, C, D> RoomController<P, S, C, D>
where
    P: SetDutyCycle,
    S: SerialOutput,
    C: Clock,
    D: DelayNs,
{
    /// Erstellt einen Controller mit Default-Konfiguration
    ///
    /// Es wird noch nichts geschrieben, dafür ist `initialize()` da.
    pub fn new(pwm: P, serial: S, clock: C, delay: D) -> Self {
        Self::with_config(pwm, serial, clock, delay, RoomConfig::default())
    }

    pub fn with_config(pwm: P, serial: S, clock: C, delay: D, config: RoomConfig) -> Self {
        Self {
            pwm,
            serial,
            clock,
            delay,
            config,
            state: RoomState::Idle,
            intensity: config.initial_duty,
            occupied_since_ms: 0,
        }
    }

    /// Setzt Startwerte und sendet Banner + Statusbericht
    pub fn initialize(&mut self) {
        self.set_intensity(self.config.initial_duty);
        self.state = RoomState::Idle;

        self.serial.send_text(BANNER);
        self.serial.send_text(BANNER_READY);
        self.serial.send_text(&pwm_line(self.config.initial_duty));
        self.serial.send_text(BANNER_DOOR);
        self.status_report();
    }

    /// Taster gedrückt: wechselt zwischen leer und belegt
    pub fn on_activation_event(&mut self) {
        match toggle(self.state) {
            RoomState::Occupied => self.occupy(),
            RoomState::Idle => self.vacate(),
        }
    }

    /// Verarbeitet ein empfangenes Byte und gibt das erkannte Kommando zurück
    ///
    /// `G` blockiert für die gesamte Rampe (11 Schritte × `ramp_step_delay_ms`),
    /// in dieser Zeit werden keine anderen Ereignisse bearbeitet.
    pub fn on_command(&mut self, byte: u8) -> Command {
        let command = Command::from(byte);
        match command {
            Command::FullOn => self.set_and_report(DutyCycle::FULL),
            Command::Off => self.set_and_report(DutyCycle::OFF),
            Command::Occupy => self.occupy(),
            Command::Vacate => self.vacate(),
            Command::Status => self.status_report(),
            Command::Ramp => self.ramp(),
            Command::Menu => {
                for line in MENU {
                    self.serial.send_text(line);
                }
            }
            Command::Preset(duty) => self.set_and_report(duty),
            Command::Unknown(byte) => {
                self.serial.write_bytes(UNKNOWN_PREFIX.as_bytes());
                self.serial.send_char(byte);
                self.serial.write_bytes(LINE_END);
            }
        }
        command
    }

    /// Periodischer Timeout-Check
    ///
    /// Gibt `true` zurück wenn der Timeout gerade zugeschlagen hat.
    pub fn tick(&mut self) -> bool {
        if !self.state.is_occupied() {
            return false;
        }

        let now = self.clock.now_ms();
        if !timeout_elapsed(now, self.occupied_since_ms, self.config.timeout_ms) {
            return false;
        }

        #[cfg(feature = "defmt")]
        defmt::info!(
            "Room: occupancy timeout after {} ms",
            now.saturating_sub(self.occupied_since_ms)
        );

        self.state = RoomState::Idle;
        self.set_intensity(DutyCycle::OFF);
        self.serial.send_text(NOTICE_TIMEOUT);
        true
    }

    /// Sendet `"Estado actual de la sala: VACÍA|OCUPADA"`
    pub fn status_report(&mut self) {
        self.serial.send_text(&status_line(self.state));
    }

    pub fn state(&self) -> RoomState {
        self.state
    }

    /// Zuletzt geschriebener Duty Cycle
    pub fn intensity(&self) -> DutyCycle {
        self.intensity
    }

    pub fn config(&self) -> &RoomConfig {
        &self.config
    }

    /// Momentaufnahme für Logging / Telemetrie
    pub fn status(&self) -> RoomStatus {
        let occupied_for_ms = self
            .state
            .is_occupied()
            .then(|| self.clock.now_ms().saturating_sub(self.occupied_since_ms));
        RoomStatus {
            state: self.state,
            intensity: self.intensity,
            occupied_for_ms,
        }
    }

    pub fn pwm(&self) -> &P {
        &self.pwm
    }

    pub fn pwm_mut(&mut self) -> &mut P {
        &mut self.pwm
    }

    pub fn serial(&self) -> &S {
        &self.serial
    }

    pub fn serial_mut(&mut self) -> &mut S {
        &mut self.serial
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn delay(&self) -> &D {
        &self.delay
    }

    // ========================================================================
    // Übergänge
    // ========================================================================

    // Taster und `O` teilen sich diesen Pfad, `O` im belegten Zustand
    // startet den Timeout neu
    fn occupy(&mut self) {
        self.state = RoomState::Occupied;
        self.set_intensity(DutyCycle::FULL);
        self.occupied_since_ms = self.clock.now_ms();

        #[cfg(feature = "defmt")]
        defmt::info!("Room: occupied at {} ms", self.occupied_since_ms);

        self.serial.send_text(NOTICE_OCCUPIED);
    }

    fn vacate(&mut self) {
        self.state = RoomState::Idle;
        self.set_intensity(DutyCycle::OFF);

        #[cfg(feature = "defmt")]
        defmt::info!("Room: vacant");

        self.serial.send_text(NOTICE_VACANT);
    }

    fn ramp(&mut self) {
        for duty in ramp_steps() {
            self.set_and_report(duty);
            self.delay.delay_ms(self.config.ramp_step_delay_ms);
        }
    }

    fn set_and_report(&mut self, duty: DutyCycle) {
        self.set_intensity(duty);
        self.serial.send_text(&pwm_line(duty));
    }

    // Buchhaltung folgt immer dem kommandierten Wert, auch wenn der Treiber
    // einen Fehler meldet
    fn set_intensity(&mut self, duty: DutyCycle) {
        if self.pwm.set_duty_cycle_percent(duty.percent()).is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("PWM: failed to set duty cycle {}", duty);
        }
        self.intensity = duty;
    }
}
