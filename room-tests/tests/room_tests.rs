//! Integration Tests für den Raum-Controller
//!
//! Diese Tests laufen auf dem Host (x86_64) und nutzen Mock-Implementierungen
//! für PWM, UART, Uhr und Delay.

use std::cell::RefCell;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::pwm::{self, ErrorKind, ErrorType, SetDutyCycle};
use proptest::prelude::*;
use room_core::{
    Clock, Command, DutyCycle, LED_TIMEOUT_MS, MENU, PWM_INITIAL_DUTY, RoomConfig,
    RoomController, RoomState, SerialOutput,
};

// ============================================================================
// Trace: gemeinsames Protokoll aller Mocks (Reihenfolge prüfen)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent {
    Pwm(u8),
    Tx(Vec<u8>),
    Delay(u32),
}

pub type Trace = Rc<RefCell<Vec<TraceEvent>>>;

// ============================================================================
// Mock PWM
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockPwmError;

impl pwm::Error for MockPwmError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

#[derive(Default)]
pub struct MockPwm {
    pub writes: Vec<u8>,
    pub fail_next_write: bool,
    pub trace: Option<Trace>,
}

impl MockPwm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_duty(&self) -> Option<u8> {
        self.writes.last().copied()
    }
}

impl ErrorType for MockPwm {
    type Error = MockPwmError;
}

impl SetDutyCycle for MockPwm {
    fn max_duty_cycle(&self) -> u16 {
        100
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        if self.fail_next_write {
            self.fail_next_write = false;
            return Err(MockPwmError);
        }

        self.writes.push(duty as u8);
        if let Some(trace) = &self.trace {
            trace.borrow_mut().push(TraceEvent::Pwm(duty as u8));
        }
        Ok(())
    }
}

// ============================================================================
// Mock Serial
// ============================================================================

#[derive(Default)]
pub struct MockSerial {
    pub bytes: Vec<u8>,
    pub trace: Option<Trace>,
}

impl MockSerial {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ausgabe in Zeilen zerlegt (ohne CRLF)
    pub fn lines(&self) -> Vec<String> {
        let text = String::from_utf8_lossy(&self.bytes);
        let mut lines: Vec<String> = text.split("\r\n").map(str::to_owned).collect();
        // Letztes Element ist leer wenn die Ausgabe mit CRLF endet
        if lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }
        lines
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
    }
}

impl SerialOutput for MockSerial {
    fn write_bytes(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
        if let Some(trace) = &self.trace {
            trace.borrow_mut().push(TraceEvent::Tx(bytes.to_vec()));
        }
    }
}

// ============================================================================
// Mock Clock / Delay
// ============================================================================

#[derive(Default)]
pub struct MockClock {
    pub now: u64,
}

impl MockClock {
    pub fn set(&mut self, now: u64) {
        self.now = now;
    }

    pub fn advance(&mut self, ms: u64) {
        self.now += ms;
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u64 {
        self.now
    }
}

#[derive(Default)]
pub struct MockDelay {
    pub delays_ms: Vec<u32>,
    pub trace: Option<Trace>,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.delay_ms(ns / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delays_ms.push(ms);
        if let Some(trace) = &self.trace {
            trace.borrow_mut().push(TraceEvent::Delay(ms));
        }
    }
}

type TestController = RoomController<MockPwm, MockSerial, MockClock, MockDelay>;

fn controller() -> TestController {
    RoomController::new(
        MockPwm::new(),
        MockSerial::new(),
        MockClock::default(),
        MockDelay::default(),
    )
}

/// Controller nach `initialize()` mit leerer Ausgabe
fn initialized() -> TestController {
    let mut room = controller();
    room.initialize();
    room.serial_mut().clear();
    room
}

fn traced() -> (TestController, Trace) {
    let trace = Trace::default();
    let pwm = MockPwm {
        trace: Some(trace.clone()),
        ..MockPwm::default()
    };
    let serial = MockSerial {
        trace: Some(trace.clone()),
        ..MockSerial::default()
    };
    let delay = MockDelay {
        trace: Some(trace.clone()),
        ..MockDelay::default()
    };
    let room = RoomController::new(pwm, serial, MockClock::default(), delay);
    (room, trace)
}

// ============================================================================
// Tests: initialize()
// ============================================================================

#[test]
fn test_initialize_sets_initial_duty_and_idle() {
    let mut room = controller();
    room.initialize();

    assert_eq!(room.state(), RoomState::Idle);
    assert_eq!(room.intensity(), DutyCycle::new(PWM_INITIAL_DUTY));
    assert_eq!(room.pwm().writes, vec![PWM_INITIAL_DUTY]);
}

#[test]
fn test_initialize_banner_and_status() {
    let mut room = controller();
    room.initialize();

    assert_eq!(
        room.serial().lines(),
        vec![
            "Controlador de Sala v2.0",
            "Sistema inicializado:",
            "PWM: 20%",
            "Puerta cerrada",
            "Estado actual de la sala: VACÍA",
        ]
    );
    // Auch die Versionszeile endet mit CRLF
    assert!(room.serial().bytes.starts_with(b"Controlador de Sala v2.0\r\nSistema"));
}

#[test]
fn test_initialize_custom_duty_in_banner() {
    let config = RoomConfig::default().with_initial_duty(DutyCycle::new(35));
    let mut room = RoomController::with_config(
        MockPwm::new(),
        MockSerial::new(),
        MockClock::default(),
        MockDelay::default(),
        config,
    );
    room.initialize();

    assert_eq!(room.config().initial_duty, DutyCycle::new(35));
    assert_eq!(room.config().timeout_ms, LED_TIMEOUT_MS);
    assert_eq!(room.pwm().last_duty(), Some(35));
    assert!(room.serial().lines().contains(&"PWM: 35%".to_string()));
}

#[test]
fn test_initialize_resets_occupied_room() {
    let mut room = initialized();
    room.on_command(b'O');
    room.initialize();

    assert_eq!(room.state(), RoomState::Idle);
    assert_eq!(room.intensity(), DutyCycle::new(PWM_INITIAL_DUTY));
}

// ============================================================================
// Tests: on_activation_event()
// ============================================================================

#[test]
fn test_button_occupies_idle_room() {
    let mut room = initialized();
    room.clock_mut().set(1234);
    room.on_activation_event();

    assert_eq!(room.state(), RoomState::Occupied);
    assert_eq!(room.intensity(), DutyCycle::FULL);
    assert_eq!(room.pwm().last_duty(), Some(100));
    assert_eq!(room.serial().lines(), vec!["Sala ocupada"]);
    assert_eq!(room.status().occupied_for_ms, Some(0));
}

#[test]
fn test_button_vacates_occupied_room() {
    let mut room = initialized();
    room.on_activation_event();
    room.serial_mut().clear();
    room.on_activation_event();

    assert_eq!(room.state(), RoomState::Idle);
    assert_eq!(room.intensity(), DutyCycle::OFF);
    assert_eq!(room.pwm().last_duty(), Some(0));
    assert_eq!(room.serial().lines(), vec!["Sala vacía"]);
    assert_eq!(room.status().occupied_for_ms, None);
}

#[test]
fn test_button_and_command_emit_same_text() {
    let mut by_button = initialized();
    let mut by_command = initialized();

    by_button.on_activation_event();
    by_command.on_command(b'o');
    assert_eq!(by_button.serial().bytes, by_command.serial().bytes);

    by_button.on_activation_event();
    by_command.on_command(b'i');
    assert_eq!(by_button.serial().bytes, by_command.serial().bytes);
}

// ============================================================================
// Tests: on_command() - Helligkeit
// ============================================================================

#[test]
fn test_command_h_full_on() {
    let mut room = initialized();
    assert_eq!(room.on_command(b'H'), Command::FullOn);

    assert_eq!(room.intensity(), DutyCycle::FULL);
    assert_eq!(room.state(), RoomState::Idle);
    assert_eq!(room.serial().lines(), vec!["PWM: 100%"]);
}

#[test]
fn test_command_l_off_keeps_occupied() {
    let mut room = initialized();
    room.on_command(b'o');
    room.serial_mut().clear();
    room.on_command(b'l');

    assert_eq!(room.intensity(), DutyCycle::OFF);
    assert_eq!(room.state(), RoomState::Occupied);
    assert_eq!(room.serial().lines(), vec!["PWM: 0%"]);
}

#[test]
fn test_command_presets() {
    let mut room = initialized();
    for (byte, percent) in [(b'1', 10), (b'2', 20), (b'3', 30), (b'4', 40), (b'5', 50)] {
        room.serial_mut().clear();
        room.on_command(byte);

        assert_eq!(room.intensity().percent(), percent);
        assert_eq!(room.pwm().last_duty(), Some(percent));
        assert_eq!(room.serial().lines(), vec![format!("PWM: {}%", percent)]);
    }
    assert_eq!(room.state(), RoomState::Idle);
}

// ============================================================================
// Tests: on_command() - Zustand
// ============================================================================

#[test]
fn test_command_o_from_any_state() {
    for start_occupied in [false, true] {
        let mut room = initialized();
        if start_occupied {
            room.on_activation_event();
        }
        room.on_command(b'O');

        assert_eq!(room.state(), RoomState::Occupied);
        assert_eq!(room.intensity(), DutyCycle::FULL);
    }
}

#[test]
fn test_command_i_from_any_state() {
    for start_occupied in [false, true] {
        let mut room = initialized();
        if start_occupied {
            room.on_activation_event();
        }
        room.on_command(b'I');

        assert_eq!(room.state(), RoomState::Idle);
        assert_eq!(room.intensity(), DutyCycle::OFF);
    }
}

#[test]
fn test_command_o_restarts_timeout() {
    let mut room = initialized();
    room.on_command(b'o');
    room.clock_mut().advance(LED_TIMEOUT_MS - 100);
    room.on_command(b'o');
    room.clock_mut().advance(200);

    assert!(!room.tick());
    assert_eq!(room.state(), RoomState::Occupied);
}

#[test]
fn test_command_status() {
    let mut room = initialized();
    room.on_command(b's');
    room.on_command(b'O');
    room.on_command(b'S');

    assert_eq!(
        room.serial().lines(),
        vec![
            "Estado actual de la sala: VACÍA",
            "Sala ocupada",
            "Estado actual de la sala: OCUPADA",
        ]
    );
}

#[test]
fn test_command_menu() {
    let mut room = initialized();
    let writes_before = room.pwm().writes.len();
    assert_eq!(room.on_command(b'?'), Command::Menu);

    assert_eq!(room.serial().lines(), MENU.to_vec());
    assert_eq!(room.serial().lines()[0], "Comandos disponibles:");
    assert_eq!(room.pwm().writes.len(), writes_before);
}

#[test]
fn test_command_unknown_echo() {
    let mut room = initialized();
    let intensity = room.intensity();
    assert_eq!(room.on_command(b'x'), Command::Unknown(b'x'));

    assert_eq!(room.state(), RoomState::Idle);
    assert_eq!(room.intensity(), intensity);
    assert_eq!(room.serial().lines(), vec!["Comando desconocido: x"]);
}

#[test]
fn test_command_unknown_digit() {
    let mut room = initialized();
    room.on_command(b'9');
    assert_eq!(room.serial().lines(), vec!["Comando desconocido: 9"]);
}

// ============================================================================
// Tests: Rampe (G)
// ============================================================================

#[test]
fn test_ramp_emits_eleven_ascending_lines() {
    let mut room = initialized();
    room.on_command(b'g');

    let expected: Vec<String> = (0..=100).step_by(10).map(|d| format!("PWM: {}%", d)).collect();
    assert_eq!(room.serial().lines(), expected);
    assert_eq!(room.delay().delays_ms, vec![500; 11]);
    assert_eq!(room.intensity(), DutyCycle::FULL);
    assert_eq!(room.state(), RoomState::Idle);
}

#[test]
fn test_ramp_pwm_write_precedes_line_and_delay() {
    let (mut room, trace) = traced();
    room.on_command(b'G');

    let mut expected = Vec::new();
    for duty in (0..=100u8).step_by(10) {
        expected.push(TraceEvent::Pwm(duty));
        expected.push(TraceEvent::Tx(format!("PWM: {}%", duty).into_bytes()));
        expected.push(TraceEvent::Tx(b"\r\n".to_vec()));
        expected.push(TraceEvent::Delay(500));
    }
    assert_eq!(*trace.borrow(), expected);
}

#[test]
fn test_ramp_uses_configured_step_delay() {
    let config = RoomConfig::default().with_ramp_step_delay_ms(20);
    let mut room = RoomController::with_config(
        MockPwm::new(),
        MockSerial::new(),
        MockClock::default(),
        MockDelay::default(),
        config,
    );
    room.on_command(b'G');
    assert_eq!(room.delay().delays_ms, vec![20; 11]);
}

// ============================================================================
// Tests: tick() / Timeout
// ============================================================================

#[test]
fn test_tick_idle_does_nothing() {
    let mut room = initialized();
    room.clock_mut().advance(10 * LED_TIMEOUT_MS);
    let writes_before = room.pwm().writes.len();

    assert!(!room.tick());
    assert_eq!(room.pwm().writes.len(), writes_before);
    assert!(room.serial().bytes.is_empty());
}

#[test]
fn test_tick_before_timeout_is_silent() {
    let mut room = initialized();
    room.on_activation_event();
    room.serial_mut().clear();
    room.clock_mut().advance(LED_TIMEOUT_MS - 1);

    assert!(!room.tick());
    assert_eq!(room.state(), RoomState::Occupied);
    assert_eq!(room.intensity(), DutyCycle::FULL);
    assert!(room.serial().bytes.is_empty());
}

#[test]
fn test_tick_after_timeout_vacates_once() {
    let mut room = initialized();
    room.on_activation_event();
    room.serial_mut().clear();
    room.clock_mut().advance(LED_TIMEOUT_MS);

    assert!(room.tick());
    assert_eq!(room.state(), RoomState::Idle);
    assert_eq!(room.intensity(), DutyCycle::OFF);
    assert_eq!(room.pwm().last_duty(), Some(0));

    // Zweiter Tick: schon leer, keine weitere Meldung
    room.clock_mut().advance(LED_TIMEOUT_MS);
    assert!(!room.tick());
    assert_eq!(room.serial().lines(), vec!["Timeout: Sala vacía"]);
}

#[test]
fn test_tick_after_dimming_still_times_out() {
    let mut room = initialized();
    room.on_command(b'O');
    room.on_command(b'3');
    room.clock_mut().advance(LED_TIMEOUT_MS + 50);

    assert!(room.tick());
    assert_eq!(room.intensity(), DutyCycle::OFF);
}

#[test]
fn test_tick_custom_timeout() {
    let config = RoomConfig::default().with_timeout_ms(100);
    let mut room = RoomController::with_config(
        MockPwm::new(),
        MockSerial::new(),
        MockClock::default(),
        MockDelay::default(),
        config,
    );
    room.on_activation_event();
    room.clock_mut().set(99);
    assert!(!room.tick());
    room.clock_mut().set(100);
    assert!(room.tick());
}

// ============================================================================
// Tests: Szenario
// ============================================================================

#[test]
fn test_scenario_occupancy_timeout() {
    let mut room = controller();
    room.initialize();
    room.serial_mut().clear();
    room.status_report();
    assert_eq!(room.serial().lines(), vec!["Estado actual de la sala: VACÍA"]);

    room.clock_mut().set(5_000);
    room.on_activation_event();
    room.serial_mut().clear();
    room.status_report();
    assert_eq!(room.serial().lines(), vec!["Estado actual de la sala: OCUPADA"]);
    assert_eq!(room.intensity(), DutyCycle::FULL);

    room.clock_mut().set(5_000 + LED_TIMEOUT_MS - 1);
    room.tick();
    room.serial_mut().clear();
    room.status_report();
    assert_eq!(room.serial().lines(), vec!["Estado actual de la sala: OCUPADA"]);

    room.clock_mut().set(5_000 + LED_TIMEOUT_MS);
    room.tick();
    room.serial_mut().clear();
    room.status_report();
    assert_eq!(room.serial().lines(), vec!["Estado actual de la sala: VACÍA"]);
    assert_eq!(room.intensity(), DutyCycle::OFF);
}

// ============================================================================
// Tests: PWM-Fehler
// ============================================================================

#[test]
fn test_pwm_failure_keeps_bookkeeping() {
    let mut room = initialized();
    room.on_command(b'O');
    let writes_before = room.pwm().writes.len();

    // Nächster Schreibzugriff schlägt fehl, Controller läuft weiter
    room.pwm_mut().fail_next_write = true;
    room.on_command(b'i');

    assert_eq!(room.state(), RoomState::Idle);
    assert_eq!(room.intensity(), DutyCycle::OFF);
    assert_eq!(room.serial().lines().last().map(String::as_str), Some("Sala vacía"));
    assert_eq!(room.pwm().writes.len(), writes_before);
}

#[test]
fn test_independent_instances() {
    let mut a = initialized();
    let b = initialized();
    a.on_command(b'O');

    assert_eq!(a.state(), RoomState::Occupied);
    assert_eq!(b.state(), RoomState::Idle);
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #[test]
    fn prop_activation_alternates(presses in 1usize..64) {
        let mut room = initialized();
        for n in 1..=presses {
            room.on_activation_event();
            let expected = if n % 2 == 1 { RoomState::Occupied } else { RoomState::Idle };
            prop_assert_eq!(room.state(), expected);
        }
    }

    #[test]
    fn prop_intensity_commands_never_change_state(
        occupied in any::<bool>(),
        commands in prop::collection::vec(prop::sample::select(b"HhLl12345".to_vec()), 0..32),
    ) {
        let mut room = initialized();
        if occupied {
            room.on_command(b'O');
        }
        let state = room.state();
        for byte in commands {
            room.on_command(byte);
            prop_assert_eq!(room.state(), state);
            prop_assert_eq!(Some(room.intensity().percent()), room.pwm().last_duty());
        }
    }

    #[test]
    fn prop_unknown_bytes_change_nothing(byte in any::<u8>()) {
        prop_assume!(matches!(Command::from(byte), Command::Unknown(_)));
        let mut room = initialized();
        let intensity = room.intensity();
        room.on_command(byte);

        prop_assert_eq!(room.state(), RoomState::Idle);
        prop_assert_eq!(room.intensity(), intensity);
        let mut expected = b"Comando desconocido: ".to_vec();
        expected.push(byte);
        expected.extend_from_slice(b"\r\n");
        prop_assert_eq!(&room.serial().bytes, &expected);
    }
}
