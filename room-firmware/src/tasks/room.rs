// Room Control Task - Zustandsautomat + LEDC Licht + UART Ausgabe
use defmt::{info, warn};
use embassy_futures::select::{Either, select};
use embassy_time::{Duration, Ticker};
use embedded_hal::delay::DelayNs;
use embedded_hal::pwm::SetDutyCycle;
use esp_hal::delay::Delay;
use esp_hal::gpio::DriveMode;
use esp_hal::ledc::channel::{self, ChannelIFace};
use esp_hal::ledc::timer::{self, TimerIFace};
use esp_hal::ledc::{LSGlobalClkSource, Ledc, LowSpeed};
use esp_hal::time::Rate;
use esp_hal::uart::UartTx;
use esp_hal::Async;

use crate::config::{PWM_FREQUENCY_KHZ, TICK_INTERVAL_MS};
use crate::hal::{EmbassyClock, LedcDimmer, UartConsole};
use crate::{Clock, RoomController, RoomEvent, RoomEventReceiver, SerialOutput};

/// Room Control Logic - Testbare Event-Schleife ohne Hardware-Abhängigkeit
///
/// Verarbeitet Events aus dem Channel und ruft periodisch `tick()` auf.
/// Alle Einstiegspunkte laufen in diesem einen Task, dadurch ist der
/// Controller nie reentrant.
///
/// Die Rampe (`G`) blockiert den Executor für ~5.5 s. Events sammeln sich
/// in der Zeit im Channel bzw. im UART-FIFO.
///
/// # Parameter
/// - `room`: bereits initialisierter Controller
/// - `events`: Channel Receiver für Taster- und UART-Events
pub async fn room_control_logic<P, S, C, D>(
    room: &mut RoomController<P, S, C, D>,
    events: RoomEventReceiver,
) -> !
where
    P: SetDutyCycle,
    S: SerialOutput,
    C: Clock,
    D: DelayNs,
{
    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS));

    loop {
        match select(events.receive(), ticker.next()).await {
            Either::First(RoomEvent::ButtonPressed) => {
                room.on_activation_event();
                info!("Button: room is now {}", room.state());
            }
            Either::First(RoomEvent::Serial(byte)) => {
                let command = room.on_command(byte);
                if command.changes_state() {
                    info!("Command {} -> room {}", command, room.state());
                } else {
                    info!("Command {}", command);
                }
            }
            Either::Second(()) => {
                if room.tick() {
                    warn!("Occupancy timeout, light off");
                }
            }
        }
    }
}

/// Room Control Task - Embassy Task für den Controller
///
/// Dieser Task übernimmt die LEDC-Initialisierung, baut den Controller
/// und ruft dann die testbare `room_control_logic()` Funktion auf.
///
/// # Parameter
/// - `ledc_peripheral`: LEDC Peripheral für die PWM
/// - `light_pin`: GPIO für das Licht
/// - `tx`: TX-Hälfte von UART0
/// - `events`: Channel Receiver für Taster- und UART-Events
#[embassy_executor::task]
pub async fn room_control_task(
    ledc_peripheral: esp_hal::peripherals::LEDC<'static>,
    light_pin: esp_hal::peripherals::GPIO5<'static>,
    tx: UartTx<'static, Async>,
    events: RoomEventReceiver,
) {
    // LEDC: globaler Takt + Timer0 + Kanal0
    let mut ledc = Ledc::new(ledc_peripheral);
    ledc.set_global_slow_clock(LSGlobalClkSource::APBClk);

    let mut pwm_timer = ledc.timer::<LowSpeed>(timer::Number::Timer0);
    pwm_timer
        .configure(timer::config::Config {
            duty: timer::config::Duty::Duty10Bit,
            clock_source: timer::LSClockSource::APBClk,
            frequency: Rate::from_khz(PWM_FREQUENCY_KHZ),
        })
        .expect("Failed to configure LEDC timer");

    let mut pwm_channel = ledc.channel(channel::Number::Channel0, light_pin);
    pwm_channel
        .configure(channel::config::Config {
            timer: &pwm_timer,
            duty_pct: 0,
            drive_mode: DriveMode::PushPull,
        })
        .expect("Failed to configure LEDC channel");
    info!("LEDC: {} kHz PWM ready", PWM_FREQUENCY_KHZ);

    // Hardware in den Controller stecken (via Traits - Hardware oder Mock)
    let mut room = RoomController::new(
        LedcDimmer::new(pwm_channel),
        UartConsole::new(tx),
        EmbassyClock,
        Delay::new(),
    );
    room.initialize();
    info!(
        "Room: initialized, {}, timeout {} ms",
        room.status(),
        room.config().timeout_ms
    );

    room_control_logic(&mut room, events).await
}
