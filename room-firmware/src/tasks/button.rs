// Button Task - Belegungs-Taster mit Entprellung
use defmt::{info, warn};
use embassy_time::{Duration, Timer};
use esp_hal::gpio::{Input, InputConfig, Pull};

use crate::config::BUTTON_DEBOUNCE_MS;
use crate::{RoomEvent, RoomEventSender};

/// Button Task - wartet auf fallende Flanken und meldet entprellte Drücke
///
/// Der Taster ist aktiv LOW (interner Pull-Up). Ein Druck zählt erst, wenn
/// der Pin nach `BUTTON_DEBOUNCE_MS` noch LOW ist. Ist die Event-Queue voll,
/// wird der Druck verworfen.
#[embassy_executor::task]
pub async fn button_task(pin: esp_hal::peripherals::GPIO9<'static>, events: RoomEventSender) {
    let mut button = Input::new(pin, InputConfig::default().with_pull(Pull::Up));
    info!("Button: task started");

    loop {
        button.wait_for_falling_edge().await;
        Timer::after(Duration::from_millis(BUTTON_DEBOUNCE_MS)).await;

        if button.is_low() {
            if events.try_send(RoomEvent::ButtonPressed).is_err() {
                warn!("Button: event queue full, press dropped");
            }
            // Loslassen abwarten, sonst zählt Prellen beim Loslassen mit
            button.wait_for_high().await;
        }
    }
}
