// Millisekunden-Uhr auf Basis von embassy-time

use embassy_time::Instant;
use room_core::Clock;

/// Monotone Uhr seit Boot (embassy Zeit-Treiber von esp-rtos)
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}
