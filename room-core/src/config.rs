// Konfiguration: Konstanten für Zustandsautomat und PWM

use crate::types::DutyCycle;

/// Duty Cycle nach `initialize()` (Prozent)
pub const PWM_INITIAL_DUTY: u8 = 20;

/// Belegungs-Timeout in Millisekunden
/// Nach Ablauf fällt der Raum automatisch auf VACÍA zurück
pub const LED_TIMEOUT_MS: u64 = 3000;

/// Schrittweite der Rampe (Prozent)
pub const RAMP_STEP_PERCENT: u8 = 10;

/// Wartezeit pro Rampen-Schritt in Millisekunden
pub const RAMP_STEP_DELAY_MS: u32 = 500;

/// Laufzeit-Konfiguration des Controllers
///
/// `Default` nutzt die Konstanten oben.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomConfig {
    pub initial_duty: DutyCycle,
    pub timeout_ms: u64,
    pub ramp_step_delay_ms: u32,
}

impl RoomConfig {
    pub const fn new() -> Self {
        Self {
            initial_duty: DutyCycle::new(PWM_INITIAL_DUTY),
            timeout_ms: LED_TIMEOUT_MS,
            ramp_step_delay_ms: RAMP_STEP_DELAY_MS,
        }
    }

    pub const fn with_initial_duty(mut self, duty: DutyCycle) -> Self {
        self.initial_duty = duty;
        self
    }

    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub const fn with_ramp_step_delay_ms(mut self, delay_ms: u32) -> Self {
        self.ramp_step_delay_ms = delay_ms;
        self
    }
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self::new()
    }
}
