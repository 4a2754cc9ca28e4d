//! Pure Business Logic Functions
//!
//! Funktionen ohne Hardware-Dependencies (testbar!)

use core::fmt::Write;

use crate::config::RAMP_STEP_PERCENT;
use crate::types::{DutyCycle, RoomState};

/// Puffergröße für eine formatierte Ausgabezeile (ohne CRLF)
pub const LINE_CAPACITY: usize = 48;

/// Formatierte Ausgabezeile
pub type Line = heapless::String<LINE_CAPACITY>;

/// Prüft ob der Belegungs-Timeout abgelaufen ist
///
/// `saturating_sub` statt Subtraktion: ein `since` in der Zukunft zählt als
/// "noch nicht abgelaufen".
///
/// ```
/// # use room_core::timeout_elapsed;
/// assert!(!timeout_elapsed(2999, 0, 3000));
/// assert!(timeout_elapsed(3000, 0, 3000));
/// ```
pub fn timeout_elapsed(now_ms: u64, since_ms: u64, timeout_ms: u64) -> bool {
    now_ms.saturating_sub(since_ms) >= timeout_ms
}

/// Folgezustand beim Tastendruck (Toggle)
pub fn toggle(state: RoomState) -> RoomState {
    match state {
        RoomState::Idle => RoomState::Occupied,
        RoomState::Occupied => RoomState::Idle,
    }
}

/// Rampen-Schritte 0, 10, ..., 100 (inklusive)
///
/// ```
/// # use room_core::ramp_steps;
/// assert_eq!(ramp_steps().count(), 11);
/// assert_eq!(ramp_steps().last().map(|d| d.percent()), Some(100));
/// ```
pub fn ramp_steps() -> impl Iterator<Item = DutyCycle> {
    (0..=100u8)
        .step_by(RAMP_STEP_PERCENT as usize)
        .map(DutyCycle::new)
}

/// Formatiert `"PWM: {duty}%"`
pub fn pwm_line(duty: DutyCycle) -> Line {
    let mut line = Line::new();
    // passt immer: längste Zeile ist "PWM: 100%"
    let _ = write!(line, "PWM: {}%", duty);
    line
}

/// Formatiert `"Estado actual de la sala: {state}"`
pub fn status_line(state: RoomState) -> Line {
    let mut line = Line::new();
    let _ = write!(line, "Estado actual de la sala: {}", state.as_str());
    line
}
