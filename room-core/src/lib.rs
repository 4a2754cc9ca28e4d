//! Room Core - Platform-agnostic Logic and Traits
//!
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Sie definiert Traits, den Belegungs-Zustandsautomaten und Pure Functions.

#![no_std]

pub mod config;
pub mod controller;
pub mod logic;
pub mod traits;
pub mod types;

// Re-exports für einfachen Zugriff
pub use config::{LED_TIMEOUT_MS, PWM_INITIAL_DUTY, RoomConfig};
pub use controller::{MENU, RoomController};
pub use logic::{pwm_line, ramp_steps, status_line, timeout_elapsed, toggle};
pub use traits::{Clock, LINE_END, SerialOutput};
pub use types::{Command, DutyCycle, DutyOutOfRange, RoomState, RoomStatus};
