// Hardware Abstraction Layer (HAL) Module
//
// Dieses Modul verbindet die Traits aus room-core mit den
// ESP32-Peripherals (LEDC, UART0, embassy-time).

pub mod clock;
pub mod dimmer;
pub mod uart_console;

pub use clock::EmbassyClock;
pub use dimmer::{LedcDimmer, PwmError};
pub use uart_console::UartConsole;
