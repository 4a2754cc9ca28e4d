// Task-Modul: Enthält alle Embassy Tasks
//
// Taster- und UART-Task liefern Events über einen Channel,
// der Controller-Task verarbeitet sie nacheinander (Taster/UART → Controller).

pub mod button;
pub mod room;
pub mod serial;

// Re-export Tasks für einfachen Import
pub use button::button_task;
pub use room::room_control_task;
pub use serial::serial_rx_task;
