// Library-Root: Wiederverwendbare Logik und Module
// Keine Standard-Bibliothek (Embedded System)
#![no_std]

// Module
pub mod config;
pub mod hal;
pub mod tasks;

// Re-exports von room-core
pub use room_core::{Clock, Command, DutyCycle, RoomController, RoomState, SerialOutput};

// Embassy Channel-Typen
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};

use crate::config::EVENT_QUEUE_SIZE;

/// Eingangs-Ereignis für den Controller-Task
///
/// Taster- und UART-Task erzeugen Events, nur der Controller-Task
/// verarbeitet sie. Dadurch laufen alle Einstiegspunkte nacheinander.
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum RoomEvent {
    /// Entprellter Tastendruck
    ButtonPressed,
    /// Ein Byte von der seriellen Schnittstelle
    Serial(u8),
}

// ============================================================================
// Type-Aliase für Channel-Typen
// ============================================================================
//
// Statt:  Sender<'static, NoopRawMutex, RoomEvent, 16>
// Nutze:  RoomEventSender

/// Channel für Eingangs-Events (Taster/UART → Controller Task)
pub type RoomEventChannel = Channel<NoopRawMutex, RoomEvent, EVENT_QUEUE_SIZE>;

/// Sender für Eingangs-Events
pub type RoomEventSender = Sender<'static, NoopRawMutex, RoomEvent, EVENT_QUEUE_SIZE>;

/// Receiver für Eingangs-Events (nur Controller Task)
pub type RoomEventReceiver = Receiver<'static, NoopRawMutex, RoomEvent, EVENT_QUEUE_SIZE>;
