// UART Console - serielle Text-Ausgabe über UART0
//
// Schreibt blockierend, damit die Ausgabe-Reihenfolge exakt der
// Aufruf-Reihenfolge im Controller entspricht.

use defmt::{Debug2Format, error};
use esp_hal::Async;
use esp_hal::uart::UartTx;
use room_core::SerialOutput;

/// TX-Hälfte von UART0 als SerialOutput
pub struct UartConsole<'a> {
    tx: UartTx<'a, Async>,
}

impl<'a> UartConsole<'a> {
    pub fn new(tx: UartTx<'a, Async>) -> Self {
        Self { tx }
    }
}

impl SerialOutput for UartConsole<'_> {
    fn write_bytes(&mut self, bytes: &[u8]) {
        let mut remaining = bytes;
        while !remaining.is_empty() {
            match self.tx.write(remaining) {
                Ok(written) => remaining = &remaining[written..],
                Err(e) => {
                    // Rest der Zeile verwerfen, Controller läuft weiter
                    error!("UART: write failed: {}", Debug2Format(&e));
                    return;
                }
            }
        }
    }
}
