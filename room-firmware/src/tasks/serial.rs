// Serial RX Task - liest Kommando-Zeichen von UART0
use defmt::{Debug2Format, info, warn};
use esp_hal::Async;
use esp_hal::uart::UartRx;

use crate::config::UART_RX_BUFFER_SIZE;
use crate::{RoomEvent, RoomEventSender};

/// Serial RX Task - jedes empfangene Byte wird ein `RoomEvent::Serial`
///
/// `send().await` wartet bei voller Queue, es geht also kein Zeichen
/// verloren solange der UART-FIFO reicht.
#[embassy_executor::task]
pub async fn serial_rx_task(mut rx: UartRx<'static, Async>, events: RoomEventSender) {
    let mut buffer = [0u8; UART_RX_BUFFER_SIZE];
    info!("UART: RX task started");

    loop {
        match rx.read_async(&mut buffer).await {
            Ok(count) => {
                for &byte in &buffer[..count] {
                    events.send(RoomEvent::Serial(byte)).await;
                }
            }
            Err(e) => warn!("UART: read failed: {}", Debug2Format(&e)),
        }
    }
}
