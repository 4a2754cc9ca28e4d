// Keine Standard-Bibliothek verwenden (Embedded System)
#![no_std]
// Kein normaler main() Einstiegspunkt (wird von esp_rtos bereitgestellt)
#![no_main]
// Verbiete mem::forget - gefährlich bei ESP HAL Types mit DMA-Buffern
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
// Verbiete große Stack-Frames (Stack ist auf Embedded Systemen begrenzt)
#![deny(clippy::large_stack_frames)]

// Embassy Async Runtime
use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};

// ESP32-C6 HAL
use esp_hal::clock::CpuClock;
use esp_hal::timer::timg::TimerGroup;
use esp_hal::uart::{Config as UartConfig, Uart};

// Backtrace bei Panic und println!() Support
use {esp_backtrace as _, esp_println as _};

use defmt::info;

// Projekt-Module und Konfiguration
use room_control::RoomEventChannel;
use room_control::config::{
    BUTTON_GPIO_PIN, LIGHT_GPIO_PIN, UART_BAUDRATE, UART_RX_GPIO_PIN, UART_TX_GPIO_PIN,
};
use room_control::tasks::{button_task, room_control_task, serial_rx_task};

// ESP-IDF App Descriptor - erforderlich für den Bootloader!
// Ohne diesen schlägt das Flashen mit "ESP-IDF App Descriptor missing" fehl
esp_bootloader_esp_idf::esp_app_desc!();

/// Main Entry Point
///
/// Initialisiert Hardware, startet Embassy Runtime und spawnt Tasks.
/// Danach schläft main() - alle Arbeit läuft in Tasks.
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    // ESP32-C6 Konfiguration: CPU auf maximale Taktfrequenz (160 MHz)
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // Embassy Runtime initialisieren (Timer + Software Interrupt)
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    let sw_interrupt =
        esp_hal::interrupt::software::SoftwareInterruptControl::new(peripherals.SW_INTERRUPT);
    esp_rtos::start(timg0.timer0, sw_interrupt.software_interrupt0);

    info!(
        "Room control: light GPIO{}, button GPIO{}, UART0 TX GPIO{} / RX GPIO{} @ {} baud",
        LIGHT_GPIO_PIN, BUTTON_GPIO_PIN, UART_TX_GPIO_PIN, UART_RX_GPIO_PIN, UART_BAUDRATE
    );

    // UART0 für die Kommando-Schnittstelle
    // RX läuft async im eigenen Task, TX gehört dem Controller
    let uart = Uart::new(
        peripherals.UART0,
        UartConfig::default().with_baudrate(UART_BAUDRATE),
    )
    .expect("Failed to initialize UART0")
    .with_rx(peripherals.GPIO17)
    .with_tx(peripherals.GPIO16)
    .into_async();
    let (uart_rx, uart_tx) = uart.split();

    // Event-Channel erstellen (Taster/UART → Controller)
    static EVENT_CHANNEL: static_cell::StaticCell<RoomEventChannel> =
        static_cell::StaticCell::new();
    let event_channel = &*EVENT_CHANNEL.init(RoomEventChannel::new());

    // Spawn Controller Task (einziger Besitzer von Zustand, PWM und UART TX)
    spawner
        .spawn(room_control_task(
            peripherals.LEDC,
            peripherals.GPIO5,
            uart_tx,
            event_channel.receiver(),
        ))
        .unwrap();

    // Spawn Eingabe-Tasks
    spawner
        .spawn(button_task(peripherals.GPIO9, event_channel.sender()))
        .unwrap();
    spawner
        .spawn(serial_rx_task(uart_rx, event_channel.sender()))
        .unwrap();

    // Main-Loop: schläft (alle Arbeit läuft in Tasks)
    loop {
        Timer::after(Duration::from_secs(3600)).await;
    }
}
