// Projekt-Konfiguration: Konstanten und Hardware-Zuordnungen
//
// Zustandsautomat-Konstanten (Timeout, Start-Duty, Rampe) liegen in
// room_core::config, hier nur Board-spezifisches.

// ============================================================================
// Licht (LEDC PWM)
// ============================================================================

/// GPIO-Pin für das dimmbare Licht (LEDC Kanal 0)
pub const LIGHT_GPIO_PIN: u8 = 5;

/// PWM-Frequenz in kHz
/// 5 kHz liegt weit über der Flimmergrenze
pub const PWM_FREQUENCY_KHZ: u32 = 5;

// ============================================================================
// Taster
// ============================================================================

/// GPIO-Pin für den Belegungs-Taster (BOOT-Taster, aktiv LOW)
pub const BUTTON_GPIO_PIN: u8 = 9;

/// Entprellzeit in Millisekunden
pub const BUTTON_DEBOUNCE_MS: u64 = 50;

// ============================================================================
// UART Konfiguration
// ============================================================================

/// UART0 TX-Pin (USB-Seriell-Brücke auf dem DevKit)
pub const UART_TX_GPIO_PIN: u8 = 16;

/// UART0 RX-Pin
pub const UART_RX_GPIO_PIN: u8 = 17;

/// Baudrate der Kommando-Schnittstelle
pub const UART_BAUDRATE: u32 = 115_200;

/// Empfangspuffer pro read_async() Aufruf (Bytes)
pub const UART_RX_BUFFER_SIZE: usize = 16;

// ============================================================================
// Controller-Task
// ============================================================================

/// Intervall für room.tick() in Millisekunden
/// Muss deutlich kleiner als LED_TIMEOUT_MS sein
pub const TICK_INTERVAL_MS: u64 = 100;

/// Kapazität der Event-Queue (Taster + UART → Controller)
/// Puffert Eingaben während der blockierenden Rampe
pub const EVENT_QUEUE_SIZE: usize = 16;
