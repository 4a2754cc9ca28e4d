//! Hardware Abstraction Traits
//!
//! Diese Traits definieren Schnittstellen für Hardware-Zugriff
//! ohne konkrete Implementierung.
//!
//! PWM und Delay kommen direkt aus `embedded-hal` 1.0
//! ([`SetDutyCycle`], [`DelayNs`]), eigene Traits gibt es nur für die
//! serielle Ausgabe und die Millisekunden-Uhr.
//!
//! [`SetDutyCycle`]: embedded_hal::pwm::SetDutyCycle
//! [`DelayNs`]: embedded_hal::delay::DelayNs

/// Zeilenende der seriellen Ausgabe
pub const LINE_END: &[u8] = b"\r\n";

/// Trait für die serielle Text-Ausgabe
///
/// Ausgabe gilt als unfehlbar und geordnet (FIFO). Schreibfehler sind
/// Sache der Implementierung.
///
/// # Implementierungen
/// - **Production:** UartConsole (ESP32 UART0)
/// - **Testing:** MockSerial (in-memory Mock)
pub trait SerialOutput {
    /// Schreibt rohe Bytes ohne Zeilenende
    fn write_bytes(&mut self, bytes: &[u8]);

    /// Schreibt eine Zeile inkl. CRLF
    fn send_text(&mut self, line: &str) {
        self.write_bytes(line.as_bytes());
        self.write_bytes(LINE_END);
    }

    /// Schreibt ein einzelnes Byte (Echo unbekannter Kommandos)
    fn send_char(&mut self, byte: u8) {
        self.write_bytes(&[byte]);
    }
}

/// Monotone Millisekunden-Uhr seit Boot
pub trait Clock {
    /// Aktuelle Zeit in ms, fällt nie
    fn now_ms(&self) -> u64;
}
