// LEDC Dimmer - PWM-Kanal für das dimmbare Licht
//
// Implementiert embedded_hal::pwm::SetDutyCycle, damit der RoomController
// den LEDC-Kanal direkt benutzen kann.

use defmt::{Debug2Format, error};
use embedded_hal::pwm::{ErrorKind, ErrorType, SetDutyCycle};
use esp_hal::ledc::LowSpeed;
use esp_hal::ledc::channel::{Channel, ChannelIFace};

/// Auflösung aus Sicht des Controllers: 0-100 Prozent
const MAX_DUTY_PERCENT: u16 = 100;

/// Fehler-Typ für LEDC-Schreiboperationen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PwmError {
    WriteFailed,
}

impl embedded_hal::pwm::Error for PwmError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// LEDC Low-Speed Kanal als Prozent-Dimmer
///
/// Der Kanal muss vorher mit Timer und Pin konfiguriert sein.
pub struct LedcDimmer<'a> {
    channel: Channel<'a, LowSpeed>,
}

impl<'a> LedcDimmer<'a> {
    pub fn new(channel: Channel<'a, LowSpeed>) -> Self {
        Self { channel }
    }
}

impl ErrorType for LedcDimmer<'_> {
    type Error = PwmError;
}

impl SetDutyCycle for LedcDimmer<'_> {
    fn max_duty_cycle(&self) -> u16 {
        MAX_DUTY_PERCENT
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        let percent = duty.min(MAX_DUTY_PERCENT) as u8;
        self.channel.set_duty(percent).map_err(|e| {
            error!("LEDC: set_duty({}%) failed: {}", percent, Debug2Format(&e));
            PwmError::WriteFailed
        })
    }
}
