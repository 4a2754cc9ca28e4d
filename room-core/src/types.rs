//! Core Types für die Raumsteuerung
//!
//! Datenstrukturen ohne Hardware-Dependencies

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Belegungszustand des Raums
///
/// Startet nach `initialize()` immer in `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RoomState {
    /// Raum leer, Licht aus
    #[default]
    Idle,
    /// Raum belegt, Timeout läuft
    Occupied,
}

impl RoomState {
    /// Name des Zustands wie er im Statusbericht erscheint
    pub fn as_str(self) -> &'static str {
        match self {
            RoomState::Idle => "VACÍA",
            RoomState::Occupied => "OCUPADA",
        }
    }

    pub fn is_occupied(self) -> bool {
        self == RoomState::Occupied
    }
}

/// Fehler: Duty Cycle außerhalb von 0-100%
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DutyOutOfRange(pub u8);

/// PWM Duty Cycle in Prozent (0-100)
///
/// Der Wert ist immer gültig, `new()` begrenzt auf 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DutyCycle(u8);

impl DutyCycle {
    pub const OFF: Self = Self(0);
    pub const FULL: Self = Self(100);

    /// Erstellt einen Duty Cycle, Werte über 100 werden auf 100 begrenzt
    pub const fn new(percent: u8) -> Self {
        if percent > 100 { Self(100) } else { Self(percent) }
    }

    pub const fn percent(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for DutyCycle {
    type Error = DutyOutOfRange;

    fn try_from(percent: u8) -> Result<Self, Self::Error> {
        if percent > 100 {
            Err(DutyOutOfRange(percent))
        } else {
            Ok(Self(percent))
        }
    }
}

impl From<DutyCycle> for u8 {
    fn from(duty: DutyCycle) -> Self {
        duty.0
    }
}

// Dezimal ohne führende Nullen, 1-3 Stellen
impl fmt::Display for DutyCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Serielles Ein-Zeichen-Kommando
///
/// Jedes empfangene Byte ergibt ein Kommando, unbekannte Zeichen landen in
/// `Unknown` und werden zurückgemeldet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `H`: Licht auf 100%
    FullOn,
    /// `L`: Licht auf 0%
    Off,
    /// `O`: Raum als belegt markieren
    Occupy,
    /// `I`: Raum als leer markieren
    Vacate,
    /// `S`: Statusbericht senden
    Status,
    /// `G`: Rampe 0% → 100% (blockierend)
    Ramp,
    /// `?`: Kommando-Menü anzeigen
    Menu,
    /// `1`-`5`: feste Helligkeit 10%-50%
    Preset(DutyCycle),
    /// Alles andere
    Unknown(u8),
}

impl From<u8> for Command {
    fn from(byte: u8) -> Self {
        match byte.to_ascii_uppercase() {
            b'H' => Command::FullOn,
            b'L' => Command::Off,
            b'O' => Command::Occupy,
            b'I' => Command::Vacate,
            b'S' => Command::Status,
            b'G' => Command::Ramp,
            b'?' => Command::Menu,
            digit @ b'1'..=b'5' => Command::Preset(DutyCycle::new((digit - b'0') * 10)),
            _ => Command::Unknown(byte),
        }
    }
}

impl Command {
    /// Ändert das Kommando den Belegungszustand?
    pub fn changes_state(self) -> bool {
        matches!(self, Command::Occupy | Command::Vacate)
    }
}

/// Momentaufnahme des Controllers (nur lesend)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct RoomStatus {
    pub state: RoomState,
    pub intensity: DutyCycle,
    /// Belegt seit (ms), `None` wenn der Raum leer ist
    pub occupied_for_ms: Option<u64>,
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for RoomState {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}", self.as_str())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DutyCycle {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}%", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Command {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Command::FullOn => defmt::write!(fmt, "FullOn"),
            Command::Off => defmt::write!(fmt, "Off"),
            Command::Occupy => defmt::write!(fmt, "Occupy"),
            Command::Vacate => defmt::write!(fmt, "Vacate"),
            Command::Status => defmt::write!(fmt, "Status"),
            Command::Ramp => defmt::write!(fmt, "Ramp"),
            Command::Menu => defmt::write!(fmt, "Menu"),
            Command::Preset(duty) => defmt::write!(fmt, "Preset {{ duty: {} }}", duty),
            Command::Unknown(byte) => defmt::write!(fmt, "Unknown {{ byte: {=u8:#x} }}", byte),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for RoomStatus {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "RoomStatus {{ state: {}, intensity: {}, occupied_for_ms: {} }}",
            self.state,
            self.intensity,
            self.occupied_for_ms
        )
    }
}
