//! Hardware Abstraction Traits
//!
//! Diese Traits definieren Schnittstellen für Hardware-Zugriff
//! ohne konkrete Implementierung.

use rgb::RGB8;

/// Fehler-Typ für LED-Operationen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedError {
    /// Position liegt außerhalb des Strips
    OutOfRange,
    /// Übertragung an die Hardware fehlgeschlagen
    WriteFailed,
}

/// Trait für adressierbare LED-Strips (WS2812/Neopixel)
///
/// Das Modell entspricht einem Frame-Buffer: `set()` ändert nur den Buffer,
/// erst `flush()` überträgt alle Positionen an die Hardware.
///
/// # Implementierungen
/// - **Production:** RmtLedStrip (ESP32 RMT Peripheral)
/// - **Preview:** WindowStrip (Desktop-Fenster)
/// - **Testing:** MockLedStrip (in-memory Mock)
pub trait LedStrip {
    /// Anzahl der adressierbaren Positionen
    fn len(&self) -> usize;

    /// Setzt die Farbe einer Position (0-basiert) im Buffer
    fn set(&mut self, position: usize, color: RGB8) -> Result<(), LedError>;

    /// Überträgt den Buffer an die Hardware
    ///
    /// # Fehlerbehandlung
    /// Gibt `LedError::WriteFailed` zurück wenn Hardware-Zugriff fehlschlägt
    fn flush(&mut self) -> Result<(), LedError>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Binäre Status-Anzeige (z.B. Onboard-LED) für die Link-Gesundheit
pub trait StatusIndicator {
    fn set_on(&mut self);
    fn set_off(&mut self);
    fn toggle(&mut self);
}

#[cfg(feature = "defmt")]
impl defmt::Format for LedError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            LedError::OutOfRange => defmt::write!(fmt, "position out of range"),
            LedError::WriteFailed => defmt::write!(fmt, "write failed"),
        }
    }
}
