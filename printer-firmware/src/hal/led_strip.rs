// LED-Strip und Status-LED Implementierungen
//
// Implementiert die Traits aus printer-core für echte Hardware:
// WS2812 Strip über das RMT Peripheral, Status-LED über einen GPIO.

use esp_hal::Blocking;
use esp_hal::gpio::{Level, Output, OutputConfig};
use esp_hal::rmt::{PulseCode, Rmt};
use esp_hal::time::Rate;
use esp_hal_smartled::SmartLedsAdapter;
use printer_core::{LedError, LedStrip, StatusIndicator};
use rgb::RGB8;
use smart_leds_trait::SmartLedsWrite;

use crate::config::{LED_COUNT, RMT_BUFFER_SIZE};

/// Real Hardware LED Strip
///
/// Nutzt ESP32 RMT Peripheral um WS2812 LEDs anzusteuern. `set()` schreibt
/// in einen lokalen Frame, `flush()` überträgt den ganzen Frame.
///
/// Hinweis: Der RMT-Buffer muss länger leben als der Strip, daher wird er im
/// Task erstellt und als Parameter übergeben statt im Constructor allokiert.
pub struct RmtLedStrip<'a> {
    led: SmartLedsAdapter<'a, RMT_BUFFER_SIZE>,
    frame: [RGB8; LED_COUNT],
}

impl<'a> RmtLedStrip<'a> {
    /// Erstellt einen neuen RmtLedStrip
    ///
    /// # Parameter
    /// - `gpio`: GPIO4 Peripheral für die Datenleitung
    /// - `rmt_peripheral`: RMT Peripheral
    /// - `rmt_clock_mhz`: RMT Clock Frequenz in MHz (z.B. 80)
    /// - `buffer`: Buffer für LED-Daten (erstellt mit smart_led_buffer!(LED_COUNT))
    pub fn new(
        gpio: esp_hal::peripherals::GPIO4<'a>,
        rmt_peripheral: esp_hal::peripherals::RMT<'a>,
        rmt_clock_mhz: u32,
        buffer: &'a mut [PulseCode; RMT_BUFFER_SIZE],
    ) -> Self {
        // RMT initialisieren
        let rmt: Rmt<'a, Blocking> =
            Rmt::new(rmt_peripheral, Rate::from_mhz(rmt_clock_mhz)).unwrap();

        // SmartLED Adapter erstellen
        let led = SmartLedsAdapter::new(rmt.channel0, gpio, buffer);

        Self {
            led,
            frame: [RGB8::default(); LED_COUNT],
        }
    }
}

impl LedStrip for RmtLedStrip<'_> {
    fn len(&self) -> usize {
        LED_COUNT
    }

    fn set(&mut self, position: usize, color: RGB8) -> Result<(), LedError> {
        let pixel = self.frame.get_mut(position).ok_or(LedError::OutOfRange)?;
        *pixel = color;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), LedError> {
        self.led
            .write(self.frame.iter().copied())
            .map_err(|_| LedError::WriteFailed)
    }
}

/// Status-LED an einem GPIO (active high)
pub struct GpioIndicator<'a> {
    pin: Output<'a>,
}

impl<'a> GpioIndicator<'a> {
    /// Startet ausgeschaltet
    pub fn new(gpio: esp_hal::peripherals::GPIO15<'a>) -> Self {
        Self {
            pin: Output::new(gpio, Level::Low, OutputConfig::default()),
        }
    }
}

impl StatusIndicator for GpioIndicator<'_> {
    fn set_on(&mut self) {
        self.pin.set_high();
    }

    fn set_off(&mut self) {
        self.pin.set_low();
    }

    fn toggle(&mut self) {
        self.pin.toggle();
    }
}
