// Hardware Abstraction Layer (HAL) Module
//
// Dieses Modul implementiert die Hardware-Traits aus printer-core
// (LedStrip, StatusIndicator) für das ESP32-C6.

pub mod led_strip;

pub use led_strip::{GpioIndicator, RmtLedStrip};
