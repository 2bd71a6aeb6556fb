//! Render-Konfiguration: Farben und Animations-Parameter
//!
//! Alle Werte haben sinnvolle Defaults, die Firmware überschreibt nur,
//! was sie braucht (z.B. `led_count`).

use rgb::RGB8;

pub const OFF: RGB8 = RGB8 { r: 0, g: 0, b: 0 };
pub const RED: RGB8 = RGB8 { r: 255, g: 0, b: 0 };
pub const GREEN: RGB8 = RGB8 { r: 0, g: 255, b: 0 };
pub const BLUE: RGB8 = RGB8 { r: 0, g: 0, b: 255 };
pub const ORANGE: RGB8 = RGB8 { r: 255, g: 165, b: 0 };
pub const WHITE: RGB8 = RGB8 {
    r: 255,
    g: 255,
    b: 255,
};

/// Default-Periode einer Atem-Animation in Sekunden
pub const DEFAULT_PERIOD_SECS: f64 = 2.0;

/// Default-Gamma der Atem-Helligkeitskurve
pub const DEFAULT_GAMMA: f64 = 2.2;

/// Default-Länge des Strips
pub const DEFAULT_LED_COUNT: usize = 64;

/// Parameter für alle Patterns und den Renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    pub led_count: usize,
    pub period_secs: f64,
    pub gamma: f64,
    pub idle_color: RGB8,
    pub error_color: RGB8,
    pub finish_color: RGB8,
    pub prepare_color: RGB8,
    /// Noch nicht erreichter Teil der Fortschrittsbalken
    pub unreached_color: RGB8,
    pub progress_color: RGB8,
    pub paused_color: RGB8,
    /// Farbe während der Link-Hold aktiv ist
    pub fault_color: RGB8,
    pub off_color: RGB8,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            led_count: DEFAULT_LED_COUNT,
            period_secs: DEFAULT_PERIOD_SECS,
            gamma: DEFAULT_GAMMA,
            idle_color: BLUE,
            error_color: RED,
            finish_color: GREEN,
            prepare_color: ORANGE,
            unreached_color: WHITE,
            progress_color: GREEN,
            paused_color: ORANGE,
            fault_color: RED,
            off_color: OFF,
        }
    }
}

impl RenderConfig {
    pub fn with_led_count(mut self, led_count: usize) -> Self {
        self.led_count = led_count;
        self
    }
}
