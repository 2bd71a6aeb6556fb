//! Desktop-Vorschau für die Drucker-Patterns
//!
//! Ein Fenster ersetzt den LED-Strip: jedes Pattern wird über den
//! `LedStrip`-Trait in einen Pixel-Puffer geschrieben und gezeichnet.
//!
//! Tastatur: Leertaste = Pause, Links/Rechts = Geschwindigkeit,
//! Hoch/Runter = Pattern wechseln.

use std::time::Instant;

use eframe::egui;
use printer_core::{LedError, LedStrip, Pattern, PatternTag, RenderConfig};
use rgb::RGB8;

/// Anzahl der simulierten LEDs
const LED_COUNT: usize = 64;

/// Kantenlänge einer LED in Pixeln
const LED_SIZE: f32 = 12.0;

/// Abstand zwischen LEDs
const LED_GAP: f32 = 4.0;

/// Simulierte Druckdauer: Progress läuft in dieser Zeit von 0 auf 1
const PRINT_TIME_SECS: f64 = 60.0;

const MIN_SPEED: f32 = 0.1;
const MAX_SPEED: f32 = 5.0;

/// Reihenfolge beim Durchschalten
const CYCLE: [PatternTag; 6] = [
    PatternTag::Idle,
    PatternTag::Error,
    PatternTag::Progress,
    PatternTag::Finish,
    PatternTag::Paused,
    PatternTag::Prepare,
];

fn main() -> eframe::Result<()> {
    let width = LED_COUNT as f32 * (LED_SIZE + LED_GAP) + LED_GAP + 16.0;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([width, 160.0])
            .with_title("Printer RGB Preview"),
        ..Default::default()
    };

    eframe::run_native(
        "printer-preview",
        options,
        Box::new(|_cc| Ok(Box::new(PreviewApp::new()))),
    )
}

/// Fenster als LED-Strip
///
/// `set()` beschreibt den Arbeits-Puffer, `flush()` macht ihn sichtbar.
struct WindowStrip {
    pending: Vec<RGB8>,
    visible: Vec<RGB8>,
}

impl WindowStrip {
    fn new(len: usize) -> Self {
        Self {
            pending: vec![RGB8::default(); len],
            visible: vec![RGB8::default(); len],
        }
    }

    fn pixels(&self) -> &[RGB8] {
        &self.visible
    }
}

impl LedStrip for WindowStrip {
    fn len(&self) -> usize {
        self.pending.len()
    }

    fn set(&mut self, position: usize, color: RGB8) -> Result<(), LedError> {
        let pixel = self.pending.get_mut(position).ok_or(LedError::OutOfRange)?;
        *pixel = color;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), LedError> {
        self.visible.copy_from_slice(&self.pending);
        Ok(())
    }
}

struct PreviewApp {
    strip: WindowStrip,
    config: RenderConfig,
    /// Index in `CYCLE`
    current: usize,
    pattern: Option<Pattern>,
    /// Simulierte Zeit in Sekunden
    now: f64,
    last_frame: Instant,
    playing: bool,
    speed: f32,
}

impl PreviewApp {
    fn new() -> Self {
        let config = RenderConfig::default().with_led_count(LED_COUNT);
        let mut app = Self {
            strip: WindowStrip::new(LED_COUNT),
            config,
            current: 0,
            pattern: None,
            now: 0.0,
            last_frame: Instant::now(),
            playing: true,
            speed: 1.0,
        };
        app.select(0);
        app
    }

    fn tag(&self) -> PatternTag {
        CYCLE[self.current]
    }

    fn select(&mut self, index: usize) {
        self.current = index % CYCLE.len();
        self.pattern = self.tag().build(&self.config);
    }

    fn step(&mut self, forward: bool) {
        let next = if forward {
            self.current + 1
        } else {
            self.current + CYCLE.len() - 1
        };
        self.select(next);
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        ctx.input(|input| {
            if input.key_pressed(egui::Key::Space) {
                self.playing = !self.playing;
            }
            if input.key_pressed(egui::Key::ArrowLeft) {
                self.speed = (self.speed - 0.1).max(MIN_SPEED);
            }
            if input.key_pressed(egui::Key::ArrowRight) {
                self.speed = (self.speed + 0.1).min(MAX_SPEED);
            }
        });
        if ctx.input(|input| input.key_pressed(egui::Key::ArrowUp)) {
            self.step(true);
        }
        if ctx.input(|input| input.key_pressed(egui::Key::ArrowDown)) {
            self.step(false);
        }
    }

    /// Simulierte Zeit fortschreiben (steht bei Pause)
    fn advance(&mut self) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame).as_secs_f64();
        self.last_frame = now;
        if self.playing {
            self.now += delta * f64::from(self.speed);
        }
    }

    /// Aktuelles Pattern in den Fenster-Strip schreiben
    fn render(&mut self) {
        let Some(pattern) = self.pattern.as_mut() else {
            return;
        };
        let progress = (self.now / PRINT_TIME_SECS) as f32;
        pattern.update(self.now, progress);

        let pattern = &*pattern;
        let strip = &mut self.strip;
        let written = (0..strip.len())
            .try_for_each(|pos| strip.set(pos, pattern.color_at(pos)))
            .and_then(|()| strip.flush());
        if let Err(e) = written {
            eprintln!("preview: write failed: {:?}", e);
        }
    }
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_keys(ctx);
        self.advance();
        self.render();

        ctx.request_repaint();

        egui::CentralPanel::default()
            .frame(egui::Frame::default().fill(egui::Color32::from_rgb(10, 10, 10)))
            .show(ctx, |ui| {
                let pitch = LED_SIZE + LED_GAP;
                let (response, painter) = ui.allocate_painter(
                    egui::vec2(ui.available_width(), pitch + LED_GAP),
                    egui::Sense::hover(),
                );
                let origin = response.rect.min;

                for (i, pixel) in self.strip.pixels().iter().enumerate() {
                    let x = origin.x + LED_GAP + i as f32 * pitch;
                    let rect = egui::Rect::from_min_size(
                        egui::pos2(x, origin.y + LED_GAP),
                        egui::vec2(LED_SIZE, LED_SIZE),
                    );
                    let color = egui::Color32::from_rgb(pixel.r, pixel.g, pixel.b);
                    painter.rect_filled(rect, LED_SIZE / 4.0, color);
                }

                ui.add_space(8.0);
                ui.label(format!("Pattern: {}", self.tag().as_str()));
                ui.label(format!(
                    "Speed: {:.2}x{}",
                    self.speed,
                    if self.playing { "" } else { " (paused)" }
                ));
                ui.label("Space: pause | Left/Right: speed | Up/Down: change pattern");
            });
    }
}
