//! Renderer - treibt das aktive Pattern und schreibt auf den LED-Strip
//!
//! Pro Tick: Pattern auswählen, Animation fortschreiben, Farben schreiben.
//! Einheitliche Patterns (`all_same`) werden nur geschrieben, wenn sich
//! die Farbe gegenüber der zuletzt geschriebenen geändert hat.

use rgb::RGB8;

use crate::config::RenderConfig;
use crate::context::PrinterContext;
use crate::logic::select;
use crate::pattern::{Pattern, PatternTag};
use crate::traits::{LedError, LedStrip};

/// Was ein Tick auf den Strip geschrieben hat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutput {
    /// Frame geschrieben und geflusht
    Written,
    /// Farbe unverändert, kein Hardware-Zugriff
    Skipped,
    /// Schreiben fehlgeschlagen
    Failed(LedError),
}

/// Renderer mit exklusivem Besitz des Strips und des aktiven Patterns
pub struct Renderer<L: LedStrip> {
    strip: L,
    config: RenderConfig,
    tag: PatternTag,
    active: Option<Pattern>,
    /// Farbe, die vermutlich an Position 0 steht (None = unbekannt)
    resident: Option<RGB8>,
}

impl<L: LedStrip> Renderer<L> {
    /// `config.led_count` wird an die Länge des Strips angepasst
    pub fn new(strip: L, config: RenderConfig) -> Self {
        let config = config.with_led_count(strip.len());
        Self {
            strip,
            config,
            tag: PatternTag::Off,
            active: None,
            resident: None,
        }
    }

    pub fn strip(&self) -> &L {
        &self.strip
    }

    pub fn strip_mut(&mut self) -> &mut L {
        &mut self.strip
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn active_tag(&self) -> PatternTag {
        self.tag
    }

    pub fn active_pattern(&self) -> Option<&Pattern> {
        self.active.as_ref()
    }

    /// Ein Render-Tick
    ///
    /// `elapsed_secs` sind die Sekunden seit Prozessstart. Bei aktivem Hold
    /// wird statt des Patterns die Fehlerfarbe gezeigt, Auswahl und
    /// Animation ruhen dann.
    pub fn tick(&mut self, ctx: &mut PrinterContext, elapsed_secs: f64) -> TickOutput {
        if ctx.hold_engaged() {
            return self.write_uniform(self.config.fault_color);
        }
        ctx.count_frame();

        let selection = select(ctx.telemetry(), self.tag);
        if selection.changed {
            info!(
                "Render: Pattern changed {} -> {}",
                self.tag.as_str(),
                selection.tag.as_str()
            );
            self.tag = selection.tag;
            self.active = selection.tag.build(&self.config);
            ctx.set_active_tag(selection.tag);
        }

        let Some(pattern) = self.active.as_mut() else {
            let off = self.config.off_color;
            return self.write_frame(move |_| off);
        };
        pattern.update(elapsed_secs, ctx.telemetry().progress_fraction());
        let pattern = *pattern;

        if pattern.all_same() {
            self.write_uniform(pattern.color_at(0))
        } else {
            self.write_frame(|pos| pattern.color_at(pos))
        }
    }

    /// Einheitliche Farbe, nur bei Änderung gegenüber Position 0
    fn write_uniform(&mut self, color: RGB8) -> TickOutput {
        if self.resident == Some(color) {
            return TickOutput::Skipped;
        }
        self.write_frame(move |_| color)
    }

    /// Alle Positionen setzen, einmal flushen
    fn write_frame(&mut self, color_at: impl Fn(usize) -> RGB8) -> TickOutput {
        let result = (0..self.config.led_count)
            .try_for_each(|pos| self.strip.set(pos, color_at(pos)))
            .and_then(|()| self.strip.flush());

        match result {
            Ok(()) => {
                self.resident = (self.config.led_count > 0).then(|| color_at(0));
                TickOutput::Written
            }
            Err(e) => {
                error!("Render: Failed to write LED strip: {}", e);
                self.resident = None;
                TickOutput::Failed(e)
            }
        }
    }
}
