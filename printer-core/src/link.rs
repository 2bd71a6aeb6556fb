//! Link-Monitor - überwacht die Verbindung und steuert den Hold
//!
//! Läuft etwa einmal pro Sekunde. Ist der Link weg, wird der Hold gesetzt
//! (Renderer zeigt die Fehlerfarbe) und die Status-Anzeige ausgeschaltet.
//! Bleibt der Link weg, blinkt die Status-Anzeige bei jedem weiteren Check.
//! Kommt der Link zurück, wird der Hold gelöst; Pattern und Animations-Uhr
//! laufen unverändert weiter.

use crate::context::PrinterContext;
use crate::traits::StatusIndicator;

/// Ergebnis eines Link-Checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkCheck {
    /// Link getrennt, Hold aktiv
    Down,
    /// Link wieder da, Hold gerade gelöst
    Restored,
    /// Link steht, Frames seit dem letzten Check
    Healthy { frames: u32 },
}

/// Einziger Schreiber von Hold-Flag und Status-Anzeige
pub struct LinkMonitor<I: StatusIndicator> {
    indicator: I,
}

impl<I: StatusIndicator> LinkMonitor<I> {
    pub fn new(indicator: I) -> Self {
        Self { indicator }
    }

    pub fn indicator(&self) -> &I {
        &self.indicator
    }

    pub fn check(&mut self, ctx: &mut PrinterContext) -> LinkCheck {
        if !ctx.link_up() {
            if ctx.hold_engaged() {
                // Weiterhin getrennt: Status-LED blinkt im Check-Takt
                self.indicator.toggle();
            } else {
                warn!("Link: Connection lost, holding render output");
                ctx.set_hold(true);
                self.indicator.set_off();
            }
            return LinkCheck::Down;
        }

        if ctx.hold_engaged() {
            info!("Link: Connection up, resuming render output");
            ctx.set_hold(false);
            self.indicator.set_on();
            return LinkCheck::Restored;
        }

        let frames = ctx.take_frames();
        let telemetry = ctx.telemetry();
        info!(
            "Link: Frames: {} Pattern: {} Job: {} Progress: {} Light: {} Stage: {}",
            frames,
            ctx.active_tag().as_str(),
            telemetry.job_state().as_str(),
            telemetry.progress_percent(),
            telemetry.chamber_light_on(),
            telemetry.stage()
        );
        LinkCheck::Healthy { frames }
    }
}
