//! Gemeinsamer Zustand für Ingestion, Renderer und Link-Monitor
//!
//! Alle drei Pfade greifen über genau ein `PrinterContext` zu. In der
//! Firmware liegt er in einem `blocking_mutex::Mutex<NoopRawMutex, RefCell<_>>`,
//! jeder Task-Body läuft komplett innerhalb eines `lock()`.

use crate::pattern::PatternTag;
use crate::telemetry::{TelemetryState, TelemetryUpdate};

#[derive(Debug, Clone)]
pub struct PrinterContext {
    telemetry: TelemetryState,
    /// Nur vom Link-Monitor geschrieben
    hold: bool,
    /// Vom Transport (MQTT) gemeldeter Verbindungsstatus
    link_up: bool,
    /// Vom Renderer gespiegelt, für Status-Logs
    active_tag: PatternTag,
    /// Gerenderte Frames seit dem letzten Link-Check
    frames: u32,
}

impl Default for PrinterContext {
    fn default() -> Self {
        Self::new()
    }
}

impl PrinterContext {
    /// Startet mit aktivem Hold: gerendert wird erst, wenn der
    /// Link-Monitor eine Verbindung gesehen hat.
    pub fn new() -> Self {
        Self {
            telemetry: TelemetryState::new(),
            hold: true,
            link_up: false,
            active_tag: PatternTag::Off,
            frames: 0,
        }
    }

    pub fn telemetry(&self) -> &TelemetryState {
        &self.telemetry
    }

    /// Wendet ein partielles Telemetrie-Update an
    pub fn apply(&mut self, update: &TelemetryUpdate) {
        self.telemetry.apply(update);
    }

    /// Liest einen Report-Payload und wendet ihn an
    ///
    /// Unlesbare Payloads werden verworfen, der Zustand bleibt unverändert.
    #[cfg(feature = "json")]
    pub fn ingest(&mut self, payload: &[u8]) -> Result<(), crate::report::ReportError> {
        match crate::report::parse_report(payload) {
            Ok(update) => {
                debug!("Telemetry: applying report ({} bytes)", payload.len());
                self.apply(&update);
                Ok(())
            }
            Err(e) => {
                warn!("Telemetry: dropping report ({} bytes): {}", payload.len(), e);
                Err(e)
            }
        }
    }

    pub fn hold_engaged(&self) -> bool {
        self.hold
    }

    pub(crate) fn set_hold(&mut self, hold: bool) {
        self.hold = hold;
    }

    pub fn link_up(&self) -> bool {
        self.link_up
    }

    /// Vom Transport aufgerufen, wenn die Verbindung steht bzw. abreißt
    pub fn set_link_up(&mut self, up: bool) {
        self.link_up = up;
    }

    pub fn active_tag(&self) -> PatternTag {
        self.active_tag
    }

    pub(crate) fn set_active_tag(&mut self, tag: PatternTag) {
        self.active_tag = tag;
    }

    pub fn frames(&self) -> u32 {
        self.frames
    }

    pub(crate) fn count_frame(&mut self) {
        self.frames = self.frames.wrapping_add(1);
    }

    pub(crate) fn take_frames(&mut self) -> u32 {
        core::mem::take(&mut self.frames)
    }
}
