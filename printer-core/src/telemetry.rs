//! Telemetrie-Zustand des Druckers
//!
//! Hält den zuletzt bekannten Status (Last-Known-Value). Eingehende
//! Reports werden als partielles Update angewendet: Felder, die im Report
//! fehlen, behalten ihren alten Wert.

use heapless::Vec;

/// Maximale Anzahl gespeicherter Fehler-Codes
pub const MAX_FAULT_CODES: usize = 16;

/// Job-Zustand wie vom Drucker gemeldet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobState {
    #[default]
    Idle,
    Running,
    Paused,
    Finishing,
    Preparing,
    Failed,
    /// Jeder nicht erkannte Wire-Wert
    Unknown,
}

impl JobState {
    /// Bildet den Wire-String (`gcode_state`) auf einen Zustand ab
    pub fn from_wire(value: &str) -> Self {
        match value {
            "IDLE" => Self::Idle,
            "RUNNING" => Self::Running,
            "PAUSE" => Self::Paused,
            "FINISH" => Self::Finishing,
            "PREPARE" => Self::Preparing,
            "FAILED" => Self::Failed,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Running => "Running",
            Self::Paused => "Paused",
            Self::Finishing => "Finishing",
            Self::Preparing => "Preparing",
            Self::Failed => "Failed",
            Self::Unknown => "Unknown",
        }
    }
}

/// Opaker Fehler-Code (HMS-Eintrag des Druckers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FaultCode {
    pub attr: u32,
    pub code: u32,
}

/// Liste aktiver Fehler-Codes
pub type FaultCodes = Vec<FaultCode, MAX_FAULT_CODES>;

/// Partielles Telemetrie-Update
///
/// `None` bedeutet "nicht im Report enthalten oder nicht lesbar" -
/// in beiden Fällen bleibt der bisherige Wert erhalten.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TelemetryUpdate {
    pub fault_codes: Option<FaultCodes>,
    pub chamber_light_on: Option<bool>,
    pub job_state: Option<JobState>,
    pub progress_percent: Option<i32>,
    pub stage: Option<i32>,
}

impl TelemetryUpdate {
    /// true wenn das Update kein einziges Feld enthält
    pub fn is_empty(&self) -> bool {
        self.fault_codes.is_none()
            && self.chamber_light_on.is_none()
            && self.job_state.is_none()
            && self.progress_percent.is_none()
            && self.stage.is_none()
    }
}

/// Zuletzt bekannter Drucker-Status
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TelemetryState {
    active_fault_codes: FaultCodes,
    job_state: JobState,
    progress_percent: i32,
    stage: i32,
    chamber_light_on: bool,
}

impl TelemetryState {
    /// Leerer Zustand beim Start: keine Fehler, Idle, Licht aus
    pub fn new() -> Self {
        Self::default()
    }

    /// Übernimmt alle im Update vorhandenen Felder
    pub fn apply(&mut self, update: &TelemetryUpdate) {
        if let Some(codes) = &update.fault_codes {
            self.active_fault_codes.clone_from(codes);
        }
        if let Some(on) = update.chamber_light_on {
            self.chamber_light_on = on;
        }
        if let Some(state) = update.job_state {
            self.job_state = state;
        }
        if let Some(progress) = update.progress_percent {
            self.progress_percent = progress;
        }
        if let Some(stage) = update.stage {
            self.stage = stage;
        }
    }

    pub fn active_fault_codes(&self) -> &[FaultCode] {
        &self.active_fault_codes
    }

    pub fn has_faults(&self) -> bool {
        !self.active_fault_codes.is_empty()
    }

    pub fn job_state(&self) -> JobState {
        self.job_state
    }

    /// Fortschritt in Prozent, beim Lesen auf 0..=100 begrenzt
    pub fn progress_percent(&self) -> u8 {
        // clamp garantiert 0..=100
        self.progress_percent.clamp(0, 100) as u8
    }

    /// Fortschritt als Anteil in [0, 1]
    pub fn progress_fraction(&self) -> f32 {
        f32::from(self.progress_percent()) / 100.0
    }

    pub fn stage(&self) -> i32 {
        self.stage
    }

    pub fn chamber_light_on(&self) -> bool {
        self.chamber_light_on
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for JobState {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}", self.as_str())
    }
}
