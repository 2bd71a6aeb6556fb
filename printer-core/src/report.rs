//! Decoder für Drucker-Reports (JSON)
//!
//! Der Drucker published auf `device/<serial>/report` JSON-Objekte der Form
//! `{"print": {...}}`. Nur der `print`-Teil ist relevant, alles andere wird
//! ignoriert. Jedes Feld wird einzeln gelesen: ein kaputtes Feld wird
//! übersprungen, ohne die anderen zu blockieren.

use serde::Deserialize;
use serde_json::Value;

use crate::telemetry::{FaultCode, FaultCodes, JobState, TelemetryUpdate};

/// Fehler beim Lesen eines Reports - die Nachricht wird verworfen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportError {
    /// Kein gültiges JSON bzw. falsche Struktur
    Malformed,
    /// JSON ohne `print`-Objekt (z.B. Antworten auf andere Kommandos)
    NoPrintSection,
}

#[derive(Deserialize)]
struct Report {
    print: Option<PrintSection>,
}

/// Nur die benötigten Felder - unbekannte werden von serde übersprungen
#[derive(Deserialize)]
struct PrintSection {
    hms: Option<Value>,
    lights_report: Option<Value>,
    gcode_state: Option<Value>,
    mc_percent: Option<Value>,
    stg_cur: Option<Value>,
}

/// Liest einen Report und liefert das enthaltene partielle Update
///
/// # Beispiele
///
/// ```
/// # use printer_core::{parse_report, JobState};
/// let update = parse_report(br#"{"print":{"gcode_state":"RUNNING","mc_percent":42}}"#).unwrap();
/// assert_eq!(update.job_state, Some(JobState::Running));
/// assert_eq!(update.progress_percent, Some(42));
/// assert_eq!(update.stage, None);
/// ```
pub fn parse_report(payload: &[u8]) -> Result<TelemetryUpdate, ReportError> {
    let report: Report = serde_json::from_slice(payload).map_err(|_| ReportError::Malformed)?;
    let print = report.print.ok_or(ReportError::NoPrintSection)?;

    Ok(TelemetryUpdate {
        fault_codes: print.hms.as_ref().and_then(fault_codes),
        chamber_light_on: print.lights_report.as_ref().and_then(chamber_light),
        job_state: print
            .gcode_state
            .as_ref()
            .and_then(Value::as_str)
            .map(JobState::from_wire),
        progress_percent: print.mc_percent.as_ref().and_then(integer),
        stage: print.stg_cur.as_ref().and_then(integer),
    })
}

/// Ganzzahl aus Zahl, Float oder numerischem String
fn integer(value: &Value) -> Option<i32> {
    match value {
        Value::Number(number) => {
            if let Some(v) = number.as_i64() {
                i32::try_from(v).ok()
            } else {
                // Nachkommastellen werden abgeschnitten (55.9 -> 55)
                let v = libm::trunc(number.as_f64()?);
                let in_range = v >= f64::from(i32::MIN) && v <= f64::from(i32::MAX);
                in_range.then_some(v as i32)
            }
        }
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// `lights_report[0].mode`: "on" heißt an, jeder andere String aus
fn chamber_light(value: &Value) -> Option<bool> {
    let mode = value.as_array()?.first()?.get("mode")?.as_str()?;
    Some(mode == "on")
}

/// Jeder HMS-Eintrag zählt als Fehler, auch wenn attr/code unlesbar sind
fn fault_codes(value: &Value) -> Option<FaultCodes> {
    let entries = value.as_array()?;
    let mut codes = FaultCodes::new();
    for entry in entries {
        let field = |name: &str| {
            entry
                .get(name)
                .and_then(Value::as_u64)
                .and_then(|v| u32::try_from(v).ok())
                .unwrap_or_default()
        };
        let code = FaultCode {
            attr: field("attr"),
            code: field("code"),
        };
        if codes.push(code).is_err() {
            warn!("Report: more than {} fault codes, truncating", codes.capacity());
            break;
        }
    }
    Some(codes)
}

#[cfg(feature = "defmt")]
impl defmt::Format for ReportError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            ReportError::Malformed => defmt::write!(fmt, "malformed report"),
            ReportError::NoPrintSection => defmt::write!(fmt, "no print section"),
        }
    }
}
