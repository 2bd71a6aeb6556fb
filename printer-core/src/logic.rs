//! Pure Business Logic Functions
//!
//! Pattern-Auswahl ohne Hardware-Dependencies (testbar!)

use crate::pattern::PatternTag;
use crate::telemetry::{JobState, TelemetryState};

/// Ergebnis einer Pattern-Auswahl
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub tag: PatternTag,
    /// true wenn sich der Tag gegenüber dem aktiven geändert hat
    pub changed: bool,
}

/// Wählt das Pattern für den aktuellen Telemetrie-Stand
///
/// Die Regeln werden in fester Reihenfolge geprüft, die erste passende
/// gewinnt - unabhängig vom aktuell aktiven Pattern:
///
/// 1. Fehler-Codes vorhanden oder Job `Failed` → Error
/// 2. Job `Running` ohne Sub-Stage → Progress
/// 3. Job `Idle`, Kammerlicht an → Idle
/// 4. Job `Idle`, Kammerlicht aus → Off
/// 5. Job `Paused` → Paused
/// 6. Job `Finishing`, Kammerlicht an → Finish
/// 7. Sub-Stage aktiv oder Job `Preparing` → Prepare
/// 8. sonst bleibt `current` aktiv
///
/// Fehler-Codes überstimmen jeden anderen Zustand. Eine Stage != 0 führt nur
/// dann zu Prepare, wenn keine frühere Regel greift: ein pausierter Druck
/// bleibt Paused, ein Idle-Drucker folgt weiter dem Kammerlicht.
///
/// # Beispiele
///
/// ```
/// # use printer_core::{select, JobState, PatternTag, TelemetryState, TelemetryUpdate};
/// let mut telemetry = TelemetryState::new();
/// telemetry.apply(&TelemetryUpdate {
///     job_state: Some(JobState::Running),
///     stage: Some(0),
///     ..Default::default()
/// });
/// let selection = select(&telemetry, PatternTag::Idle);
/// assert_eq!(selection.tag, PatternTag::Progress);
/// assert!(selection.changed);
/// ```
pub fn select(telemetry: &TelemetryState, current: PatternTag) -> Selection {
    let tag = match_rule(telemetry).unwrap_or(current);
    Selection {
        tag,
        changed: tag != current,
    }
}

fn match_rule(telemetry: &TelemetryState) -> Option<PatternTag> {
    let job = telemetry.job_state();
    let stage = telemetry.stage();
    let light_on = telemetry.chamber_light_on();

    let tag = if telemetry.has_faults() || job == JobState::Failed {
        PatternTag::Error
    } else if job == JobState::Running && stage == 0 {
        PatternTag::Progress
    } else if job == JobState::Idle && light_on {
        PatternTag::Idle
    } else if job == JobState::Idle {
        PatternTag::Off
    } else if job == JobState::Paused {
        PatternTag::Paused
    } else if job == JobState::Finishing && light_on {
        PatternTag::Finish
    } else if stage != 0 || job == JobState::Preparing {
        PatternTag::Prepare
    } else {
        return None;
    };
    Some(tag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::{FaultCode, FaultCodes, TelemetryUpdate};

    const ALL_JOBS: [JobState; 7] = [
        JobState::Idle,
        JobState::Running,
        JobState::Paused,
        JobState::Finishing,
        JobState::Preparing,
        JobState::Failed,
        JobState::Unknown,
    ];

    const ALL_TAGS: [PatternTag; 7] = [
        PatternTag::Off,
        PatternTag::Idle,
        PatternTag::Error,
        PatternTag::Finish,
        PatternTag::Prepare,
        PatternTag::Progress,
        PatternTag::Paused,
    ];

    fn telemetry(job: JobState, stage: i32, light_on: bool, faulted: bool) -> TelemetryState {
        let mut fault_codes = FaultCodes::new();
        if faulted {
            fault_codes
                .push(FaultCode {
                    attr: 0x0300_0100,
                    code: 0x0001_0001,
                })
                .unwrap();
        }
        let mut state = TelemetryState::new();
        state.apply(&TelemetryUpdate {
            fault_codes: Some(fault_codes),
            chamber_light_on: Some(light_on),
            job_state: Some(job),
            progress_percent: Some(0),
            stage: Some(stage),
        });
        state
    }

    #[test]
    fn test_faults_always_select_error() {
        for job in ALL_JOBS {
            for stage in [0, 1, 14] {
                for light_on in [false, true] {
                    for current in ALL_TAGS {
                        let state = telemetry(job, stage, light_on, true);
                        assert_eq!(select(&state, current).tag, PatternTag::Error);
                    }
                }
            }
        }
    }

    #[test]
    fn test_failed_job_selects_error() {
        let state = telemetry(JobState::Failed, 0, false, false);
        assert_eq!(select(&state, PatternTag::Progress).tag, PatternTag::Error);
    }

    #[test]
    fn test_stage_forces_prepare() {
        // Zustände, die keine frühere Regel für sich beansprucht
        let cases = [
            (JobState::Running, true),
            (JobState::Running, false),
            (JobState::Finishing, false),
            (JobState::Preparing, true),
            (JobState::Preparing, false),
            (JobState::Unknown, true),
            (JobState::Unknown, false),
        ];
        for (job, light_on) in cases {
            for current in ALL_TAGS {
                let state = telemetry(job, 2, light_on, false);
                assert_eq!(select(&state, current).tag, PatternTag::Prepare);
            }
        }
    }

    #[test]
    fn test_paused_with_stage_stays_paused() {
        for stage in [16, 17] {
            let state = telemetry(JobState::Paused, stage, true, false);
            let selection = select(&state, PatternTag::Paused);
            assert_eq!(selection.tag, PatternTag::Paused);
            assert!(!selection.changed);
        }
    }

    #[test]
    fn test_idle_with_stage_follows_light() {
        let off = telemetry(JobState::Idle, 255, false, false);
        let on = telemetry(JobState::Idle, 255, true, false);
        assert_eq!(select(&off, PatternTag::Prepare).tag, PatternTag::Off);
        assert_eq!(select(&on, PatternTag::Prepare).tag, PatternTag::Idle);
    }

    #[test]
    fn test_finishing_with_light_and_stage_is_finish() {
        let state = telemetry(JobState::Finishing, 1, true, false);
        assert_eq!(select(&state, PatternTag::Progress).tag, PatternTag::Finish);
    }

    #[test]
    fn test_preparing_without_stage() {
        let state = telemetry(JobState::Preparing, 0, false, false);
        assert_eq!(select(&state, PatternTag::Off).tag, PatternTag::Prepare);
    }

    #[test]
    fn test_running_with_stage_is_prepare() {
        let state = telemetry(JobState::Running, 3, true, false);
        assert_eq!(select(&state, PatternTag::Progress).tag, PatternTag::Prepare);
    }

    #[test]
    fn test_running_without_stage_is_progress() {
        let state = telemetry(JobState::Running, 0, false, false);
        assert_eq!(select(&state, PatternTag::Off).tag, PatternTag::Progress);
    }

    #[test]
    fn test_idle_light_decides() {
        let on = telemetry(JobState::Idle, 0, true, false);
        let off = telemetry(JobState::Idle, 0, false, false);
        assert_eq!(select(&on, PatternTag::Off).tag, PatternTag::Idle);
        assert_eq!(select(&off, PatternTag::Idle).tag, PatternTag::Off);
    }

    #[test]
    fn test_finish_needs_light() {
        let on = telemetry(JobState::Finishing, 0, true, false);
        let off = telemetry(JobState::Finishing, 0, false, false);
        assert_eq!(select(&on, PatternTag::Progress).tag, PatternTag::Finish);

        // Keine Regel greift -> aktuelles Pattern bleibt
        let selection = select(&off, PatternTag::Progress);
        assert_eq!(selection.tag, PatternTag::Progress);
        assert!(!selection.changed);
    }

    #[test]
    fn test_unknown_job_retains_current() {
        let state = telemetry(JobState::Unknown, 0, true, false);
        for current in ALL_TAGS {
            let selection = select(&state, current);
            assert_eq!(selection.tag, current);
            assert!(!selection.changed);
        }
    }

    #[test]
    fn test_select_idempotent() {
        let state = telemetry(JobState::Paused, 0, true, false);
        let first = select(&state, PatternTag::Idle);
        assert!(first.changed);

        let second = select(&state, first.tag);
        let third = select(&state, second.tag);
        assert_eq!(second, Selection { tag: PatternTag::Paused, changed: false });
        assert_eq!(third, second);
    }
}
