//! Integration Tests für Report-Ingestion und Telemetrie-Zustand

use printer_core::{JobState, PatternTag, PrinterContext, ReportError, select};

// ============================================================================
// Tests: Partielles Merge
// ============================================================================

#[test]
fn test_partial_report_keeps_untouched_fields() {
    let mut ctx = PrinterContext::new();
    ctx.ingest(br#"{"print":{"gcode_state":"RUNNING","mc_percent":10,"stg_cur":0}}"#)
        .unwrap();
    ctx.ingest(br#"{"print":{"mc_percent":50}}"#).unwrap();

    let telemetry = ctx.telemetry();
    assert_eq!(telemetry.job_state(), JobState::Running);
    assert_eq!(telemetry.progress_percent(), 50);
    assert_eq!(telemetry.stage(), 0);
}

#[test]
fn test_light_survives_unrelated_reports() {
    let mut ctx = PrinterContext::new();
    ctx.ingest(br#"{"print":{"lights_report":[{"node":"chamber_light","mode":"on"}]}}"#)
        .unwrap();
    for percent in 0..5 {
        let payload = format!(r#"{{"print":{{"mc_percent":{}}}}}"#, percent);
        ctx.ingest(payload.as_bytes()).unwrap();
    }
    assert!(ctx.telemetry().chamber_light_on());
}

// ============================================================================
// Tests: Fehlerbehandlung
// ============================================================================

#[test]
fn test_malformed_payload_leaves_state_unchanged() {
    let mut ctx = PrinterContext::new();
    ctx.ingest(br#"{"print":{"gcode_state":"PAUSE","mc_percent":33}}"#)
        .unwrap();
    let before = ctx.telemetry().clone();

    assert_eq!(
        ctx.ingest(br#"{"print":{"gcode_state":"#),
        Err(ReportError::Malformed)
    );
    assert_eq!(
        ctx.ingest(br#"{"system":{"command":"ledctrl"}}"#),
        Err(ReportError::NoPrintSection)
    );
    assert_eq!(ctx.telemetry(), &before);
}

#[test]
fn test_bad_field_does_not_block_others() {
    let mut ctx = PrinterContext::new();
    ctx.ingest(br#"{"print":{"mc_percent":20}}"#).unwrap();
    ctx.ingest(br#"{"print":{"mc_percent":[1,2],"gcode_state":"FINISH","stg_cur":"x"}}"#)
        .unwrap();

    let telemetry = ctx.telemetry();
    assert_eq!(telemetry.progress_percent(), 20);
    assert_eq!(telemetry.job_state(), JobState::Finishing);
    assert_eq!(telemetry.stage(), 0);
}

// ============================================================================
// Tests: Report → Auswahl
// ============================================================================

#[test]
fn test_hms_report_selects_error() {
    let mut ctx = PrinterContext::new();
    ctx.ingest(br#"{"print":{"gcode_state":"RUNNING","stg_cur":0,"hms":[{"attr":1,"code":2}]}}"#)
        .unwrap();
    assert_eq!(select(ctx.telemetry(), PatternTag::Progress).tag, PatternTag::Error);

    ctx.ingest(br#"{"print":{"hms":[]}}"#).unwrap();
    assert_eq!(select(ctx.telemetry(), PatternTag::Error).tag, PatternTag::Progress);
}

#[test]
fn test_stage_report_selects_prepare() {
    let mut ctx = PrinterContext::new();
    ctx.ingest(br#"{"print":{"gcode_state":"RUNNING","stg_cur":2}}"#)
        .unwrap();
    assert_eq!(select(ctx.telemetry(), PatternTag::Off).tag, PatternTag::Prepare);
}

#[test]
fn test_paused_report_with_stage_selects_paused() {
    let mut ctx = PrinterContext::new();
    ctx.ingest(br#"{"print":{"gcode_state":"PAUSE","stg_cur":17,"mc_percent":40}}"#)
        .unwrap();
    assert_eq!(select(ctx.telemetry(), PatternTag::Progress).tag, PatternTag::Paused);
}

#[test]
fn test_idle_report_with_stage_turns_off() {
    let mut ctx = PrinterContext::new();
    ctx.ingest(br#"{"print":{"gcode_state":"IDLE","stg_cur":255,"lights_report":[{"mode":"off"}]}}"#)
        .unwrap();
    assert_eq!(select(ctx.telemetry(), PatternTag::Prepare).tag, PatternTag::Off);
}

#[test]
fn test_unknown_state_keeps_pattern() {
    let mut ctx = PrinterContext::new();
    ctx.ingest(br#"{"print":{"gcode_state":"SLICING"}}"#).unwrap();
    let selection = select(ctx.telemetry(), PatternTag::Finish);
    assert_eq!(selection.tag, PatternTag::Finish);
    assert!(!selection.changed);
}
