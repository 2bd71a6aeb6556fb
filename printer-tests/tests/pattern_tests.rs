//! Integration Tests für die Pattern-Varianten
//!
//! Eigenschaften der Animations-Mathematik über die öffentliche API

use printer_core::{PatternKind, PatternTag, RenderConfig};
use rgb::RGB8;

fn build(tag: PatternTag, led_count: usize) -> printer_core::Pattern {
    let config = RenderConfig::default().with_led_count(led_count);
    tag.build(&config).unwrap()
}

// ============================================================================
// Tests: Breathing-Familie
// ============================================================================

#[test]
fn test_breathing_defaults() {
    let expected = [
        (PatternTag::Idle, RGB8 { r: 0, g: 0, b: 255 }),
        (PatternTag::Error, RGB8 { r: 255, g: 0, b: 0 }),
        (PatternTag::Finish, RGB8 { r: 0, g: 255, b: 0 }),
        (PatternTag::Prepare, RGB8 { r: 255, g: 165, b: 0 }),
    ];
    for (tag, color) in expected {
        let pattern = build(tag, 8);
        let (PatternKind::Idle(breathe)
        | PatternKind::Error(breathe)
        | PatternKind::Finish(breathe)
        | PatternKind::Prepare(breathe)) = pattern.kind()
        else {
            panic!("Expected breathing variant for {:?}", tag);
        };
        assert_eq!(breathe.base_color(), color);
        assert_eq!(breathe.period(), 2.0);
        assert_eq!(breathe.gamma(), 2.2);
    }
}

#[test]
fn test_breathing_uniform_across_strip() {
    let mut pattern = build(PatternTag::Prepare, 30);
    for step in 0..40 {
        pattern.update(f64::from(step) * 0.05, 0.0);
        let first = pattern.color_at(0);
        assert!((1..30).all(|pos| pattern.color_at(pos) == first));
    }
}

#[test]
fn test_breathing_periodic_colors() {
    let mut a = build(PatternTag::Error, 1);
    let mut b = build(PatternTag::Error, 1);
    for step in 0..100 {
        let t = f64::from(step) * 0.071 + 0.003;
        a.update(t, 0.0);
        b.update(t + 2.0, 0.0);
        let (ca, cb) = (a.color_at(0), b.color_at(0));
        // Rundung kann an Grenzwerten um 1 kippen
        assert!(ca.r.abs_diff(cb.r) <= 1, "t = {}", t);
    }
}

// ============================================================================
// Tests: Sweep-Familie
// ============================================================================

#[test]
fn test_progress_boundary_midpoint() {
    let mut pattern = build(PatternTag::Progress, 10);
    pattern.update(0.0, 0.25);

    let reached = RGB8 { r: 0, g: 255, b: 0 };
    let unreached = RGB8 {
        r: 255,
        g: 255,
        b: 255,
    };
    assert_eq!(pattern.color_at(1), reached);
    assert_eq!(pattern.color_at(2), RGB8 { r: 127, g: 255, b: 127 });
    assert_eq!(pattern.color_at(3), unreached);
}

#[test]
fn test_paused_uses_orange_step() {
    let mut pattern = build(PatternTag::Paused, 10);
    pattern.update(0.0, 0.25);

    let orange = RGB8 { r: 255, g: 165, b: 0 };
    let white = RGB8 {
        r: 255,
        g: 255,
        b: 255,
    };
    assert_eq!(pattern.color_at(0), orange);
    assert_eq!(pattern.color_at(1), orange);
    assert_eq!(pattern.color_at(2), white);
    assert!(!pattern.all_same());
}

#[test]
fn test_progress_count_grows_monotonic() {
    let mut pattern = build(PatternTag::Progress, 64);
    let green = RGB8 { r: 0, g: 255, b: 0 };
    let mut last = 0;
    for percent in 0..=100u8 {
        pattern.update(0.0, f32::from(percent) / 100.0);
        let reached = (0..64).filter(|&pos| pattern.color_at(pos) == green).count();
        assert!(reached >= last, "percent = {}", percent);
        last = reached;
    }
    assert_eq!(last, 64);
}
