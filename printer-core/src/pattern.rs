//! Pattern-Varianten und ihre Animations-Mathematik
//!
//! Jede Variante berechnet eine Farbe pro Position aus der Animations-Uhr
//! (Sekunden) und dem Druck-Fortschritt. Die Parameter hängen am
//! jeweiligen Enum-Arm, der gemeinsame Zustand (Uhr, Fortschritt) an
//! [`Pattern`].

use core::f64::consts::PI;

use rgb::RGB8;

use crate::config::{DEFAULT_PERIOD_SECS, RenderConfig};

/// Tag der aktiven Variante
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PatternTag {
    /// Kein Pattern - Strip aus
    #[default]
    Off,
    Idle,
    Error,
    Finish,
    Prepare,
    Progress,
    Paused,
}

impl PatternTag {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Off => "None",
            Self::Idle => "Idle",
            Self::Error => "Error",
            Self::Finish => "Finish",
            Self::Prepare => "Prepare",
            Self::Progress => "Progress",
            Self::Paused => "Paused",
        }
    }

    /// Erstellt eine frische Instanz (Uhr und Fortschritt auf 0)
    ///
    /// `Off` hat keine Instanz und liefert `None`.
    pub fn build(self, config: &RenderConfig) -> Option<Pattern> {
        let breathe = |color| Breathe::new(color, config.period_secs, config.gamma);
        let bar = |reached| ProgressBar::new(config.unreached_color, reached, config.led_count);

        let kind = match self {
            Self::Off => return None,
            Self::Idle => PatternKind::Idle(breathe(config.idle_color)),
            Self::Error => PatternKind::Error(breathe(config.error_color)),
            Self::Finish => PatternKind::Finish(breathe(config.finish_color)),
            Self::Prepare => PatternKind::Prepare(breathe(config.prepare_color)),
            Self::Progress => PatternKind::Progress(bar(config.progress_color)),
            Self::Paused => PatternKind::Paused(bar(config.paused_color)),
        };
        Some(Pattern::new(kind))
    }
}

/// Einheitliche Farbe mit sinusförmiger Helligkeit ("Atmen")
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breathe {
    base_color: RGB8,
    period: f64,
    gamma: f64,
}

impl Breathe {
    /// Ungültige Parameter werden ersetzt: Periode -> 2 s, Gamma -> 1
    pub fn new(base_color: RGB8, period: f64, gamma: f64) -> Self {
        let period = if period.is_finite() && period > 0.0 {
            period
        } else {
            DEFAULT_PERIOD_SECS
        };
        let gamma = if gamma.is_finite() && gamma > 0.0 {
            gamma
        } else {
            1.0
        };
        Self {
            base_color,
            period,
            gamma,
        }
    }

    pub fn base_color(&self) -> RGB8 {
        self.base_color
    }

    pub fn period(&self) -> f64 {
        self.period
    }

    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Helligkeit in [0, 1] zum Zeitpunkt `clock` (Sekunden)
    pub fn brightness(&self, clock: f64) -> f64 {
        // Reduktion auf eine Periode hält die Phase auch nach Tagen Laufzeit genau
        let t = libm::fmod(clock, self.period);
        let phase = 2.0 * PI * t / self.period;
        let raw = (libm::sin(phase) + 1.0) / 2.0;

        #[allow(clippy::float_cmp)]
        let brightness = if self.gamma != 1.0 {
            libm::pow(raw, 1.0 / self.gamma)
        } else {
            raw
        };
        brightness.clamp(0.0, 1.0)
    }

    pub fn color(&self, clock: f64) -> RGB8 {
        let b = self.brightness(clock);
        let scale = |c: u8| libm::round(f64::from(c) * b).clamp(0.0, 255.0) as u8;
        RGB8 {
            r: scale(self.base_color.r),
            g: scale(self.base_color.g),
            b: scale(self.base_color.b),
        }
    }
}

/// Fortschrittsbalken über den ganzen Strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressBar {
    unreached_color: RGB8,
    reached_color: RGB8,
    led_count: usize,
}

impl ProgressBar {
    pub fn new(unreached_color: RGB8, reached_color: RGB8, led_count: usize) -> Self {
        Self {
            unreached_color,
            reached_color,
            led_count,
        }
    }

    pub fn led_count(&self) -> usize {
        self.led_count
    }

    /// Index der Grenz-LED und Anteil, zu dem sie erreicht ist
    pub fn split(&self, progress: f32) -> (usize, f32) {
        let position = progress * self.led_count as f32;
        let index = libm::floorf(position);
        // progress liegt in [0, 1], position ist also nie negativ
        (index as usize, position - index)
    }

    /// Weicher Übergang an der Grenz-LED (Progress)
    pub fn blended(&self, progress: f32, pos: usize) -> RGB8 {
        let (index, frac) = self.split(progress);
        if pos < index {
            self.reached_color
        } else if pos == index {
            lerp(self.unreached_color, self.reached_color, frac)
        } else {
            self.unreached_color
        }
    }

    /// Harte Stufe ohne Übergang (Paused)
    pub fn stepped(&self, progress: f32, pos: usize) -> RGB8 {
        let (index, _) = self.split(progress);
        if pos < index {
            self.reached_color
        } else {
            self.unreached_color
        }
    }
}

/// Lineare Interpolation pro Kanal, Nachkommastellen werden abgeschnitten
fn lerp(from: RGB8, to: RGB8, t: f32) -> RGB8 {
    let mix = |a: u8, b: u8| {
        let a = f32::from(a);
        (a + (f32::from(b) - a) * t) as u8
    };
    RGB8 {
        r: mix(from.r, to.r),
        g: mix(from.g, to.g),
        b: mix(from.b, to.b),
    }
}

/// Varianten mit ihren Parametern
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PatternKind {
    Idle(Breathe),
    Error(Breathe),
    Finish(Breathe),
    Prepare(Breathe),
    Progress(ProgressBar),
    Paused(ProgressBar),
}

/// Aktive Pattern-Instanz
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pattern {
    kind: PatternKind,
    clock: f64,
    progress: f32,
}

impl Pattern {
    pub fn new(kind: PatternKind) -> Self {
        Self {
            kind,
            clock: 0.0,
            progress: 0.0,
        }
    }

    pub fn kind(&self) -> &PatternKind {
        &self.kind
    }

    pub fn tag(&self) -> PatternTag {
        match self.kind {
            PatternKind::Idle(_) => PatternTag::Idle,
            PatternKind::Error(_) => PatternTag::Error,
            PatternKind::Finish(_) => PatternTag::Finish,
            PatternKind::Prepare(_) => PatternTag::Prepare,
            PatternKind::Progress(_) => PatternTag::Progress,
            PatternKind::Paused(_) => PatternTag::Paused,
        }
    }

    pub fn animation_clock(&self) -> f64 {
        self.clock
    }

    pub fn progress_fraction(&self) -> f32 {
        self.progress
    }

    /// Speichert Uhr und Fortschritt
    ///
    /// Nicht-endliche Werte werden still verworfen, der alte Wert bleibt.
    pub fn update(&mut self, elapsed_secs: f64, progress: f32) {
        if elapsed_secs.is_finite() {
            self.clock = elapsed_secs;
        }
        if progress.is_finite() {
            self.progress = progress.clamp(0.0, 1.0);
        }
    }

    /// true wenn alle Positionen im aktuellen Tick dieselbe Farbe haben
    pub fn all_same(&self) -> bool {
        matches!(
            self.kind,
            PatternKind::Idle(_)
                | PatternKind::Error(_)
                | PatternKind::Finish(_)
                | PatternKind::Prepare(_)
        )
    }

    /// Farbe an Position `pos`
    pub fn color_at(&self, pos: usize) -> RGB8 {
        match &self.kind {
            PatternKind::Idle(breathe)
            | PatternKind::Error(breathe)
            | PatternKind::Finish(breathe)
            | PatternKind::Prepare(breathe) => breathe.color(self.clock),
            PatternKind::Progress(bar) => bar.blended(self.progress, pos),
            PatternKind::Paused(bar) => bar.stepped(self.progress, pos),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PatternTag {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BLUE, GREEN, ORANGE, RED, WHITE};

    const EPSILON: f64 = 1e-9;

    fn breathe() -> Breathe {
        Breathe::new(BLUE, 2.0, 2.2)
    }

    #[test]
    fn test_brightness_known_points() {
        let b = Breathe::new(RED, 2.0, 1.0);
        // sin(0) = 0 -> raw 0.5
        assert!((b.brightness(0.0) - 0.5).abs() < EPSILON);
        // Viertel-Periode: Maximum
        assert!((b.brightness(0.5) - 1.0).abs() < EPSILON);
        // Dreiviertel-Periode: Minimum
        assert!(b.brightness(1.5).abs() < EPSILON);
    }

    #[test]
    fn test_brightness_gamma_curve() {
        let b = breathe();
        assert_eq!(b.gamma(), 2.2);
        let expected = libm::pow(0.5, 1.0 / 2.2);
        assert!((b.brightness(0.0) - expected).abs() < EPSILON);
    }

    #[test]
    fn test_brightness_periodic() {
        let b = breathe();
        for i in 0..200 {
            let t = f64::from(i) * 0.037;
            let diff = (b.brightness(t) - b.brightness(t + b.period())).abs();
            assert!(diff < 1e-6, "t = {}", t);
        }
    }

    #[test]
    fn test_brightness_bounded() {
        let b = breathe();
        for i in -500..500 {
            let t = f64::from(i) * 0.013 + 1000.0 * f64::from(i);
            let value = b.brightness(t);
            assert!((0.0..=1.0).contains(&value), "t = {}", t);
        }
    }

    #[test]
    fn test_invalid_parameters_fall_back() {
        let b = Breathe::new(RED, 0.0, -1.0);
        assert_eq!(b.period(), 2.0);
        assert_eq!(b.gamma(), 1.0);

        let b = Breathe::new(RED, f64::NAN, f64::INFINITY);
        assert_eq!(b.period(), 2.0);
        assert_eq!(b.gamma(), 1.0);
    }

    #[test]
    fn test_breathe_color_at_peak() {
        let b = Breathe::new(ORANGE, 2.0, 2.2);
        assert_eq!(b.color(0.5), ORANGE);
        assert_eq!(b.color(1.5), RGB8 { r: 0, g: 0, b: 0 });
    }

    #[test]
    fn test_progress_boundary() {
        let bar = ProgressBar::new(WHITE, GREEN, 10);
        assert_eq!(bar.split(0.25), (2, 0.5));
        assert_eq!(bar.blended(0.25, 1), GREEN);
        assert_eq!(bar.blended(0.25, 2), RGB8 { r: 127, g: 255, b: 127 });
        assert_eq!(bar.blended(0.25, 3), WHITE);
    }

    #[test]
    fn test_paused_hard_step() {
        let bar = ProgressBar::new(WHITE, ORANGE, 10);
        assert_eq!(bar.stepped(0.25, 1), ORANGE);
        assert_eq!(bar.stepped(0.25, 2), WHITE);
        assert_eq!(bar.stepped(0.25, 3), WHITE);
    }

    #[test]
    fn test_progress_full_and_empty() {
        let bar = ProgressBar::new(WHITE, GREEN, 10);
        assert!((0..10).all(|pos| bar.blended(1.0, pos) == GREEN));
        assert_eq!(bar.blended(0.0, 0), WHITE);
        assert!((0..10).all(|pos| bar.stepped(0.0, pos) == WHITE));
    }

    #[test]
    fn test_update_clamps_progress() {
        let mut pattern = PatternTag::Progress.build(&RenderConfig::default()).unwrap();
        pattern.update(1.0, 1.7);
        assert_eq!(pattern.progress_fraction(), 1.0);
        pattern.update(2.0, -0.3);
        assert_eq!(pattern.progress_fraction(), 0.0);
    }

    #[test]
    fn test_update_rejects_non_finite() {
        let mut pattern = PatternTag::Idle.build(&RenderConfig::default()).unwrap();
        pattern.update(3.5, 0.4);

        pattern.update(f64::NAN, f32::INFINITY);
        assert_eq!(pattern.animation_clock(), 3.5);
        assert_eq!(pattern.progress_fraction(), 0.4);

        // Ein ungültiger Wert blockiert den anderen nicht
        pattern.update(4.0, f32::NAN);
        assert_eq!(pattern.animation_clock(), 4.0);
        assert_eq!(pattern.progress_fraction(), 0.4);
    }

    #[test]
    fn test_build_off_has_no_instance() {
        assert!(PatternTag::Off.build(&RenderConfig::default()).is_none());
    }

    #[test]
    fn test_build_tags_round_trip() {
        let config = RenderConfig::default();
        for tag in [
            PatternTag::Idle,
            PatternTag::Error,
            PatternTag::Finish,
            PatternTag::Prepare,
            PatternTag::Progress,
            PatternTag::Paused,
        ] {
            let pattern = tag.build(&config).unwrap();
            assert_eq!(pattern.tag(), tag);
        }
    }

    #[test]
    fn test_all_same_per_family() {
        let config = RenderConfig::default();
        assert!(PatternTag::Error.build(&config).unwrap().all_same());
        assert!(PatternTag::Prepare.build(&config).unwrap().all_same());
        assert!(!PatternTag::Progress.build(&config).unwrap().all_same());
        assert!(!PatternTag::Paused.build(&config).unwrap().all_same());
    }
}
