//! Printer Core - Platform-agnostic Pattern Engine
//!
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Sie definiert Traits, den Telemetrie-Zustand, die Pattern-Auswahl,
//! die Animations-Mathematik und den Renderer.

#![no_std]

#[cfg(feature = "json")]
extern crate alloc;

// Muss vor allen Modulen stehen, die die Log-Makros benutzen
#[macro_use]
mod fmt;

pub mod config;
pub mod context;
pub mod keepalive;
pub mod link;
pub mod logic;
pub mod pattern;
pub mod renderer;
#[cfg(feature = "json")]
pub mod report;
pub mod telemetry;
pub mod traits;

// Re-exports für einfachen Zugriff
pub use config::RenderConfig;
pub use context::PrinterContext;
pub use keepalive::PingSchedule;
pub use link::{LinkCheck, LinkMonitor};
pub use logic::{Selection, select};
pub use pattern::{Breathe, Pattern, PatternKind, PatternTag, ProgressBar};
pub use renderer::{Renderer, TickOutput};
#[cfg(feature = "json")]
pub use report::{ReportError, parse_report};
pub use telemetry::{FaultCode, FaultCodes, JobState, TelemetryState, TelemetryUpdate};
pub use traits::{LedError, LedStrip, StatusIndicator};

// RGB Farb-Typ (direkt von rgb crate)
pub use rgb::RGB8;
