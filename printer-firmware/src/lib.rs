// Library-Root: Firmware-Module für den Drucker-Status-Strip
// Keine Standard-Bibliothek (Embedded System)
#![no_std]

// Module
pub mod config;
pub mod hal;
pub mod tasks;

// Re-exports von printer-core
pub use printer_core::{
    LedError, LedStrip, LinkCheck, LinkMonitor, PatternTag, PingSchedule, PrinterContext,
    RenderConfig, Renderer, StatusIndicator, TickOutput,
};

use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::NoopRawMutex;

// ============================================================================
// Geteilter Zustand
// ============================================================================
//
// Alle Tasks laufen auf demselben Executor (kein Preemption zwischen Tasks),
// daher reicht NoopRawMutex. Zugriffe sind kurz und enthalten kein `.await`.
//
// - MQTT Task:          schreibt Telemetrie + Link-Status
// - Link-Monitor Task:  setzt/löst den Hold
// - Render Task:        liest alles, schreibt aktives Pattern + Frame-Zähler

/// PrinterContext hinter einem Blocking-Mutex
pub type SharedContext = Mutex<NoopRawMutex, RefCell<PrinterContext>>;

/// Erstellt einen neuen geteilten Kontext (Hold aktiv, Link down)
pub fn shared_context() -> SharedContext {
    Mutex::new(RefCell::new(PrinterContext::new()))
}
