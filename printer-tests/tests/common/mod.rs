//! Gemeinsame Mocks für die Host-Tests
#![allow(dead_code)]

use printer_core::{LedError, LedStrip, StatusIndicator};
use rgb::RGB8;

// ============================================================================
// Mock LED Strip
// ============================================================================

pub struct MockLedStrip {
    /// Buffer (set() schreibt hier hinein)
    pub pixels: Vec<RGB8>,
    /// Zuletzt geflushter Frame (für Assertions in Tests)
    pub flushed: Vec<RGB8>,
    pub set_count: usize,
    pub flush_count: usize,
    /// Simuliere Fehler beim nächsten flush()
    pub fail_next_flush: bool,
}

impl MockLedStrip {
    pub fn new(len: usize) -> Self {
        Self {
            pixels: vec![RGB8::default(); len],
            flushed: Vec::new(),
            set_count: 0,
            flush_count: 0,
            fail_next_flush: false,
        }
    }
}

impl LedStrip for MockLedStrip {
    fn len(&self) -> usize {
        self.pixels.len()
    }

    fn set(&mut self, position: usize, color: RGB8) -> Result<(), LedError> {
        let pixel = self.pixels.get_mut(position).ok_or(LedError::OutOfRange)?;
        *pixel = color;
        self.set_count += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), LedError> {
        if self.fail_next_flush {
            self.fail_next_flush = false;
            return Err(LedError::WriteFailed);
        }
        self.flushed = self.pixels.clone();
        self.flush_count += 1;
        Ok(())
    }
}

// ============================================================================
// Mock Status Indicator
// ============================================================================

#[derive(Default)]
pub struct MockIndicator {
    pub on: Option<bool>,
    pub changes: usize,
}

impl StatusIndicator for MockIndicator {
    fn set_on(&mut self) {
        self.on = Some(true);
        self.changes += 1;
    }

    fn set_off(&mut self) {
        self.on = Some(false);
        self.changes += 1;
    }

    fn toggle(&mut self) {
        self.on = Some(!self.on.unwrap_or(false));
        self.changes += 1;
    }
}
