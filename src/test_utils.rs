// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons and other common test helpers.
//!
//! This module re-exports the `approx` crate's assertion macros for float comparison,
//! which properly handle floating-point precision issues that `assert_eq!` cannot.

// Re-export approx macros for convenient use in tests
pub use approx::assert_abs_diff_eq;

use crate::celebration::{Celebration, CelebrationEmitter, CelebrationKind};
use std::sync::{Arc, Mutex};

/// Emitter that keeps every burst for later inspection.
///
/// Clones share the same record, so a test can hand one clone to the
/// presentation and assert on the other.
#[derive(Debug, Clone, Default)]
pub struct RecordingEmitter {
    bursts: Arc<Mutex<Vec<Celebration>>>,
}

impl RecordingEmitter {
    pub fn bursts(&self) -> Vec<Celebration> {
        self.bursts.lock().map(|b| b.clone()).unwrap_or_default()
    }

    pub fn kinds(&self) -> Vec<CelebrationKind> {
        self.bursts().iter().map(|b| b.kind).collect()
    }
}

impl CelebrationEmitter for RecordingEmitter {
    fn emit(&self, celebration: &Celebration) {
        if let Ok(mut bursts) = self.bursts.lock() {
            bursts.push(*celebration);
        }
    }
}
