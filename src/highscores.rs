//! Local best-score record
//!
//! The original stores a single float under one storage key; this is that
//! record as a value type, with the persistence backend kept behind the
//! `platform::ScoreStore` boundary.

use serde::{Deserialize, Serialize};

use crate::sim::SessionOutcome;

/// Best survival time achieved on this device
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BestScore {
    /// Seconds; 0.0 means no run recorded yet
    pub survival_secs: f32,
}

impl BestScore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an outcome; returns true when it strictly beats the best
    pub fn submit(&mut self, outcome: &SessionOutcome) -> bool {
        if outcome.survival_time > self.survival_secs {
            self.survival_secs = outcome.survival_time;
            true
        } else {
            false
        }
    }

    /// Display form, tenths of a second ("42.5s")
    pub fn display(&self) -> String {
        format!("{:.1}s", self.survival_secs)
    }
}
