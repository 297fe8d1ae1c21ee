//! Percentage helpers shared by the counter, the timer and practice goals.

use serde::{Deserialize, Serialize};

/// `current / target` as a percentage, capped at 100. A zero target yields 0.
pub fn progress_pct(current: u64, target: u64) -> f64 {
    if target == 0 {
        return 0.0;
    }
    (current as f64 / target as f64 * 100.0).min(100.0)
}

/// Coarse bucket used to colour a progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressBand {
    Low,
    Medium,
    High,
    Complete,
}

impl ProgressBand {
    pub fn from_pct(pct: f64) -> Self {
        if pct >= 100.0 {
            ProgressBand::Complete
        } else if pct >= 75.0 {
            ProgressBand::High
        } else if pct >= 50.0 {
            ProgressBand::Medium
        } else {
            ProgressBand::Low
        }
    }
}

/// A weekly practice goal, e.g. 285 of 420 minutes of meditation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub current: u64,
    pub target: u64,
    pub unit: String,
}

impl Goal {
    pub fn new(current: u64, target: u64, unit: impl Into<String>) -> Self {
        Self {
            current,
            target,
            unit: unit.into(),
        }
    }

    pub fn pct(&self) -> f64 {
        progress_pct(self.current, self.target)
    }

    pub fn band(&self) -> ProgressBand {
        ProgressBand::from_pct(self.pct())
    }

    /// Rounded percentage, as shown next to the bar.
    pub fn display_pct(&self) -> u32 {
        self.pct().round() as u32
    }
}
