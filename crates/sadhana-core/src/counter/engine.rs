//! Mala round counter.
//!
//! Each tap adds one bead to the current round. When the count reaches the
//! target the round is carried: `rounds_completed` goes up and `count`
//! wraps to zero in the same call, so a snapshot never shows
//! `count >= target` after an increment.
//!
//! ```ignore
//! let mut mala = RoundCounter::new();
//! for _ in 0..108 {
//!     mala.increment();
//! }
//! assert_eq!(mala.rounds_completed(), 1);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::events::Event;
use crate::progress;

/// Beads on a traditional mala.
pub const DEFAULT_TARGET: u32 = 108;

/// Immutable view of the counter handed to the host for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundCounterState {
    pub count: u32,
    pub target: u32,
    pub total_count: u64,
    pub rounds_completed: u64,
}

/// Host input for the counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterCommand {
    Increment,
    SetTarget(u32),
    Reset,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundCounter {
    count: u32,
    target: u32,
    total_count: u64,
    rounds_completed: u64,
}

impl RoundCounter {
    pub fn new() -> Self {
        Self::with_target(DEFAULT_TARGET)
    }

    /// Create a counter with a custom target. A target of 0 becomes 1.
    pub fn with_target(target: u32) -> Self {
        Self {
            count: 0,
            target: target.max(1),
            total_count: 0,
            rounds_completed: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn rounds_completed(&self) -> u64 {
        self.rounds_completed
    }

    /// The round currently being chanted, starting at 1.
    pub fn current_round(&self) -> u64 {
        self.rounds_completed.saturating_add(1)
    }

    /// 0.0 .. 100.0 progress through the current round.
    pub fn progress_pct(&self) -> f64 {
        progress::progress_pct(u64::from(self.count), u64::from(self.target))
    }

    pub fn snapshot(&self) -> RoundCounterState {
        RoundCounterState {
            count: self.count,
            target: self.target,
            total_count: self.total_count,
            rounds_completed: self.rounds_completed,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn increment(&mut self) -> Event {
        self.count = self.count.saturating_add(1);
        self.total_count = self.total_count.saturating_add(1);

        // `>=` also covers a target lowered below the running count.
        if self.count >= self.target {
            self.count = 0;
            self.rounds_completed = self.rounds_completed.saturating_add(1);
            info!(
                rounds = self.rounds_completed,
                total = self.total_count,
                "mala round completed"
            );
            return Event::RoundCompleted {
                rounds_completed: self.rounds_completed,
                total_count: self.total_count,
            };
        }

        Event::BeadCounted {
            count: self.count,
            total_count: self.total_count,
        }
    }

    /// Change the round size. Does not touch `count`; a count at or above
    /// the new target completes on the next increment.
    pub fn set_target(&mut self, target: u32) -> Event {
        if target == 0 {
            debug!("target 0 clamped to 1");
        }
        self.target = target.max(1);
        Event::TargetChanged {
            target: self.target,
        }
    }

    /// Zero the tallies. The target is kept.
    pub fn reset(&mut self) -> Event {
        self.count = 0;
        self.total_count = 0;
        self.rounds_completed = 0;
        Event::CounterReset {
            target: self.target,
        }
    }

    pub fn apply(&mut self, command: CounterCommand) -> Event {
        match command {
            CounterCommand::Increment => self.increment(),
            CounterCommand::SetTarget(target) => self.set_target(target),
            CounterCommand::Reset => self.reset(),
        }
    }
}

impl Default for RoundCounter {
    fn default() -> Self {
        Self::new()
    }
}
