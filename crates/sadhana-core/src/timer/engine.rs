//! Meditation countdown engine.
//!
//! The engine is a tick-driven state machine. It has no internal thread and
//! never reads the clock: the host calls `tick()` once per elapsed second
//! while the phase is `Running`. Ticks delivered in any other phase are
//! ignored, which is what makes paused time free.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> (Paused <-> Running) -> Completed
//!   ^                                            |
//!   +---------------- stop / reset --------------+
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut timer = CountdownTimer::with_duration(5);
//! timer.start();
//! // Once per second, from the host:
//! timer.tick(); // Returns Some(Event::TimerCompleted) on the last second
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::clock::{minutes_to_secs, DEFAULT_DURATION_MIN, MAX_DURATION_MIN};
use super::command::TimerCommand;
use crate::events::Event;
use crate::progress;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    Idle,
    Running,
    Paused,
    /// Remaining time reached zero. Terminal until `start()` or `reset()`.
    Completed,
}

/// Immutable view of the timer handed to the host for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountdownTimerState {
    pub total_duration_seconds: u64,
    pub remaining_seconds: u64,
    pub phase: TimerPhase,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownTimer {
    phase: TimerPhase,
    total_secs: u64,
    remaining_secs: u64,
}

impl CountdownTimer {
    /// Create an idle timer with the default fifteen minute sitting.
    pub fn new() -> Self {
        Self::with_duration(minutes_to_secs(DEFAULT_DURATION_MIN))
    }

    /// Create an idle timer. A duration of 0 becomes 1 second.
    pub fn with_duration(secs: u64) -> Self {
        let total_secs = secs.max(1);
        Self {
            phase: TimerPhase::Idle,
            total_secs,
            remaining_secs: total_secs,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn total_secs(&self) -> u64 {
        self.total_secs
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.total_secs.saturating_sub(self.remaining_secs)
    }

    pub fn is_running(&self) -> bool {
        self.phase == TimerPhase::Running
    }

    /// 0.0 .. 100.0 of the sitting already elapsed.
    pub fn progress_pct(&self) -> f64 {
        progress::progress_pct(self.elapsed_secs(), self.total_secs)
    }

    pub fn status_label(&self) -> &'static str {
        match self.phase {
            TimerPhase::Idle => "Ready",
            TimerPhase::Running => "Meditating",
            TimerPhase::Paused => "Paused",
            TimerPhase::Completed => "Complete",
        }
    }

    pub fn snapshot(&self) -> CountdownTimerState {
        CountdownTimerState {
            total_duration_seconds: self.total_secs,
            remaining_seconds: self.remaining_secs,
            phase: self.phase,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        match self.phase {
            TimerPhase::Idle | TimerPhase::Completed => {
                // A completed timer sits at zero; start from the top.
                self.remaining_secs = self.total_secs;
                self.phase = TimerPhase::Running;
                Some(Event::TimerStarted {
                    duration_secs: self.total_secs,
                })
            }
            TimerPhase::Running | TimerPhase::Paused => self.ignored("start"),
        }
    }

    pub fn pause(&mut self) -> Option<Event> {
        match self.phase {
            TimerPhase::Running => {
                self.phase = TimerPhase::Paused;
                Some(Event::TimerPaused {
                    remaining_secs: self.remaining_secs,
                })
            }
            _ => self.ignored("pause"),
        }
    }

    pub fn resume(&mut self) -> Option<Event> {
        match self.phase {
            TimerPhase::Paused => {
                self.phase = TimerPhase::Running;
                Some(Event::TimerResumed {
                    remaining_secs: self.remaining_secs,
                })
            }
            _ => self.ignored("resume"),
        }
    }

    /// Same transition as [`reset`](Self::reset).
    pub fn stop(&mut self) -> Option<Event> {
        self.reset()
    }

    /// Return to `Idle` with the full duration remaining. Valid from any phase.
    pub fn reset(&mut self) -> Option<Event> {
        self.phase = TimerPhase::Idle;
        self.remaining_secs = self.total_secs;
        Some(Event::TimerReset {
            remaining_secs: self.remaining_secs,
        })
    }

    /// Only accepted while `Idle`. A duration of 0 becomes 1 second.
    pub fn set_duration(&mut self, secs: u64) -> Option<Event> {
        if self.phase != TimerPhase::Idle {
            return self.ignored("set_duration");
        }
        self.total_secs = secs.max(1);
        self.remaining_secs = self.total_secs;
        Some(Event::DurationChanged {
            duration_secs: self.total_secs,
        })
    }

    /// Minutes are clamped to the `1..=MAX_DURATION_MIN` slider range.
    pub fn set_duration_minutes(&mut self, minutes: u64) -> Option<Event> {
        self.set_duration(minutes_to_secs(minutes.clamp(1, MAX_DURATION_MIN)))
    }

    /// Advance by one second. Call once per elapsed second while running.
    ///
    /// Returns `Some(Event::TimerCompleted)` when the last second elapses.
    pub fn tick(&mut self) -> Option<Event> {
        if self.phase != TimerPhase::Running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.phase = TimerPhase::Completed;
            info!(duration_secs = self.total_secs, "meditation completed");
            return Some(Event::TimerCompleted {
                duration_secs: self.total_secs,
            });
        }
        Some(Event::TimerTicked {
            remaining_secs: self.remaining_secs,
        })
    }

    pub fn apply(&mut self, command: TimerCommand) -> Option<Event> {
        match command {
            TimerCommand::Start => self.start(),
            TimerCommand::Pause => self.pause(),
            TimerCommand::Resume => self.resume(),
            TimerCommand::Stop => self.stop(),
            TimerCommand::Reset => self.reset(),
            TimerCommand::SetDuration(secs) => self.set_duration(secs),
            TimerCommand::Tick => self.tick(),
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn ignored(&self, command: &str) -> Option<Event> {
        debug!(command, phase = ?self.phase, "timer command ignored");
        None
    }
}

impl Default for CountdownTimer {
    fn default() -> Self {
        Self::new()
    }
}
