use serde::{Deserialize, Serialize};

/// Every state change in the counter or timer produces an Event.
///
/// Events are plain return values. Hosts render them or log them; the core
/// never stores them and never attaches wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    BeadCounted {
        count: u32,
        total_count: u64,
    },
    /// The count reached the target and wrapped back to zero.
    RoundCompleted {
        rounds_completed: u64,
        total_count: u64,
    },
    TargetChanged {
        target: u32,
    },
    CounterReset {
        target: u32,
    },
    TimerStarted {
        duration_secs: u64,
    },
    TimerTicked {
        remaining_secs: u64,
    },
    TimerPaused {
        remaining_secs: u64,
    },
    TimerResumed {
        remaining_secs: u64,
    },
    /// Remaining time hit zero; ticking halts until reset or start.
    TimerCompleted {
        duration_secs: u64,
    },
    TimerReset {
        remaining_secs: u64,
    },
    DurationChanged {
        duration_secs: u64,
    },
}

impl Event {
    /// Whether this event ends a unit of practice (a round or a sitting).
    pub fn is_completion(&self) -> bool {
        matches!(
            self,
            Event::RoundCompleted { .. } | Event::TimerCompleted { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let json = serde_json::to_value(Event::TimerTicked { remaining_secs: 42 }).unwrap();
        assert_eq!(json["type"], "timer_ticked");
        assert_eq!(json["remaining_secs"], 42);
    }

    #[test]
    fn completion_events() {
        assert!(Event::TimerCompleted { duration_secs: 5 }.is_completion());
        assert!(Event::RoundCompleted {
            rounds_completed: 1,
            total_count: 108
        }
        .is_completion());
        assert!(!Event::BeadCounted {
            count: 1,
            total_count: 1
        }
        .is_completion());
    }
}
