mod clock;
mod command;
mod engine;

pub use clock::{
    format_clock, minutes_to_secs, DEFAULT_DURATION_MIN, MAX_DURATION_MIN, PRESET_MINUTES,
};
pub use command::{ParseCommandError, TimerCommand};
pub use engine::{CountdownTimer, CountdownTimerState, TimerPhase};
