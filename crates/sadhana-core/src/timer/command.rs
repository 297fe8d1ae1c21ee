use std::str::FromStr;

use thiserror::Error;

/// Host input for the countdown timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    Start,
    Pause,
    Resume,
    Stop,
    Reset,
    SetDuration(u64),
    Tick,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown timer command: {0}")]
    Unknown(String),

    #[error("'duration' expects a whole number of seconds, got '{0}'")]
    InvalidDuration(String),
}

impl FromStr for TimerCommand {
    type Err = ParseCommandError;

    /// Parse one line of host input, e.g. `pause` or `duration 600`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let head = words.next().ok_or(ParseCommandError::Empty)?;

        match head.to_ascii_lowercase().as_str() {
            "start" => Ok(TimerCommand::Start),
            "pause" => Ok(TimerCommand::Pause),
            "resume" => Ok(TimerCommand::Resume),
            "stop" => Ok(TimerCommand::Stop),
            "reset" => Ok(TimerCommand::Reset),
            "tick" => Ok(TimerCommand::Tick),
            "duration" => {
                let arg = words.next().unwrap_or_default();
                arg.parse::<u64>()
                    .map(TimerCommand::SetDuration)
                    .map_err(|_| ParseCommandError::InvalidDuration(arg.to_string()))
            }
            other => Err(ParseCommandError::Unknown(other.to_string())),
        }
    }
}
