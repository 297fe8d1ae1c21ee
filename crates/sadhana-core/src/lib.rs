//! # Sadhana Core Library
//!
//! This library provides the practice-tracking logic behind the Sadhana
//! screens. Every engine is plain data plus transition methods; the host
//! (the CLI here, or any UI) owns rendering and the passage of time.
//!
//! ## Architecture
//!
//! - **Round Counter**: A mala bead counter that carries into a round tally
//!   whenever the target is reached
//! - **Countdown Timer**: A tick-driven meditation timer state machine that
//!   requires the caller to invoke `tick()` once per second while running
//! - **Calendar**: Month grid and upcoming-observance helpers
//! - **Library**: Mantra search, category filters and favorites
//! - **Progress**: Percentages and banding for practice goals
//!
//! ## Key Components
//!
//! - [`RoundCounter`]: Mala counter
//! - [`CountdownTimer`]: Meditation timer state machine
//! - [`Event`]: Returned by every counter/timer transition
//! - [`Config`]: User preferences

pub mod calendar;
pub mod config;
pub mod counter;
pub mod error;
pub mod events;
pub mod library;
pub mod progress;
pub mod timer;

pub use calendar::{MonthGrid, Observance, ObservanceKind};
pub use config::{Config, Sound};
pub use counter::{CounterCommand, RoundCounter, RoundCounterState};
pub use error::{ConfigError, CoreError, ValidationError};
pub use events::Event;
pub use library::{Category, CategoryFilter, Favorites, Mantra};
pub use progress::{Goal, ProgressBand};
pub use timer::{CountdownTimer, CountdownTimerState, TimerCommand, TimerPhase};
