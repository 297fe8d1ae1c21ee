mod engine;

pub use engine::{CounterCommand, RoundCounter, RoundCounterState, DEFAULT_TARGET};
