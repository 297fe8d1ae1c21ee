pub mod calendar;
pub mod config;
pub mod library;
pub mod mala;
pub mod timer;
