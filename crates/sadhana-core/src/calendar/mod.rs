//! Month grid and observance helpers for the practice calendar.
//!
//! Nothing here reads the clock; "today" always comes from the host.

mod grid;
mod observance;

pub use grid::{month_name, shift_month, MonthGrid, GRID_DAYS};
pub use observance::{days_until, upcoming, Observance, ObservanceKind, UPCOMING_WINDOW_DAYS};
