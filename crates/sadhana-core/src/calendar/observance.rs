use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// How far ahead the "upcoming" list looks by default.
pub const UPCOMING_WINDOW_DAYS: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObservanceKind {
    Festival,
    /// Full moon day
    Purnima,
    /// Eleventh lunar day, traditionally a fast
    Ekadashi,
    #[serde(other)]
    Other,
}

/// A dated religious observance supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observance {
    pub date: NaiveDate,
    pub name: String,
    pub kind: ObservanceKind,
    #[serde(default)]
    pub description: String,
}

/// Observances falling within `[today, today + window_days]`, earliest first.
pub fn upcoming(
    observances: &[Observance],
    today: NaiveDate,
    window_days: u64,
) -> Vec<&Observance> {
    let horizon = today
        .checked_add_days(Days::new(window_days))
        .unwrap_or(NaiveDate::MAX);

    let mut found: Vec<&Observance> = observances
        .iter()
        .filter(|o| o.date >= today && o.date <= horizon)
        .collect();
    found.sort_by_key(|o| o.date);
    found
}

/// Whole days from `today` to `date`; negative once the date has passed.
pub fn days_until(today: NaiveDate, date: NaiveDate) -> i64 {
    date.signed_duration_since(today).num_days()
}
