use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Six Sunday-first weeks, enough to show any month in full.
pub const GRID_DAYS: usize = 42;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// English name for a 1-based month, or `None` outside 1..=12.
pub fn month_name(month: u32) -> Option<&'static str> {
    let index = usize::try_from(month.checked_sub(1)?).ok()?;
    MONTH_NAMES.get(index).copied()
}

/// Move `delta` months forward (or back, if negative) from `year`/`month`.
pub fn shift_month(year: i32, month: u32, delta: i32) -> Result<(i32, u32), ValidationError> {
    if !(1..=12).contains(&month) {
        return Err(ValidationError::InvalidMonth { month });
    }
    let index = i64::from(year) * 12 + i64::from(month - 1) + i64::from(delta);
    let new_year = i32::try_from(index.div_euclid(12)).map_err(|_| ValidationError::InvalidDate {
        year,
        month,
        day: 1,
    })?;
    let new_month = index.rem_euclid(12) as u32 + 1;
    Ok((new_year, new_month))
}

/// The dates displayed for one month: 42 consecutive days starting on the
/// Sunday on or before the 1st.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub days: Vec<NaiveDate>,
}

impl MonthGrid {
    pub fn new(year: i32, month: u32) -> Result<Self, ValidationError> {
        if !(1..=12).contains(&month) {
            return Err(ValidationError::InvalidMonth { month });
        }
        let invalid = || ValidationError::InvalidDate {
            year,
            month,
            day: 1,
        };
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let lead = u64::from(first.weekday().num_days_from_sunday());
        let start = first
            .checked_sub_days(Days::new(lead))
            .ok_or_else(invalid)?;

        let days = start.iter_days().take(GRID_DAYS).collect::<Vec<_>>();
        if days.len() != GRID_DAYS {
            return Err(invalid());
        }

        Ok(Self { year, month, days })
    }

    /// Whether `date` belongs to the displayed month rather than the
    /// spill-over days before or after it.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn weeks(&self) -> impl Iterator<Item = &[NaiveDate]> {
        self.days.chunks(7)
    }

    pub fn title(&self) -> String {
        format!("{} {}", month_name(self.month).unwrap_or_default(), self.year)
    }

    pub fn previous(&self) -> Result<Self, ValidationError> {
        let (year, month) = shift_month(self.year, self.month, -1)?;
        Self::new(year, month)
    }

    pub fn next(&self) -> Result<Self, ValidationError> {
        let (year, month) = shift_month(self.year, self.month, 1)?;
        Self::new(year, month)
    }
}
