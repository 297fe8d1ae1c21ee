use std::path::PathBuf;

use chrono::{Datelike, Local, NaiveDate};
use clap::Subcommand;
use sadhana_core::calendar::{days_until, upcoming, UPCOMING_WINDOW_DAYS};
use sadhana_core::{MonthGrid, Observance};
use serde_json::json;

#[derive(Subcommand)]
pub enum CalendarAction {
    /// Print the six-week grid for a month
    Month {
        /// Year (default: current year)
        #[arg(long)]
        year: Option<i32>,
        /// Month 1-12 (default: current month)
        #[arg(long)]
        month: Option<u32>,
        /// Months to move from the selected month (e.g. -1 for previous)
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        offset: i32,
    },
    /// List observances from a JSON file that fall in the coming days
    Upcoming {
        /// JSON array of {date, name, kind, description}
        #[arg(long)]
        file: PathBuf,
        /// Reference date, YYYY-MM-DD (default: today)
        #[arg(long)]
        today: Option<NaiveDate>,
        /// Window length in days
        #[arg(long, default_value_t = UPCOMING_WINDOW_DAYS)]
        days: u64,
    },
}

pub fn run(action: CalendarAction) -> Result<(), Box<dyn std::error::Error>> {
    let today = Local::now().date_naive();

    match action {
        CalendarAction::Month {
            year,
            month,
            offset,
        } => {
            let (year, month) = sadhana_core::calendar::shift_month(
                year.unwrap_or(today.year()),
                month.unwrap_or(today.month()),
                offset,
            )?;
            let grid = MonthGrid::new(year, month)?;
            let weeks: Vec<_> = grid
                .weeks()
                .map(|week| {
                    week.iter()
                        .map(|d| {
                            json!({
                                "date": d,
                                "inMonth": grid.contains(*d),
                                "today": *d == today,
                            })
                        })
                        .collect::<Vec<_>>()
                })
                .collect();
            let out = json!({
                "title": grid.title(),
                "year": grid.year,
                "month": grid.month,
                "weeks": weeks,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        CalendarAction::Upcoming {
            file,
            today: reference,
            days,
        } => {
            let reference = reference.unwrap_or(today);
            let content = std::fs::read_to_string(&file)?;
            let observances: Vec<Observance> = serde_json::from_str(&content)?;

            let list: Vec<_> = upcoming(&observances, reference, days)
                .into_iter()
                .map(|o| {
                    json!({
                        "date": o.date,
                        "name": o.name,
                        "kind": o.kind,
                        "description": o.description,
                        "daysUntil": days_until(reference, o.date),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&list)?);
        }
    }
    Ok(())
}
