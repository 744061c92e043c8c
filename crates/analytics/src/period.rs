use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The rolling time windows reported alongside the overall totals.
///
/// Every window is evaluated against the same filtered ledger and a reference
/// `today`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Today,
    Yesterday,
    #[serde(rename = "last_7_days")]
    Last7Days,
    CurrentMonth,
}

impl Period {
    pub const ALL: [Period; 4] = [
        Period::Today,
        Period::Yesterday,
        Period::Last7Days,
        Period::CurrentMonth,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Period::Today => "Today",
            Period::Yesterday => "Yesterday",
            Period::Last7Days => "Last 7 days",
            Period::CurrentMonth => "Month",
        }
    }

    /// Whether a bet dated `date` falls into this window.
    ///
    /// The 7-day and month windows have no upper bound, so bets dated after
    /// `today` are counted in them.
    pub fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            Period::Today => date == today,
            Period::Yesterday => date == today - Duration::days(1),
            Period::Last7Days => date >= today - Duration::days(6),
            Period::CurrentMonth => date >= first_of_month(today),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}
