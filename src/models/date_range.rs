//! Date range selection for filtering transactions
//!
//! A [`DateRangeType`] is what the user picks; [`DateRangeType::resolve`]
//! turns it into an inclusive [`DateRange`] relative to a given day.

use chrono::{Datelike, Duration, NaiveDate};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which period of transactions to show
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default, ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum DateRangeType {
    Today,
    ThisWeek,
    #[default]
    ThisMonth,
    ThisYear,
    Custom,
    All,
}

impl DateRangeType {
    pub const ALL: [DateRangeType; 6] = [
        Self::Today,
        Self::ThisWeek,
        Self::ThisMonth,
        Self::ThisYear,
        Self::Custom,
        Self::All,
    ];

    /// Resolve to an inclusive range. `All` has no range.
    ///
    /// `Custom` uses `custom` when set and falls back to the month containing
    /// `today` otherwise.
    pub fn resolve(
        &self,
        today: NaiveDate,
        first_day_of_week: u8,
        custom: Option<DateRange>,
    ) -> Option<DateRange> {
        match self {
            Self::Today => Some(DateRange::single_day(today)),
            Self::ThisWeek => Some(DateRange::week_of(today, first_day_of_week)),
            Self::ThisMonth => Some(DateRange::month_of(today)),
            Self::ThisYear => Some(DateRange::year_of(today)),
            Self::Custom => Some(custom.unwrap_or_else(|| DateRange::month_of(today))),
            Self::All => None,
        }
    }
}

impl fmt::Display for DateRangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Today => write!(f, "Today"),
            Self::ThisWeek => write!(f, "This Week"),
            Self::ThisMonth => write!(f, "This Month"),
            Self::ThisYear => write!(f, "This Year"),
            Self::Custom => write!(f, "Custom"),
            Self::All => write!(f, "All"),
        }
    }
}

/// Inclusive date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting `start > end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeParseError> {
        if start > end {
            return Err(DateRangeParseError::StartAfterEnd { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn single_day(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    /// The week containing `day`, starting on `first_day_of_week`
    /// (0 = Sunday, 1 = Monday, ...)
    pub fn week_of(day: NaiveDate, first_day_of_week: u8) -> Self {
        let first = u32::from(first_day_of_week % 7);
        let offset = (day.weekday().num_days_from_sunday() + 7 - first) % 7;
        let start = day - Duration::days(i64::from(offset));
        Self {
            start,
            end: start + Duration::days(6),
        }
    }

    pub fn month_of(day: NaiveDate) -> Self {
        let start = day.with_day(1).unwrap_or(day);
        let next_month = if day.month() == 12 {
            NaiveDate::from_ymd_opt(day.year() + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(day.year(), day.month() + 1, 1)
        };
        let end = next_month
            .map(|d| d - Duration::days(1))
            .unwrap_or(day);
        Self { start, end }
    }

    pub fn year_of(day: NaiveDate) -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(day.year(), 1, 1).unwrap_or(day),
            end: NaiveDate::from_ymd_opt(day.year(), 12, 31).unwrap_or(day),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of days covered, inclusive
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Parse `YYYY-MM-DD..YYYY-MM-DD`
    pub fn parse(s: &str) -> Result<Self, DateRangeParseError> {
        let (start, end) = s
            .split_once("..")
            .ok_or_else(|| DateRangeParseError::InvalidFormat(s.to_string()))?;
        let start = parse_date(start.trim())?;
        let end = parse_date(end.trim())?;
        Self::new(start, end)
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, DateRangeParseError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| DateRangeParseError::InvalidDate(s.to_string()))
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Error type for date range parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateRangeParseError {
    InvalidFormat(String),
    InvalidDate(String),
    StartAfterEnd { start: NaiveDate, end: NaiveDate },
}

impl fmt::Display for DateRangeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(s) => {
                write!(f, "Invalid date range '{}': expected START..END", s)
            }
            Self::InvalidDate(s) => write!(f, "Invalid date '{}': expected YYYY-MM-DD", s),
            Self::StartAfterEnd { start, end } => {
                write!(f, "Start date {} is after end date {}", start, end)
            }
        }
    }
}

impl std::error::Error for DateRangeParseError {}
