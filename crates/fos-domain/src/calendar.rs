//! Calendar arithmetic for Monday-start weeks and month clamping.
//!
//! Every function here is pure and total over valid [`NaiveDate`] values.
//! Textual dates enter the system only through [`parse_date`], which rejects
//! anything that is not a strict `YYYY-MM-DD` calendar day.

use std::fmt;

use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Storage and exchange format for calendar days.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive Monday..=Sunday span.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct WeekRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl WeekRange {
    /// Returns the week that contains `date`.
    pub fn containing(date: NaiveDate) -> Self {
        let start = week_start(date);
        Self {
            start,
            end: start + Duration::days(6),
        }
    }

    /// Builds the seven-day span that begins on `start`.
    ///
    /// Callers are expected to pass a Monday; no normalisation happens here.
    pub fn starting(start: NaiveDate) -> Self {
        Self {
            start,
            end: start + Duration::days(6),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Returns the week `weeks` weeks before this one, or `None` when that
    /// falls outside the representable calendar.
    pub fn previous(&self, weeks: u32) -> Option<Self> {
        let offset = Duration::try_weeks(i64::from(weeks))?;
        Some(Self {
            start: self.start.checked_sub_signed(offset)?,
            end: self.end.checked_sub_signed(offset)?,
        })
    }
}

impl fmt::Display for WeekRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", format_date(self.start), format_date(self.end))
    }
}

/// Returns the Monday of the ISO week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let delta = date.weekday().num_days_from_monday() as i64;
    date - Duration::days(delta)
}

/// Returns the Sunday of the ISO week containing `date`.
pub fn week_end(date: NaiveDate) -> NaiveDate {
    let remaining = 6 - date.weekday().num_days_from_monday() as i64;
    date + Duration::days(remaining)
}

/// Week boundaries for `reference`, or for the local calendar day when absent.
pub fn current_week_range(reference: Option<NaiveDate>) -> WeekRange {
    let today = reference.unwrap_or_else(|| Local::now().date_naive());
    WeekRange::containing(today)
}

/// True when `week_start <= date <= week_start + 6`.
pub fn is_in_week(date: NaiveDate, week_start: NaiveDate) -> bool {
    WeekRange::starting(week_start).contains(date)
}

pub fn is_monday(date: NaiveDate) -> bool {
    date.weekday() == Weekday::Mon
}

/// Parses a strict `YYYY-MM-DD` calendar day.
pub fn parse_date(raw: &str) -> Result<NaiveDate, DateParseError> {
    let trimmed = raw.trim();
    // chrono accepts unpadded fields; the storage boundary does not.
    if trimmed.len() != 10 {
        return Err(DateParseError::new(raw));
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| DateParseError::new(raw))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Number of days in the given month; `None` for an invalid month or a year
/// outside chrono's range.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    (28..=31)
        .rev()
        .find(|&day| NaiveDate::from_ymd_opt(year, month, day).is_some())
}

/// Places `day` inside the month, clamping to its last day when the month is shorter.
pub fn clamp_to_month(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let day = day.clamp(1, days_in_month(year, month)?);
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Error returned when a textual date is not a valid `YYYY-MM-DD` calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateParseError {
    input: String,
}

impl DateParseError {
    fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for DateParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid date `{}` (expected YYYY-MM-DD)", self.input)
    }
}

impl std::error::Error for DateParseError {}
