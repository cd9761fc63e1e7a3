//! Calendar dates and date windows.
//!
//! Dates travel through the system in the fixed-width `YYYY-MM-DD` form. Because
//! every component is zero padded, comparing two such strings
//! lexicographically gives the same answer as comparing the calendar dates.
//! [`IsoDate`] only accepts that exact form, so its `Ord` (calendar order) and
//! the ordering of its textual form always agree.

use super::InvalidIsoDate;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";
const ISO_DATE_LEN: usize = 10;

/// Calendar date restricted to the `YYYY-MM-DD` wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IsoDate(NaiveDate);

impl IsoDate {
    /// Parses a date in strict `YYYY-MM-DD` form.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidIsoDate`] when the value is not exactly ten
    /// characters of the form `dddd-dd-dd` or does not name a real calendar
    /// day.
    pub fn parse(value: &str) -> Result<Self, InvalidIsoDate> {
        if !has_iso_shape(value) {
            return Err(InvalidIsoDate(value.to_owned()));
        }
        NaiveDate::parse_from_str(value, ISO_DATE_FORMAT)
            .map(Self)
            .map_err(|_| InvalidIsoDate(value.to_owned()))
    }

    /// Wraps an existing calendar date.
    #[must_use]
    pub const fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Returns the wrapped calendar date.
    #[must_use]
    pub const fn as_naive(self) -> NaiveDate {
        self.0
    }

    /// Whole days from `today` until this date; negative once it has passed.
    #[must_use]
    pub fn days_until(self, today: Self) -> i64 {
        (self.0 - today.0).num_days()
    }

    /// Length in days of the inclusive range `start..=end`.
    #[must_use]
    pub fn days_between_inclusive(start: Self, end: Self) -> i64 {
        (end.0 - start.0).num_days() + 1
    }
}

fn has_iso_shape(value: &str) -> bool {
    value.len() == ISO_DATE_LEN
        && value.bytes().enumerate().all(|(position, byte)| match position {
            4 | 7 => byte == b'-',
            _ => byte.is_ascii_digit(),
        })
}

impl fmt::Display for IsoDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(ISO_DATE_FORMAT))
    }
}

impl FromStr for IsoDate {
    type Err = InvalidIsoDate;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for IsoDate {
    type Error = InvalidIsoDate;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for IsoDate {
    type Error = InvalidIsoDate;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<IsoDate> for String {
    fn from(value: IsoDate) -> Self {
        value.to_string()
    }
}

/// Inclusive date range bounding a phase, a project, or a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateWindow {
    start_date: IsoDate,
    end_date: IsoDate,
}

impl DateWindow {
    /// Creates a window without checking that `start_date <= end_date`.
    ///
    /// Range validity is a rule of the callers (see
    /// [`validate_sequence`](super::validate_sequence)); a window is only a
    /// pair of bounds.
    #[must_use]
    pub const fn new(start_date: IsoDate, end_date: IsoDate) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    /// Parses both bounds from `YYYY-MM-DD` strings.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidIsoDate`] for the first bound that fails to parse.
    pub fn parse(start_date: &str, end_date: &str) -> Result<Self, InvalidIsoDate> {
        Ok(Self::new(
            IsoDate::parse(start_date)?,
            IsoDate::parse(end_date)?,
        ))
    }

    /// Returns the first day of the window.
    #[must_use]
    pub const fn start_date(&self) -> IsoDate {
        self.start_date
    }

    /// Returns the last day of the window.
    #[must_use]
    pub const fn end_date(&self) -> IsoDate {
        self.end_date
    }

    /// Returns whether `date` falls inside the window, bounds included.
    #[must_use]
    pub fn contains(&self, date: IsoDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// Short relative label for a day offset, as shown next to due dates.
#[must_use]
pub fn relative_day_label(days: i64) -> String {
    match days {
        d if d < 0 => format!("{}d overdue", d.unsigned_abs()),
        0 => "Today".to_owned(),
        1 => "Tomorrow".to_owned(),
        d => format!("in {d}d"),
    }
}
