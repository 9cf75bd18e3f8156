//! Monthly PILA social-security cut-off dates.
//!
//! Given a taxpayer ID (NIT), a visit window, a labor calendar and the table
//! mapping NIT suffixes to a number of business days, [`compute_cutoff_dates`]
//! produces the payment due dates that fall inside the window.

mod calendar;
pub mod config;
mod consts;
mod cutoff;
mod dataset;
mod limits;
mod nit;
mod prelude;
mod schedule;
mod status;
#[cfg(test)]
mod test_utils;
mod types;
mod window;

pub use calendar::{CalendarDay, DayKind, LaborCalendar};
pub use consts::*;
pub use cutoff::{CutoffDate, CutoffError, CutoffStatus, compute_cutoff_dates, cutoff_dates};
pub use dataset::{DatasetError, load_calendar, load_limits, read_calendar, read_limits};
pub use limits::{LimitTable, SocialSecurityLimit};
pub use nit::{Nit, NitSuffix};
pub use schedule::{PilaSchedule, ScheduleError, SolicitudRecord};
pub use status::{days_until, refresh_statuses, status_for};
pub use types::{BusinessDays, Day, Month, Year};
pub use window::{VisitWindow, WindowError};

use crate::prelude::*;
use chrono::{Datelike, NaiveDate};
use std::str::FromStr;

/// A timezone-naive calendar date.
///
/// Displays (and serializes) day-first as `DD/MM/YYYY`, the format used by
/// the calendar dataset and by cut-off dates on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{}/{}/{}", day, month, year)]
pub struct PilaDate {
    year:  Year,
    month: Month,
    day:   Day,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be 1-{})", "_0", MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { day: u8, month: u8, year: u16 },
    #[display(fmt = "Invalid business-day count: {} (must be 1-{})", "_0", MAX_BUSINESS_DAYS)]
    InvalidBusinessDays(u8),
    #[display(fmt = "Invalid NIT: {_0:?} (expected at least {} digits)", NIT_SUFFIX_LEN)]
    InvalidNit(String),
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

impl PilaDate {
    pub const fn new(year: Year, month: Month, day: Day) -> Self {
        Self { year, month, day }
    }

    /// Builds a date from raw components, validating each of them.
    ///
    /// # Errors
    /// Returns the `ParseError` of the first invalid component.
    pub fn from_ymd(year: u16, month: u8, day: u8) -> Result<Self, ParseError> {
        let year = Year::new(year)?;
        let month = Month::new(month)?;
        let day = Day::new(day, year, month)?;
        Ok(Self { year, month, day })
    }

    pub const fn year(&self) -> Year {
        self.year
    }

    pub const fn month(&self) -> Month {
        self.month
    }

    pub const fn day(&self) -> Day {
        self.day
    }

    /// The first day of this date's month
    pub const fn first_of_month(&self) -> Self {
        Self {
            year:  self.year,
            month: self.month,
            day:   Day::first(),
        }
    }

    /// The first day of the following month, or `None` past `MAX_YEAR`.
    pub fn next_month_start(&self) -> Option<Self> {
        let (month, rolled) = self.month.succ();
        let year = if rolled {
            Year::new(self.year.get().checked_add(1)?).ok()?
        } else {
            self.year
        };
        Some(Self {
            year,
            month,
            day: Day::first(),
        })
    }

    /// The following calendar day, or `None` past `MAX_YEAR`.
    pub fn next_day(&self) -> Option<Self> {
        match Day::new(self.day.get() + 1, self.year, self.month) {
            Ok(day) => Some(Self { day, ..*self }),
            // roll to first of next month
            Err(_) => self.next_month_start(),
        }
    }

    /// Whether both dates fall in the same calendar month
    pub fn same_month(&self, other: &Self) -> bool {
        self.year == other.year && self.month == other.month
    }

    /// Long Spanish month label, e.g. `julio de 2025`
    pub fn month_label(&self) -> String {
        format!("{} de {}", self.month.name_es(), self.year.get())
    }

    /// Days elapsed since 1970-01-01 (negative before it).
    pub const fn days_since_epoch(&self) -> i64 {
        days_from_civil(self.year.get(), self.month.get(), self.day.get())
    }

    /// Signed number of calendar days from `self` to `other`.
    pub const fn days_to(&self, other: &Self) -> i64 {
        other.days_since_epoch() - self.days_since_epoch()
    }

    /// Today's date on the local clock.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear` or `ParseError::InvalidFormat` when
    /// the clock reports a year outside `1..=MAX_YEAR`, as the `NaiveDate`
    /// conversion does.
    pub fn today() -> Result<Self, ParseError> {
        Self::try_from(chrono::Local::now().date_naive())
    }
}

/// Days since the Unix epoch for a proleptic Gregorian date.
const fn days_from_civil(year: u16, month: u8, day: u8) -> i64 {
    let y = if month <= FEBRUARY {
        year as i64 - 1
    } else {
        year as i64
    };
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    // March-based month index so the leap day lands at the end of the year
    let mp = (month as i64 + 9) % 12;
    let doy = (153 * mp + 2) / 5 + day as i64 - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Fails with `ParseError::InvalidYear` for year 0 or a year in
/// `MAX_YEAR + 1..=u16::MAX`, and with `ParseError::InvalidFormat` for a
/// negative year or one beyond `u16::MAX`.
impl TryFrom<NaiveDate> for PilaDate {
    type Error = ParseError;

    fn try_from(value: NaiveDate) -> Result<Self, Self::Error> {
        let year = u16::try_from(value.year())
            .map_err(|_| ParseError::InvalidFormat(value.to_string()))?;
        // chrono guarantees month in 1..=12 and day in 1..=31
        Self::from_ymd(year, value.month() as u8, value.day() as u8)
    }
}

impl FromStr for PilaDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        // A trailing time component is dropped without any timezone handling
        let date_part = trimmed
            .split_once(TIME_SEPARATORS)
            .map_or(trimmed, |(date, _)| date);

        let has_hyphen = date_part.contains(DATE_SEPARATOR);
        let has_slash = date_part.contains(DAY_FIRST_SEPARATOR);

        match (has_hyphen, has_slash) {
            (true, true) => Err(ParseError::InvalidFormat(format!(
                "Mixed delimiters ({DATE_SEPARATOR} and {DAY_FIRST_SEPARATOR}): {trimmed}"
            ))),
            (true, false) => {
                // ISO: YYYY-MM-DD
                let parts = split_parts(date_part, DATE_SEPARATOR)?;
                let [year, month, day] = parts;
                Self::from_ymd(parse_u16(year)?, parse_u8(month)?, parse_u8(day)?)
            }
            (false, true) => {
                // Day-first: DD/MM/YYYY
                let parts = split_parts(date_part, DAY_FIRST_SEPARATOR)?;
                let [day, month, year] = parts;
                Self::from_ymd(parse_u16(year)?, parse_u8(month)?, parse_u8(day)?)
            }
            (false, false) => Err(ParseError::InvalidFormat(trimmed.to_owned())),
        }
    }
}

fn split_parts(s: &str, separator: char) -> Result<[&str; 3], ParseError> {
    let parts: Vec<&str> = s.split(separator).map(str::trim).collect();
    <[&str; 3]>::try_from(parts.as_slice()).map_err(|_| {
        ParseError::InvalidFormat(format!(
            "Expected 2 {separator} separators, found {}: {s}",
            parts.len() - 1
        ))
    })
}

fn parse_u16(s: &str) -> Result<u16, ParseError> {
    s.parse::<u16>()
        .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
}

fn parse_u8(s: &str) -> Result<u8, ParseError> {
    s.parse::<u8>()
        .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
}

impl serde::Serialize for PilaDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for PilaDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
