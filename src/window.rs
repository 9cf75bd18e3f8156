use std::iter;

use serde::{Deserialize, Serialize};

use crate::{ParseError, PilaDate, prelude::*};

/// A visit window: open at the start, closed at the end.
///
/// A cut-off date on the first day of the visit does not belong to it; one
/// on the last day does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "({start}, {end}]")]
pub struct VisitWindow {
    start: PilaDate,
    end:   PilaDate,
}

/// Error type for visit window validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WindowError {
    /// Start date is after end date.
    #[error("Invalid visit window: start ({start}) is after end ({end})")]
    Inverted { start: PilaDate, end: PilaDate },
}

impl VisitWindow {
    /// Builds a window without checking the order of its ends. An inverted
    /// window admits no date.
    pub const fn new(start: PilaDate, end: PilaDate) -> Self {
        Self { start, end }
    }

    /// Builds a window, rejecting `start > end`.
    ///
    /// # Errors
    /// Returns `WindowError::Inverted` if start > end.
    pub fn checked(start: PilaDate, end: PilaDate) -> Result<Self, WindowError> {
        if start > end {
            return Err(WindowError::Inverted { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parses both ends and builds an unchecked window.
    ///
    /// # Errors
    /// Returns the `ParseError` of the first malformed date.
    pub fn parse(start: &str, end: &str) -> Result<Self, ParseError> {
        Ok(Self::new(start.parse()?, end.parse()?))
    }

    pub const fn start(&self) -> PilaDate {
        self.start
    }

    pub const fn end(&self) -> PilaDate {
        self.end
    }

    /// `start < date <= end`
    pub fn admits(&self, date: &PilaDate) -> bool {
        self.start < *date && *date <= self.end
    }

    /// First day of every month from the start's month through the end's
    /// month, inclusive. Empty when the window is inverted across months.
    pub fn months(&self) -> impl Iterator<Item = PilaDate> {
        let last = self.end.first_of_month();
        iter::successors(Some(self.start.first_of_month()), PilaDate::next_month_start)
            .take_while(move |month| *month <= last)
    }
}
