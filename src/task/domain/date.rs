//! Calendar due dates in their eight-digit storage form.

use super::ParseTaskDateError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

const STORAGE_FORMAT: &str = "%Y%m%d";
const SEARCH_FORMAT: &str = "%d.%m.%Y";

/// Task due date without a time of day.
///
/// The wrapped date always has a year in `0..=9999`, so it prints as exactly
/// eight ASCII digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskDate(NaiveDate);

impl TaskDate {
    /// Parses a date in `YYYYMMDD` form.
    ///
    /// # Errors
    ///
    /// Returns [`ParseTaskDateError`] unless `value` is eight ASCII digits
    /// naming a real calendar day.
    pub fn parse(value: &str) -> Result<Self, ParseTaskDateError> {
        let is_eight_digits = value.len() == 8 && value.bytes().all(|byte| byte.is_ascii_digit());
        if !is_eight_digits {
            return Err(ParseTaskDateError(value.to_owned()));
        }

        NaiveDate::parse_from_str(value, STORAGE_FORMAT)
            .ok()
            .and_then(Self::from_naive)
            .ok_or_else(|| ParseTaskDateError(value.to_owned()))
    }

    /// Parses a date in the `DD.MM.YYYY` form used by search queries.
    ///
    /// Returns `None` when the value is not such a date.
    #[must_use]
    pub fn parse_search(value: &str) -> Option<Self> {
        NaiveDate::parse_from_str(value, SEARCH_FORMAT)
            .ok()
            .and_then(Self::from_naive)
    }

    /// Wraps a calendar date, rejecting years that do not fit four digits.
    #[must_use]
    pub fn from_naive(date: NaiveDate) -> Option<Self> {
        (0..=9999).contains(&date.year()).then_some(Self(date))
    }

    /// Returns the wrapped calendar date.
    #[must_use]
    pub const fn as_naive(self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for TaskDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(STORAGE_FORMAT))
    }
}

impl TryFrom<String> for TaskDate {
    type Error = ParseTaskDateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TaskDate> for String {
    fn from(value: TaskDate) -> Self {
        value.to_string()
    }
}
