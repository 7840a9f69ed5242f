//! Recurrence rules and the next-occurrence engine.
//!
//! A rule is either `y` (every year on the same month and day) or `d N`
//! (every `N` days, `1 <= N <= 400`). The engine always steps at least once
//! from the base date and keeps stepping until the result lies strictly after
//! the reference day. Every step moves forward by at least one day, so the
//! loop runs at most `(today - base) / step + 1` times.

use super::{ParseRecurrenceRuleError, RecurrenceError, TaskDate};
use chrono::{Datelike, Days, NaiveDate};
use std::fmt;

/// Largest interval accepted by `d N` rules.
pub const MAX_DAY_INTERVAL: u16 = 400;

/// Parsed recurrence rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecurrenceRule {
    /// Repeats on the same month and day every year.
    Yearly,
    /// Repeats every given number of days.
    EveryDays(u16),
}

impl RecurrenceRule {
    /// Parses a non-empty rule string.
    ///
    /// # Errors
    ///
    /// Returns [`ParseRecurrenceRuleError`] when the value is not `y` or
    /// `d N` with `N` written without leading zeros in `1..=400`.
    pub fn parse(value: &str) -> Result<Self, ParseRecurrenceRuleError> {
        if value == "y" {
            return Ok(Self::Yearly);
        }

        value
            .strip_prefix("d ")
            .and_then(parse_interval)
            .map(Self::EveryDays)
            .ok_or_else(|| ParseRecurrenceRuleError(value.to_owned()))
    }

    /// Parses a rule string where the empty string means "no recurrence".
    ///
    /// # Errors
    ///
    /// Returns [`ParseRecurrenceRuleError`] for a non-empty invalid value.
    pub fn parse_optional(value: &str) -> Result<Option<Self>, ParseRecurrenceRuleError> {
        if value.is_empty() {
            return Ok(None);
        }
        Self::parse(value).map(Some)
    }

    /// Returns the first occurrence after `base` that falls strictly after
    /// `today`.
    ///
    /// # Errors
    ///
    /// Returns [`RecurrenceError::OutOfRange`] when stepping would pass the
    /// year 9999.
    pub fn next_after(self, base: TaskDate, today: NaiveDate) -> Result<TaskDate, RecurrenceError> {
        let mut next = self.step(base)?;
        while next.as_naive() <= today {
            next = self.step(next)?;
        }
        Ok(next)
    }

    fn step(self, from: TaskDate) -> Result<TaskDate, RecurrenceError> {
        let date = from.as_naive();
        let stepped = match self {
            Self::Yearly => add_one_year(date),
            Self::EveryDays(days) => date.checked_add_days(Days::new(u64::from(days))),
        };
        stepped
            .and_then(TaskDate::from_naive)
            .ok_or(RecurrenceError::OutOfRange(from))
    }
}

impl fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yearly => write!(f, "y"),
            Self::EveryDays(days) => write!(f, "d {days}"),
        }
    }
}

/// Computes the next occurrence of `date` under `repeat`, relative to `today`.
///
/// This is the entry point used for raw, unvalidated input: previews and
/// rows read back from storage.
///
/// # Errors
///
/// Checks run in order: [`RecurrenceError::RuleMissing`] for an empty rule,
/// [`RecurrenceError::DateInvalid`] for an unparseable date, then
/// [`RecurrenceError::RuleInvalid`] for a malformed rule.
pub fn next_date(today: NaiveDate, date: &str, repeat: &str) -> Result<TaskDate, RecurrenceError> {
    if repeat.is_empty() {
        return Err(RecurrenceError::RuleMissing);
    }
    let base = TaskDate::parse(date)?;
    let rule = RecurrenceRule::parse(repeat)?;
    rule.next_after(base, today)
}

fn parse_interval(digits: &str) -> Option<u16> {
    let is_canonical = !digits.is_empty()
        && digits.len() <= 3
        && !digits.starts_with('0')
        && digits.bytes().all(|byte| byte.is_ascii_digit());
    if !is_canonical {
        return None;
    }

    digits
        .parse::<u16>()
        .ok()
        .filter(|days| (1..=MAX_DAY_INTERVAL).contains(days))
}

/// Adds one calendar year; February 29 rolls over to March 1.
fn add_one_year(date: NaiveDate) -> Option<NaiveDate> {
    let year = date.year().checked_add(1)?;
    date.with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
}
