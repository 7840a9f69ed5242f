//! Error types for task domain validation and recurrence computation.

use super::TaskDate;
use thiserror::Error;

/// Error returned when a value is not an eight-digit `YYYYMMDD` date.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid date '{0}', expected YYYYMMDD")]
pub struct ParseTaskDateError(pub String);

/// Error returned when a non-empty value is neither `y` nor `d N`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid repeat rule '{0}', expected 'y' or 'd N' with N in 1..=400")]
pub struct ParseRecurrenceRuleError(pub String);

/// Errors returned while computing the next occurrence of a task.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecurrenceError {
    /// The repeat rule is empty, so the task has no next occurrence.
    #[error("repeat rule is missing")]
    RuleMissing,

    /// The base date does not parse.
    #[error(transparent)]
    DateInvalid(#[from] ParseTaskDateError),

    /// The repeat rule does not follow either grammar.
    #[error(transparent)]
    RuleInvalid(#[from] ParseRecurrenceRuleError),

    /// Advancing the date would leave the four-digit year range.
    #[error("next occurrence after {0} is outside the supported date range")]
    OutOfRange(TaskDate),
}

/// Errors returned while validating task fields.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The title is empty.
    #[error("task title is required")]
    EmptyTitle,

    /// The due date does not parse.
    #[error(transparent)]
    InvalidDate(#[from] ParseTaskDateError),

    /// The repeat rule does not parse.
    #[error(transparent)]
    InvalidRepeat(#[from] ParseRecurrenceRuleError),

    /// The task identifier is not a positive integer.
    #[error("invalid task id '{0}', expected a positive integer")]
    InvalidTaskId(String),

    /// The next occurrence could not be computed.
    #[error(transparent)]
    Recurrence(#[from] RecurrenceError),
}
