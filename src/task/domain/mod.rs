//! Domain model for scheduled tasks.
//!
//! The domain holds the recurrence engine that advances due dates and the
//! validation that turns raw input into storable task fields. Nothing here
//! reads a clock: "today" is always passed in by the caller.

mod date;
mod error;
mod filter;
mod ids;
mod recurrence;
mod task;

pub use date::TaskDate;
pub use error::{ParseRecurrenceRuleError, ParseTaskDateError, RecurrenceError, TaskDomainError};
pub use filter::{TaskFilter, TaskQuery};
pub use ids::TaskId;
pub use recurrence::{MAX_DAY_INTERVAL, RecurrenceRule, next_date};
pub use task::{Task, TaskFields, TaskRecord};
