//! Task entity, its validated fields, and the raw stored row.

use super::{ParseTaskDateError, RecurrenceRule, TaskDate, TaskDomainError, TaskId};
use chrono::NaiveDate;

/// Validated task fields, ready to be written to storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFields {
    /// Current due date.
    pub date: TaskDate,
    /// Non-empty title.
    pub title: String,
    /// Free-form comment; empty when absent.
    pub comment: String,
    /// Recurrence rule; `None` for a one-shot task.
    pub repeat: Option<RecurrenceRule>,
}

impl TaskFields {
    /// Validates raw input and settles the due date relative to `today`.
    ///
    /// An empty `date` means today. A date before today is snapped to today
    /// for one-shot tasks and advanced to the next occurrence for recurring
    /// ones. Dates from today onwards are kept as given.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`], [`TaskDomainError::InvalidDate`]
    /// or [`TaskDomainError::InvalidRepeat`] for bad input, checked in that
    /// order, and [`TaskDomainError::Recurrence`] if the advanced date would
    /// leave the supported range.
    pub fn normalize(
        today: NaiveDate,
        date: &str,
        title: &str,
        comment: &str,
        repeat: &str,
    ) -> Result<Self, TaskDomainError> {
        if title.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }

        let today_date = TaskDate::from_naive(today)
            .ok_or_else(|| ParseTaskDateError(today.to_string()))?;
        let parsed_date = if date.is_empty() {
            today_date
        } else {
            TaskDate::parse(date)?
        };
        let rule = RecurrenceRule::parse_optional(repeat)?;

        let due = if parsed_date >= today_date {
            parsed_date
        } else if let Some(recurrence) = rule {
            recurrence.next_after(parsed_date, today)?
        } else {
            today_date
        };

        Ok(Self {
            date: due,
            title: title.to_owned(),
            comment: comment.to_owned(),
            repeat: rule,
        })
    }

    /// Returns the rule in storage form: `""`, `"y"` or `"d N"`.
    #[must_use]
    pub fn repeat_text(&self) -> String {
        self.repeat.map(|rule| rule.to_string()).unwrap_or_default()
    }
}

/// Task row exactly as the store holds it.
///
/// Date and rule stay textual so that a corrupt row is reported by the
/// lifecycle service instead of failing inside the adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRecord {
    /// Stored identifier.
    pub id: TaskId,
    /// Stored due date text.
    pub date: String,
    /// Stored title.
    pub title: String,
    /// Stored comment.
    pub comment: String,
    /// Stored rule text.
    pub repeat: String,
}

impl TaskRecord {
    /// Builds the stored form of validated fields under `id`.
    #[must_use]
    pub fn from_fields(id: TaskId, fields: &TaskFields) -> Self {
        Self {
            id,
            date: fields.date.to_string(),
            title: fields.title.clone(),
            comment: fields.comment.clone(),
            repeat: fields.repeat_text(),
        }
    }

    /// Returns whether the row carries no recurrence rule.
    #[must_use]
    pub fn is_one_shot(&self) -> bool {
        self.repeat.is_empty()
    }
}

/// Stored task with validated fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    fields: TaskFields,
}

impl Task {
    /// Pairs a storage identifier with validated fields.
    #[must_use]
    pub const fn new(id: TaskId, fields: TaskFields) -> Self {
        Self { id, fields }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the current due date.
    #[must_use]
    pub const fn date(&self) -> TaskDate {
        self.fields.date
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.fields.title
    }

    /// Returns the comment, empty when absent.
    #[must_use]
    pub fn comment(&self) -> &str {
        &self.fields.comment
    }

    /// Returns the recurrence rule, if any.
    #[must_use]
    pub const fn repeat(&self) -> Option<RecurrenceRule> {
        self.fields.repeat
    }

    /// Returns whether completing the task reschedules it.
    #[must_use]
    pub const fn is_recurring(&self) -> bool {
        self.fields.repeat.is_some()
    }

    /// Returns the validated fields.
    #[must_use]
    pub const fn fields(&self) -> &TaskFields {
        &self.fields
    }

    /// Consumes the task and returns its fields.
    #[must_use]
    pub fn into_fields(self) -> TaskFields {
        self.fields
    }
}

impl TryFrom<TaskRecord> for Task {
    type Error = TaskDomainError;

    fn try_from(record: TaskRecord) -> Result<Self, Self::Error> {
        if record.title.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        let fields = TaskFields {
            date: TaskDate::parse(&record.date)?,
            repeat: RecurrenceRule::parse_optional(&record.repeat)?,
            title: record.title,
            comment: record.comment,
        };
        Ok(Self::new(record.id, fields))
    }
}
