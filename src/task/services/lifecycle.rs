//! Service layer for task creation, editing, completion and lookup.

use crate::task::{
    domain::{
        RecurrenceError, Task, TaskDate, TaskDomainError, TaskFields, TaskFilter, TaskId,
        TaskQuery, TaskRecord, next_date,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Row limit applied to listings unless configured otherwise.
pub const DEFAULT_LIST_LIMIT: u32 = 50;

/// Raw task input, validated by the service before anything is stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskRequest {
    date: String,
    title: String,
    comment: String,
    repeat: String,
}

impl TaskRequest {
    /// Creates a request with the given title and every other field empty.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Sets the due date in `YYYYMMDD` form; empty means today.
    #[must_use]
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    /// Sets the comment.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Sets the repeat rule; empty means one-shot.
    #[must_use]
    pub fn with_repeat(mut self, repeat: impl Into<String>) -> Self {
        self.repeat = repeat.into();
        self
    }

    fn normalize(&self, today: NaiveDate) -> Result<TaskFields, TaskDomainError> {
        TaskFields::normalize(today, &self.date, &self.title, &self.comment, &self.repeat)
    }
}

/// Outcome of marking a task done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskCompletion {
    /// The one-shot task was deleted.
    Removed(TaskId),
    /// The recurring task moved to its next due date.
    Rescheduled(Task),
}

/// Stable classification of lifecycle failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskErrorKind {
    /// Input or stored data failed validation.
    Validation,
    /// The identifier does not resolve to a live row.
    NotFound,
    /// The store failed.
    Storage,
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Validation(#[from] TaskDomainError),
    /// No live row has the identifier.
    #[error("task {0} not found")]
    NotFound(TaskId),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

impl TaskLifecycleError {
    /// Returns the error classification.
    #[must_use]
    pub const fn kind(&self) -> TaskErrorKind {
        match self {
            Self::Validation(_) => TaskErrorKind::Validation,
            Self::NotFound(_) => TaskErrorKind::NotFound,
            Self::Repository(_) => TaskErrorKind::Storage,
        }
    }
}

impl From<RecurrenceError> for TaskLifecycleError {
    fn from(err: RecurrenceError) -> Self {
        Self::Validation(TaskDomainError::Recurrence(err))
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
///
/// The service holds no mutable state: storage and "today" both come from
/// injected collaborators.
#[derive(Clone)]
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    list_limit: u32,
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            list_limit: DEFAULT_LIST_LIMIT,
        }
    }

    /// Sets the maximum number of tasks returned by [`Self::list`].
    #[must_use]
    pub const fn with_list_limit(mut self, list_limit: u32) -> Self {
        self.list_limit = list_limit;
        self
    }

    /// Returns the reference day according to the host clock.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.local().date_naive()
    }

    /// Computes the next occurrence for raw input without touching storage.
    ///
    /// `now` defaults to [`Self::today`].
    ///
    /// # Errors
    ///
    /// Returns the [`RecurrenceError`] raised by the engine.
    pub fn preview_next_date(
        &self,
        now: Option<NaiveDate>,
        date: &str,
        repeat: &str,
    ) -> Result<TaskDate, RecurrenceError> {
        next_date(now.unwrap_or_else(|| self.today()), date, repeat)
    }

    /// Validates and stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Validation`] before any storage call
    /// when input is invalid, or [`TaskLifecycleError::Repository`] when the
    /// insert fails.
    pub async fn create(&self, request: TaskRequest) -> TaskLifecycleResult<Task> {
        let fields = request.normalize(self.today())?;
        let id = self.repository.insert(&fields).await?;
        debug!(task_id = %id, date = %fields.date, "task created");
        Ok(Task::new(id, fields))
    }

    /// Replaces every field of an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Validation`] for invalid input,
    /// [`TaskLifecycleError::NotFound`] when the task does not exist or
    /// disappears before the update lands, and
    /// [`TaskLifecycleError::Repository`] on storage failure.
    pub async fn edit(&self, id: TaskId, request: TaskRequest) -> TaskLifecycleResult<Task> {
        let fields = request.normalize(self.today())?;
        self.require_record(id).await?;

        let affected = self.repository.update_by_id(id, &fields).await?;
        if affected == 0 {
            return Err(TaskLifecycleError::NotFound(id));
        }
        debug!(task_id = %id, date = %fields.date, "task edited");
        Ok(Task::new(id, fields))
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when no row matches,
    /// [`TaskLifecycleError::Validation`] when the stored row is corrupt, and
    /// [`TaskLifecycleError::Repository`] on storage failure.
    pub async fn find_by_id(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        let record = self.require_record(id).await?;
        Ok(decode_record(record)?)
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when no row was deleted and
    /// [`TaskLifecycleError::Repository`] on storage failure.
    pub async fn delete(&self, id: TaskId) -> TaskLifecycleResult<()> {
        let affected = self.repository.delete_by_id(id).await?;
        if affected == 0 {
            return Err(TaskLifecycleError::NotFound(id));
        }
        debug!(task_id = %id, "task deleted");
        Ok(())
    }

    /// Marks a task done.
    ///
    /// One-shot tasks are deleted. Recurring tasks keep their identifier and
    /// other fields and move to the first occurrence after today.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task is absent or
    /// vanishes between lookup and write, [`TaskLifecycleError::Validation`]
    /// when the stored date or rule is corrupt, and
    /// [`TaskLifecycleError::Repository`] on storage failure.
    pub async fn complete(&self, id: TaskId) -> TaskLifecycleResult<TaskCompletion> {
        let record = self.require_record(id).await?;

        if record.is_one_shot() {
            let affected = self.repository.delete_by_id(id).await?;
            if affected == 0 {
                return Err(TaskLifecycleError::NotFound(id));
            }
            info!(task_id = %id, "one-shot task completed and removed");
            return Ok(TaskCompletion::Removed(id));
        }

        let next = next_date(self.today(), &record.date, &record.repeat).inspect_err(|err| {
            warn!(task_id = %id, error = %err, "stored task cannot be rescheduled");
        })?;
        let fields = TaskFields {
            date: next,
            ..decode_record(record)?.into_fields()
        };

        let affected = self.repository.update_by_id(id, &fields).await?;
        if affected == 0 {
            return Err(TaskLifecycleError::NotFound(id));
        }
        info!(task_id = %id, next_date = %next, "recurring task rescheduled");
        Ok(TaskCompletion::Rescheduled(Task::new(id, fields)))
    }

    /// Lists tasks by due date, optionally narrowed by a search string.
    ///
    /// See [`TaskFilter::from_search`] for how the string is interpreted.
    /// Corrupt stored rows are logged and left out of the result.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] on storage failure.
    pub async fn list(&self, search: Option<&str>) -> TaskLifecycleResult<Vec<Task>> {
        let query =
            TaskQuery::new(self.list_limit).with_filter(search.and_then(TaskFilter::from_search));
        let records = self.repository.list(&query).await?;
        Ok(records
            .into_iter()
            .filter_map(|record| decode_record(record).ok())
            .collect())
    }

    async fn require_record(&self, id: TaskId) -> TaskLifecycleResult<TaskRecord> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(id))
    }
}

fn decode_record(record: TaskRecord) -> Result<Task, TaskDomainError> {
    let id = record.id;
    Task::try_from(record).inspect_err(|err| {
        warn!(task_id = %id, error = %err, "stored task row is corrupt");
    })
}
