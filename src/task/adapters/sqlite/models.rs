//! Diesel row models for task persistence.

use super::schema::scheduler;
use crate::task::domain::{TaskDomainError, TaskFields, TaskId, TaskRecord};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = scheduler)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TaskRow {
    /// Task identifier.
    pub id: i64,
    /// Due date text.
    pub date: String,
    /// Task title.
    pub title: String,
    /// Task comment.
    pub comment: String,
    /// Recurrence rule text.
    pub repeat: String,
}

impl TryFrom<TaskRow> for TaskRecord {
    type Error = TaskDomainError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        let TaskRow {
            id,
            date,
            title,
            comment,
            repeat,
        } = row;
        Ok(Self {
            id: TaskId::new(id)?,
            date,
            title,
            comment,
            repeat,
        })
    }
}

/// Insert and update model for task records.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = scheduler)]
pub struct TaskValues {
    /// Due date text.
    pub date: String,
    /// Task title.
    pub title: String,
    /// Task comment.
    pub comment: String,
    /// Recurrence rule text.
    pub repeat: String,
}

impl From<&TaskFields> for TaskValues {
    fn from(fields: &TaskFields) -> Self {
        Self {
            date: fields.date.to_string(),
            title: fields.title.clone(),
            comment: fields.comment.clone(),
            repeat: fields.repeat_text(),
        }
    }
}
