//! Wire representations of tasks for the HTTP API.

use crate::task::domain::{Task, TaskDomainError, TaskId};
use crate::task::services::TaskRequest;
use serde::{Deserialize, Serialize};

/// Task as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDto {
    /// Identifier in decimal text form.
    pub id: String,
    /// Due date in `YYYYMMDD` form.
    pub date: String,
    /// Title.
    pub title: String,
    /// Comment; omitted when empty.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comment: String,
    /// Repeat rule; empty for one-shot tasks.
    pub repeat: String,
}

impl From<&Task> for TaskDto {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id().to_string(),
            date: task.date().to_string(),
            title: task.title().to_owned(),
            comment: task.comment().to_owned(),
            repeat: task.fields().repeat_text(),
        }
    }
}

/// Listing response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskListDto {
    /// Tasks ordered by due date.
    pub tasks: Vec<TaskDto>,
}

/// Response body carrying a newly assigned identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedDto {
    /// Identifier as a JSON number.
    pub id: i64,
}

/// Identifier as sent by clients, either quoted or bare.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum IdValue {
    /// `"42"`.
    Text(String),
    /// `42`.
    Number(i64),
}

impl IdValue {
    /// Parses the identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTaskId`] unless the value is a
    /// positive integer.
    pub fn parse(&self) -> Result<TaskId, TaskDomainError> {
        match self {
            Self::Text(text) => text.parse(),
            Self::Number(number) => TaskId::new(*number),
        }
    }
}

/// Request body for creating or editing a task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TaskPayload {
    /// Identifier; required when editing, ignored when creating.
    #[serde(default)]
    pub id: Option<IdValue>,
    /// Due date; empty means today.
    #[serde(default)]
    pub date: String,
    /// Title.
    #[serde(default)]
    pub title: String,
    /// Comment.
    #[serde(default)]
    pub comment: String,
    /// Repeat rule.
    #[serde(default)]
    pub repeat: String,
}

impl TaskPayload {
    /// Converts the body into a lifecycle request, dropping the identifier.
    #[must_use]
    pub fn into_request(self) -> TaskRequest {
        TaskRequest::new(self.title)
            .with_date(self.date)
            .with_comment(self.comment)
            .with_repeat(self.repeat)
    }
}

/// Query string carrying a task identifier.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdQuery {
    /// Identifier text.
    pub id: Option<String>,
}

/// Query string for listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    /// Free-form search text.
    pub search: Option<String>,
}

/// Query string for next-date previews.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NextDateQuery {
    /// Reference day in `YYYYMMDD` form; today when absent.
    pub now: Option<String>,
    /// Base date.
    #[serde(default)]
    pub date: String,
    /// Repeat rule.
    #[serde(default)]
    pub repeat: String,
}
