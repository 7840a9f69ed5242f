//! Repository port for row-oriented task storage.

use crate::task::domain::{TaskFields, TaskId, TaskQuery, TaskRecord};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Mutations report how many rows they touched. A filter that matches no row
/// is not a fault: callers decide what an affected count of zero means.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new row and returns the identifier assigned by the store.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the store fails.
    async fn insert(&self, fields: &TaskFields) -> TaskRepositoryResult<TaskId>;

    /// Finds a row by identifier.
    ///
    /// Returns `None` when the row does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<TaskRecord>>;

    /// Replaces every field of the row keyed by `id`.
    ///
    /// Returns the number of rows affected; never inserts.
    async fn update_by_id(&self, id: TaskId, fields: &TaskFields) -> TaskRepositoryResult<u64>;

    /// Removes the row keyed by `id` and returns the number of rows affected.
    async fn delete_by_id(&self, id: TaskId) -> TaskRepositoryResult<u64>;

    /// Returns up to `query.limit` rows matching the filter, ordered by due
    /// date ascending and then by identifier.
    async fn list(&self, query: &TaskQuery) -> TaskRepositoryResult<Vec<TaskRecord>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
