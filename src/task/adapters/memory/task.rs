//! In-memory repository for task lifecycle tests.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::{
    domain::{TaskFields, TaskId, TaskQuery, TaskRecord},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Identifiers are handed out from an increasing counter and never reused,
/// matching an `AUTOINCREMENT` primary key.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: BTreeMap<TaskId, TaskRecord>,
    last_id: i64,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a raw row as-is, bypassing validation.
    ///
    /// Lets tests plant rows a real store could hold after manual edits.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] if the lock is poisoned.
    pub fn seed_record(&self, record: TaskRecord) -> TaskRepositoryResult<()> {
        let mut state = self.write_state()?;
        state.last_id = state.last_id.max(record.id.value());
        state.tasks.insert(record.id, record);
        Ok(())
    }

    fn read_state(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write_state(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, fields: &TaskFields) -> TaskRepositoryResult<TaskId> {
        let mut state = self.write_state()?;
        let next_id = state.last_id.saturating_add(1);
        let id = TaskId::new(next_id).map_err(TaskRepositoryError::persistence)?;
        state.last_id = next_id;
        state.tasks.insert(id, TaskRecord::from_fields(id, fields));
        Ok(id)
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<TaskRecord>> {
        let state = self.read_state()?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn update_by_id(&self, id: TaskId, fields: &TaskFields) -> TaskRepositoryResult<u64> {
        let mut state = self.write_state()?;
        let Some(record) = state.tasks.get_mut(&id) else {
            return Ok(0);
        };
        *record = TaskRecord::from_fields(id, fields);
        Ok(1)
    }

    async fn delete_by_id(&self, id: TaskId) -> TaskRepositoryResult<u64> {
        let mut state = self.write_state()?;
        Ok(u64::from(state.tasks.remove(&id).is_some()))
    }

    async fn list(&self, query: &TaskQuery) -> TaskRepositoryResult<Vec<TaskRecord>> {
        let state = self.read_state()?;
        let mut records: Vec<TaskRecord> = state
            .tasks
            .values()
            .filter(|record| {
                query
                    .filter
                    .as_ref()
                    .is_none_or(|filter| filter.matches(record))
            })
            .cloned()
            .collect();
        records.sort_by(|left, right| left.date.cmp(&right.date).then(left.id.cmp(&right.id)));
        records.truncate(usize::try_from(query.limit).unwrap_or(usize::MAX));
        Ok(records)
    }
}
