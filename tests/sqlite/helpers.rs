//! Shared fixtures for `SQLite` integration tests.

use std::sync::Arc;

use crate::test_helpers::FixedClock;
use diesel::connection::SimpleConnection;
use rstest::fixture;
use scheduler::task::{
    adapters::sqlite::{SqliteTaskRepository, TaskSqlitePool, build_pool},
    services::TaskLifecycleService,
};

/// Boxed error type for fallible fixtures and tests.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Day every lifecycle test treats as today.
pub const TODAY: &str = "20240115";

/// Repository, service and raw pool over one in-memory database.
pub struct SqliteContext {
    pub pool: TaskSqlitePool,
    pub repository: Arc<SqliteTaskRepository>,
    pub service: TaskLifecycleService<SqliteTaskRepository, FixedClock>,
}

impl SqliteContext {
    /// Inserts a row with raw SQL, bypassing every validation layer.
    ///
    /// # Errors
    ///
    /// Returns an error when no connection is available or the insert fails.
    pub fn insert_raw(
        &self,
        id: i64,
        date: &str,
        title: &str,
        repeat: &str,
    ) -> Result<(), BoxError> {
        let mut connection = self.pool.get()?;
        connection.batch_execute(&format!(
            "INSERT INTO scheduler (id, date, title, comment, repeat) \
             VALUES ({id}, '{date}', '{title}', '', '{repeat}');"
        ))?;
        Ok(())
    }
}

/// Provides a fresh, initialized in-memory database.
///
/// The pool holds a single connection because every `:memory:` connection
/// opens its own database.
#[fixture]
pub async fn context() -> Result<SqliteContext, BoxError> {
    let pool = build_pool(":memory:", 1)?;
    let repository = Arc::new(SqliteTaskRepository::new(pool.clone()));
    repository.initialize().await?;
    let service = TaskLifecycleService::new(repository.clone(), Arc::new(FixedClock::on(TODAY)));
    Ok(SqliteContext {
        pool,
        repository,
        service,
    })
}
