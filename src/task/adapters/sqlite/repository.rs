//! `SQLite` repository implementation for task storage.

use super::{
    models::{TaskRow, TaskValues},
    schema::scheduler,
    sql_helpers::{LIKE_ESCAPE, like_pattern},
};
use crate::task::{
    domain::{TaskFields, TaskFilter, TaskId, TaskQuery, TaskRecord},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::sqlite::SqliteConnection;
use tracing::debug;

/// `SQLite` connection pool type used by task adapters.
pub type TaskSqlitePool = Pool<ConnectionManager<SqliteConnection>>;

/// Schema applied by [`SqliteTaskRepository::initialize`].
const SCHEMA_SQL: &str =
    include_str!("../../../../migrations/2024-01-01-000000_create_scheduler/up.sql");

/// Milliseconds a connection waits on a locked database before failing.
const BUSY_TIMEOUT_MS: u32 = 5_000;

/// Applies per-connection pragmas when the pool hands out a connection.
#[derive(Debug, Clone, Copy)]
struct ConnectionPragmas;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionPragmas {
    fn on_acquire(&self, connection: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        connection
            .batch_execute(&format!("PRAGMA busy_timeout = {BUSY_TIMEOUT_MS};"))
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Builds a connection pool for the database at `database_url`.
///
/// `:memory:` databases exist per connection, so callers using one should
/// pass `max_size = 1`.
///
/// # Errors
///
/// Returns [`TaskRepositoryError::Persistence`] when the pool cannot open
/// its initial connections.
pub fn build_pool(database_url: &str, max_size: u32) -> TaskRepositoryResult<TaskSqlitePool> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .max_size(max_size)
        .connection_customizer(Box::new(ConnectionPragmas))
        .build(manager)
        .map_err(TaskRepositoryError::persistence)
}

/// `SQLite`-backed task repository.
#[derive(Debug, Clone)]
pub struct SqliteTaskRepository {
    pool: TaskSqlitePool,
}

impl SqliteTaskRepository {
    /// Creates a new repository from a connection pool.
    #[must_use]
    pub const fn new(pool: TaskSqlitePool) -> Self {
        Self { pool }
    }

    /// Creates the task table and its index when they do not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the schema cannot be
    /// applied.
    pub async fn initialize(&self) -> TaskRepositoryResult<()> {
        self.run_blocking(|connection| {
            connection
                .batch_execute(SCHEMA_SQL)
                .map_err(TaskRepositoryError::persistence)
        })
        .await?;
        debug!("task schema ready");
        Ok(())
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut SqliteConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for SqliteTaskRepository {
    async fn insert(&self, fields: &TaskFields) -> TaskRepositoryResult<TaskId> {
        let values = TaskValues::from(fields);
        self.run_blocking(move |connection| {
            let id = diesel::insert_into(scheduler::table)
                .values(&values)
                .returning(scheduler::id)
                .get_result::<i64>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            TaskId::new(id).map_err(TaskRepositoryError::persistence)
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<TaskRecord>> {
        self.run_blocking(move |connection| {
            let row = scheduler::table
                .find(id.value())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_record).transpose()
        })
        .await
    }

    async fn update_by_id(&self, id: TaskId, fields: &TaskFields) -> TaskRepositoryResult<u64> {
        let values = TaskValues::from(fields);
        self.run_blocking(move |connection| {
            let affected = diesel::update(scheduler::table.find(id.value()))
                .set(&values)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            affected_rows(affected)
        })
        .await
    }

    async fn delete_by_id(&self, id: TaskId) -> TaskRepositoryResult<u64> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(scheduler::table.find(id.value()))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            affected_rows(affected)
        })
        .await
    }

    async fn list(&self, query: &TaskQuery) -> TaskRepositoryResult<Vec<TaskRecord>> {
        let limit = i64::from(query.limit);
        let filter = query.filter.clone();
        self.run_blocking(move |connection| {
            let mut statement = scheduler::table
                .select(TaskRow::as_select())
                .into_boxed();

            match filter {
                Some(TaskFilter::Date(date)) => {
                    statement = statement.filter(scheduler::date.eq(date.to_string()));
                }
                Some(TaskFilter::Text(text)) => {
                    let pattern = like_pattern(&text);
                    statement = statement.filter(
                        scheduler::title
                            .like(pattern.clone())
                            .escape(LIKE_ESCAPE)
                            .or(scheduler::comment.like(pattern).escape(LIKE_ESCAPE)),
                    );
                }
                None => {}
            }

            let rows = statement
                .order((scheduler::date.asc(), scheduler::id.asc()))
                .limit(limit)
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_record).collect()
        })
        .await
    }
}

fn row_to_record(row: TaskRow) -> TaskRepositoryResult<TaskRecord> {
    TaskRecord::try_from(row).map_err(TaskRepositoryError::persistence)
}

fn affected_rows(count: usize) -> TaskRepositoryResult<u64> {
    u64::try_from(count).map_err(TaskRepositoryError::persistence)
}
