//! `SQLite` adapters for task lifecycle persistence.

mod models;
mod repository;
mod schema;
mod sql_helpers;

pub use repository::{SqliteTaskRepository, TaskSqlitePool, build_pool};
