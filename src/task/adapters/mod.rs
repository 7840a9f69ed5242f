//! Adapter implementations for task ports.
//!
//! - [`memory`]: process-local repository for tests and scenarios
//! - [`sqlite`]: Diesel-backed `SQLite` repository
//! - [`http`]: axum routes exposing the lifecycle service

pub mod http;
pub mod memory;
pub mod sqlite;
