//! Scheduler: tasks with recurring due dates.
//!
//! Tasks carry an optional recurrence rule. Marking a one-shot task done
//! removes it; marking a recurring task done moves its due date to the next
//! occurrence after today.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: recurrence engine and task validation, no infrastructure
//! - **Ports**: the storage contract used by services
//! - **Adapters**: in-memory and `SQLite` storage, axum HTTP routes
//!
//! # Modules
//!
//! - [`task`]: task lifecycle and recurrence
//! - [`config`]: server settings from flags and environment
//! - [`telemetry`]: tracing subscriber setup

pub mod config;
pub mod task;
pub mod telemetry;
