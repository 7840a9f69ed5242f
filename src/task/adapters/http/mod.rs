//! HTTP adapter exposing the task lifecycle service.
//!
//! Routes:
//!
//! - `GET  /api/nextdate?now=&date=&repeat=`: plain-text next occurrence
//! - `GET  /api/tasks?search=`: `{"tasks": [...]}`
//! - `GET  /api/task?id=`: one task
//! - `POST /api/task`: create, returns `{"id": N}`
//! - `PUT  /api/task`: edit, returns `{}`
//! - `DELETE /api/task?id=`: delete, returns `{}`
//! - `POST /api/task/done?id=`: complete, returns `{}`
//!
//! Failures are `{"error": "..."}` with 400, 404, 405 or 500.

pub mod dto;
mod error;
mod handlers;

pub use error::ApiError;
pub use handlers::SharedService;

use crate::task::ports::TaskRepository;
use axum::Router;
use axum::routing::{get, post};
use mockable::Clock;

/// Builds the API router around a shared lifecycle service.
pub fn router<R, C>(service: SharedService<R, C>) -> Router
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    Router::new()
        .route("/api/nextdate", get(handlers::next_date::<R, C>))
        .route("/api/tasks", get(handlers::list_tasks::<R, C>))
        .route(
            "/api/task",
            get(handlers::get_task::<R, C>)
                .post(handlers::create_task::<R, C>)
                .put(handlers::edit_task::<R, C>)
                .delete(handlers::delete_task::<R, C>),
        )
        .route("/api/task/done", post(handlers::complete_task::<R, C>))
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .with_state(service)
}
