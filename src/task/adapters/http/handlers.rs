//! Request handlers for the task HTTP API.

use super::dto::{
    CreatedDto, IdQuery, NextDateQuery, SearchQuery, TaskDto, TaskListDto, TaskPayload,
};
use super::error::ApiError;
use crate::task::{
    domain::{TaskDate, TaskId},
    ports::TaskRepository,
    services::{TaskCompletion, TaskLifecycleService},
};
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use mockable::Clock;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::debug;

/// Lifecycle service shared across handlers.
pub type SharedService<R, C> = Arc<TaskLifecycleService<R, C>>;

/// `GET /api/nextdate`: plain-text preview of the next occurrence.
pub async fn next_date<R, C>(
    State(service): State<SharedService<R, C>>,
    Query(query): Query<NextDateQuery>,
) -> Result<String, (StatusCode, String)>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let now = match query.now.as_deref() {
        None | Some("") => None,
        Some(text) => Some(
            TaskDate::parse(text)
                .map_err(|err| (StatusCode::BAD_REQUEST, err.to_string()))?
                .as_naive(),
        ),
    };

    service
        .preview_next_date(now, &query.date, &query.repeat)
        .map(|date| date.to_string())
        .map_err(|err| (StatusCode::BAD_REQUEST, err.to_string()))
}

/// `GET /api/tasks`: tasks ordered by due date, optionally filtered.
pub async fn list_tasks<R, C>(
    State(service): State<SharedService<R, C>>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<TaskListDto>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let Query(query) = query?;
    let tasks = service.list(query.search.as_deref()).await?;
    Ok(Json(TaskListDto {
        tasks: tasks.iter().map(TaskDto::from).collect(),
    }))
}

/// `GET /api/task?id=N`: a single task.
pub async fn get_task<R, C>(
    State(service): State<SharedService<R, C>>,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> Result<Json<TaskDto>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let Query(query) = query?;
    let id = required_id(query.id.as_deref())?;
    let task = service.find_by_id(id).await?;
    Ok(Json(TaskDto::from(&task)))
}

/// `POST /api/task`: creates a task and returns its identifier.
pub async fn create_task<R, C>(
    State(service): State<SharedService<R, C>>,
    payload: Result<Json<TaskPayload>, JsonRejection>,
) -> Result<Json<CreatedDto>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let Json(body) = payload?;
    let task = service.create(body.into_request()).await?;
    Ok(Json(CreatedDto {
        id: task.id().value(),
    }))
}

/// `PUT /api/task`: replaces every field of the task named in the body.
pub async fn edit_task<R, C>(
    State(service): State<SharedService<R, C>>,
    payload: Result<Json<TaskPayload>, JsonRejection>,
) -> Result<Json<Value>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let Json(mut body) = payload?;
    let id = body
        .id
        .take()
        .ok_or_else(|| ApiError::bad_request("task id is required"))?
        .parse()?;
    service.edit(id, body.into_request()).await?;
    Ok(Json(json!({})))
}

/// `DELETE /api/task?id=N`: removes a task.
pub async fn delete_task<R, C>(
    State(service): State<SharedService<R, C>>,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let Query(query) = query?;
    let id = required_id(query.id.as_deref())?;
    service.delete(id).await?;
    Ok(Json(json!({})))
}

/// `POST /api/task/done?id=N`: marks a task done.
pub async fn complete_task<R, C>(
    State(service): State<SharedService<R, C>>,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let Query(query) = query?;
    let id = required_id(query.id.as_deref())?;
    match service.complete(id).await? {
        TaskCompletion::Removed(_) => debug!(task_id = %id, "completion removed task"),
        TaskCompletion::Rescheduled(task) => {
            debug!(task_id = %id, date = %task.date(), "completion rescheduled task");
        }
    }
    Ok(Json(json!({})))
}

/// Fallback for known paths hit with an unsupported method.
pub async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed()
}

fn required_id(raw: Option<&str>) -> Result<TaskId, ApiError> {
    match raw {
        None | Some("") => Err(ApiError::bad_request("task id is required")),
        Some(text) => Ok(text.parse::<TaskId>()?),
    }
}
