//! Task endpoints.
//!
//! Lists come back under a `task` key, single records under `data`.
//! `GET /api/tasks/:id` interprets the path segment as an event id and
//! filters to that event's tasks; an unknown event id yields an empty
//! list rather than a 404.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use eventboard_core::{
    AssignmentMaintainer, SqliteAssignmentRepository, SqliteTaskRepository, TaskDraft,
    TaskService, TaskUpdate,
};
use rusqlite::Connection;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

fn service(
    conn: &Connection,
) -> TaskService<SqliteTaskRepository<'_>, SqliteAssignmentRepository<'_>> {
    TaskService::new(
        SqliteTaskRepository::new(conn),
        AssignmentMaintainer::new(SqliteAssignmentRepository::new(conn)),
    )
}

pub async fn create_task(
    State(state): State<AppState>,
    Json(draft): Json<TaskDraft>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let conn = state.conn()?;
    let task = service(&conn).create(&draft)?;
    Ok((StatusCode::CREATED, Json(json!({ "data": task }))))
}

pub async fn list_tasks(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let conn = state.conn()?;
    let tasks = service(&conn).list_all()?;
    Ok(Json(json!({ "task": tasks })))
}

pub async fn list_tasks_for_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let conn = state.conn()?;
    let tasks = service(&conn).list_by_event(event_id)?;
    Ok(Json(json!({ "task": tasks })))
}

pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<TaskUpdate>,
) -> Result<Json<Value>, ApiError> {
    let conn = state.conn()?;
    let task = service(&conn).update(id, &update)?;
    Ok(Json(json!({ "data": task })))
}

pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let conn = state.conn()?;
    service(&conn).delete(id)?;
    Ok(Json(json!({ "message": "Task deleted successfully" })))
}
