//! Event endpoints. Events serialize bare, no envelope.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use eventboard_core::{Event, EventDraft, EventService, SqliteEventRepository};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

pub async fn create_event(
    State(state): State<AppState>,
    Json(draft): Json<EventDraft>,
) -> Result<(StatusCode, Json<Event>), ApiError> {
    let conn = state.conn()?;
    let event = EventService::new(SqliteEventRepository::new(&conn)).create(draft)?;
    Ok((StatusCode::CREATED, Json(event)))
}

pub async fn list_events(State(state): State<AppState>) -> Result<Json<Vec<Event>>, ApiError> {
    let conn = state.conn()?;
    let events = EventService::new(SqliteEventRepository::new(&conn)).list()?;
    Ok(Json(events))
}

pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(draft): Json<EventDraft>,
) -> Result<Json<Event>, ApiError> {
    let conn = state.conn()?;
    let event = EventService::new(SqliteEventRepository::new(&conn)).update(id, draft)?;
    Ok(Json(event))
}

pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let conn = state.conn()?;
    EventService::new(SqliteEventRepository::new(&conn)).delete(id)?;
    Ok(Json(json!({ "message": "Event deleted successfully" })))
}
