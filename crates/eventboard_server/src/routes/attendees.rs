//! Attendee endpoints. Responses wrap the record in a `data` envelope.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use eventboard_core::{
    AssignmentMaintainer, AttendeeDraft, AttendeeService, SqliteAssignmentRepository,
    SqliteAttendeeRepository,
};
use rusqlite::Connection;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

fn service(
    conn: &Connection,
) -> AttendeeService<SqliteAttendeeRepository<'_>, SqliteAssignmentRepository<'_>> {
    AttendeeService::new(
        SqliteAttendeeRepository::new(conn),
        AssignmentMaintainer::new(SqliteAssignmentRepository::new(conn)),
    )
}

pub async fn create_attendee(
    State(state): State<AppState>,
    Json(draft): Json<AttendeeDraft>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let conn = state.conn()?;
    let attendee = service(&conn).create(&draft)?;
    Ok((StatusCode::CREATED, Json(json!({ "data": attendee }))))
}

pub async fn list_attendees(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let conn = state.conn()?;
    let attendees = service(&conn).list()?;
    Ok(Json(json!({ "data": attendees })))
}

pub async fn delete_attendee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let conn = state.conn()?;
    service(&conn).delete(id)?;
    Ok(Json(json!({ "message": "Attendee deleted successfully" })))
}
