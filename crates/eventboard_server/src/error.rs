//! HTTP error mapping.
//!
//! Service errors collapse into one API error type whose variants carry
//! the response status. Every error body has the shape
//! `{"error": "<message>"}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use eventboard_core::{AttendeeServiceError, EventServiceError, TaskServiceError};
use log::{error, warn};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    /// The primary write landed but some follow-up writes did not.
    #[error("{0}")]
    PartialFailure(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::PartialFailure(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("event=request_failed module=http status=error error={self}");
        } else {
            warn!("event=request_rejected module=http status={} error={self}", status.as_u16());
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<EventServiceError> for ApiError {
    fn from(value: EventServiceError) -> Self {
        match value {
            EventServiceError::Invalid(err) => Self::Validation(err.to_string()),
            EventServiceError::EventNotFound(_) => Self::NotFound(value.to_string()),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<AttendeeServiceError> for ApiError {
    fn from(value: AttendeeServiceError) -> Self {
        match value {
            AttendeeServiceError::Invalid(err) => Self::Validation(err.to_string()),
            AttendeeServiceError::DuplicateEmail(_) => Self::Conflict(value.to_string()),
            AttendeeServiceError::AttendeeNotFound(_) => Self::NotFound(value.to_string()),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<TaskServiceError> for ApiError {
    fn from(value: TaskServiceError) -> Self {
        match value {
            TaskServiceError::Invalid(err) => Self::Validation(err.to_string()),
            // Bodies referencing a nonexistent attendee are a client
            // mistake, not a missing resource.
            TaskServiceError::UnknownAttendee(_) => Self::Validation(value.to_string()),
            TaskServiceError::TaskNotFound(_) => Self::NotFound(value.to_string()),
            TaskServiceError::PartialAssignment { .. } => Self::PartialFailure(value.to_string()),
            other => Self::Internal(other.to_string()),
        }
    }
}
