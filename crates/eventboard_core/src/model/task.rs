//! Task domain model.
//!
//! # Responsibility
//! - Define the task record, its lifecycle status and request drafts.
//!
//! # Invariants
//! - `assigned_attendees` only holds ids of existing attendee records.
//! - Each referenced attendee's `assigned_tasks` contains this task's id
//!   (bidirectional consistency, kept by the relationship maintainer).
//! - Status defaults to `Pending` when a draft does not specify one.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::attendee::AttendeeId;
use super::event::EventId;
use super::{require_text, ValidationError};

/// Stable identifier for one task record.
pub type TaskId = Uuid;

/// Task lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Created but not started. Default for new tasks.
    Pending,
    /// Work is underway.
    InProgress,
    /// Completed.
    Done,
}

impl TaskStatus {
    /// Parses the wire representation used by the HTTP API.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value {
            "Pending" => Ok(Self::Pending),
            "InProgress" => Ok(Self::InProgress),
            "Done" => Ok(Self::Done),
            other => Err(ValidationError::UnknownStatus(other.to_string())),
        }
    }

    /// Wire representation, identical to the serde variant name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "InProgress",
            Self::Done => "Done",
        }
    }
}

/// Persisted task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub deadline: NaiveDate,
    /// Attendee references, oldest assignment first.
    #[serde(rename = "assignedAttendees")]
    pub assigned_attendees: Vec<AttendeeId>,
    pub status: TaskStatus,
    /// Optional grouping context; never validated against the events
    /// collection.
    #[serde(rename = "event")]
    pub event_id: Option<EventId>,
}

/// Request payload for creating a task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TaskDraft {
    #[serde(default)]
    pub name: String,
    pub deadline: Option<NaiveDate>,
    #[serde(rename = "assignedAttendees", default)]
    pub assigned_attendees: Vec<AttendeeId>,
    /// Status as a wire string so unknown values surface as validation
    /// errors instead of deserialization failures.
    pub status: Option<String>,
    #[serde(rename = "event")]
    pub event_id: Option<EventId>,
}

impl TaskDraft {
    /// Validates required fields and resolves the effective status.
    pub fn validate(&self) -> Result<(NaiveDate, TaskStatus), ValidationError> {
        require_text("name", &self.name)?;
        let deadline = self
            .deadline
            .ok_or(ValidationError::MissingField("deadline"))?;
        if self.assigned_attendees.is_empty() {
            return Err(ValidationError::NoAssignedAttendees);
        }
        let status = match self.status.as_deref() {
            Some(value) => TaskStatus::parse(value)?,
            None => TaskStatus::Pending,
        };
        Ok((deadline, status))
    }
}

/// Request payload for updating a task.
///
/// Every field is optional; omitted fields keep their stored value. A
/// plain status update is the common case, but the full record (including
/// the attendee set) can be replaced in one call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TaskUpdate {
    pub name: Option<String>,
    pub deadline: Option<NaiveDate>,
    #[serde(rename = "assignedAttendees")]
    pub assigned_attendees: Option<Vec<AttendeeId>>,
    pub status: Option<String>,
    #[serde(rename = "event")]
    pub event_id: Option<EventId>,
}

#[cfg(test)]
mod tests {
    use super::{TaskDraft, TaskStatus};
    use crate::model::ValidationError;
    use uuid::Uuid;

    fn valid_draft() -> TaskDraft {
        TaskDraft {
            name: "Setup booth".into(),
            deadline: Some("2024-05-01".parse().unwrap()),
            assigned_attendees: vec![Uuid::new_v4()],
            status: None,
            event_id: None,
        }
    }

    #[test]
    fn status_parse_round_trips_wire_strings() {
        for status in [TaskStatus::Pending, TaskStatus::InProgress, TaskStatus::Done] {
            assert_eq!(TaskStatus::parse(status.as_str()).unwrap(), status);
        }
        assert!(matches!(
            TaskStatus::parse("Cancelled").unwrap_err(),
            ValidationError::UnknownStatus(_)
        ));
    }

    #[test]
    fn draft_defaults_status_to_pending() {
        let (_, status) = valid_draft().validate().unwrap();
        assert_eq!(status, TaskStatus::Pending);
    }

    #[test]
    fn draft_requires_deadline_and_attendees() {
        let mut no_deadline = valid_draft();
        no_deadline.deadline = None;
        assert_eq!(
            no_deadline.validate().unwrap_err(),
            ValidationError::MissingField("deadline")
        );

        let mut no_attendees = valid_draft();
        no_attendees.assigned_attendees.clear();
        assert_eq!(
            no_attendees.validate().unwrap_err(),
            ValidationError::NoAssignedAttendees
        );
    }
}
