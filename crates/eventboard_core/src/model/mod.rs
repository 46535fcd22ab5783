//! Domain model for events, attendees and tasks.
//!
//! # Responsibility
//! - Define the canonical records persisted by the three collections.
//! - Own field-level validation shared by repositories and services.
//!
//! # Invariants
//! - Every record is identified by a stable uuid assigned at creation.
//! - Task/attendee references are stored as plain id lists, never as
//!   embedded copies of the referenced record.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod attendee;
pub mod event;
pub mod task;

/// Field-level validation error shared by all three record types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field is missing or blank.
    MissingField(&'static str),
    /// Email value does not look like an address.
    InvalidEmail(String),
    /// Task creation requires at least one assigned attendee.
    NoAssignedAttendees,
    /// Status value is not one of the recognized task states.
    UnknownStatus(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "required field `{field}` is missing"),
            Self::InvalidEmail(value) => write!(f, "invalid email address: `{value}`"),
            Self::NoAssignedAttendees => {
                write!(f, "a task must be assigned to at least one attendee")
            }
            Self::UnknownStatus(value) => write!(
                f,
                "unknown task status `{value}`; expected Pending|InProgress|Done"
            ),
        }
    }
}

impl Error for ValidationError {}

/// Rejects blank required text fields with a stable field name.
pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}
