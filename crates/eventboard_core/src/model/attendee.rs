//! Attendee domain model.
//!
//! # Responsibility
//! - Define the attendee record and its creation draft.
//! - Validate email shape before anything reaches storage.
//!
//! # Invariants
//! - `email` is globally unique (enforced case-insensitively by storage).
//! - Every id in `assigned_tasks` refers to a task whose own
//!   `assigned_attendees` contains this attendee's id.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::task::TaskId;
use super::{require_text, ValidationError};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// Stable identifier for one attendee record.
pub type AttendeeId = Uuid;

/// Persisted attendee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendee {
    pub id: AttendeeId,
    pub name: String,
    pub email: String,
    /// Task references, oldest assignment first.
    #[serde(rename = "assignedTasks")]
    pub assigned_tasks: Vec<TaskId>,
}

/// Request payload for creating an attendee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AttendeeDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl AttendeeDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_text("email", &self.email)?;
        let email = self.email.trim();
        if !EMAIL_RE.is_match(email) {
            return Err(ValidationError::InvalidEmail(email.to_string()));
        }
        Ok(())
    }

    /// Trimmed email used for storage and uniqueness checks.
    pub fn normalized_email(&self) -> String {
        self.email.trim().to_string()
    }
}

impl Attendee {
    /// Materializes a draft into a record with a generated stable id.
    ///
    /// The assignment list starts empty; it is only ever populated through
    /// the relationship maintainer.
    pub fn from_draft(draft: &AttendeeDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: draft.name.trim().to_string(),
            email: draft.normalized_email(),
            assigned_tasks: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AttendeeDraft;
    use crate::model::ValidationError;

    #[test]
    fn draft_rejects_blank_name_and_email() {
        let missing_name = AttendeeDraft {
            name: "  ".into(),
            email: "a@b.com".into(),
        };
        assert_eq!(
            missing_name.validate().unwrap_err(),
            ValidationError::MissingField("name")
        );

        let missing_email = AttendeeDraft {
            name: "Ana".into(),
            email: String::new(),
        };
        assert_eq!(
            missing_email.validate().unwrap_err(),
            ValidationError::MissingField("email")
        );
    }

    #[test]
    fn draft_rejects_malformed_email() {
        let draft = AttendeeDraft {
            name: "Ana".into(),
            email: "not-an-email".into(),
        };
        assert!(matches!(
            draft.validate().unwrap_err(),
            ValidationError::InvalidEmail(_)
        ));
    }

    #[test]
    fn draft_accepts_plain_address_and_trims() {
        let draft = AttendeeDraft {
            name: "Ana".into(),
            email: " ana@x.com ".into(),
        };
        draft.validate().unwrap();
        assert_eq!(draft.normalized_email(), "ana@x.com");
    }
}
