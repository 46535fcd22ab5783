//! Event domain model.
//!
//! # Responsibility
//! - Define the event record and its creation/update draft.
//!
//! # Invariants
//! - `id` is stable and never reused for another event.
//! - `name` is the only required field; everything else is optional.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{require_text, ValidationError};

/// Stable identifier for one event record.
pub type EventId = Uuid;

/// Persisted event record.
///
/// Events carry no relationships; tasks may point at an event id as an
/// unchecked grouping context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub description: Option<String>,
    pub location: Option<String>,
    /// Calendar date of the event (no time component).
    pub date: Option<NaiveDate>,
}

/// Request payload for creating or fully updating an event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EventDraft {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub date: Option<NaiveDate>,
}

impl EventDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)
    }
}

impl Event {
    /// Materializes a draft into a record with a generated stable id.
    pub fn from_draft(draft: EventDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: draft.name,
            description: draft.description,
            location: draft.location,
            date: draft.date,
        }
    }
}
