//! Event use-case service.
//!
//! # Responsibility
//! - Provide event create/list/update/delete with name validation.
//!
//! Events have no relationship concerns; this service is a validating
//! pass-through over the repository.

use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::model::event::{Event, EventDraft, EventId};
use crate::model::ValidationError;
use crate::repo::event_repo::EventRepository;
use crate::repo::RepoError;

/// Service error for event use-cases.
#[derive(Debug)]
pub enum EventServiceError {
    Invalid(ValidationError),
    EventNotFound(EventId),
    Repo(RepoError),
    /// Write/read-back mismatch.
    InconsistentState(&'static str),
}

impl Display for EventServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid(err) => write!(f, "{err}"),
            Self::EventNotFound(id) => write!(f, "event not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent event state: {details}"),
        }
    }
}

impl Error for EventServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Invalid(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for EventServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::EventNotFound(id),
            RepoError::Validation(err) => Self::Invalid(err),
            other => Self::Repo(other),
        }
    }
}

/// Event service facade over repository implementations.
pub struct EventService<R: EventRepository> {
    repo: R,
}

impl<R: EventRepository> EventService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one event from a validated draft.
    pub fn create(&self, draft: EventDraft) -> Result<Event, EventServiceError> {
        draft.validate().map_err(EventServiceError::Invalid)?;
        let event = Event::from_draft(draft);
        let id = self.repo.create_event(&event)?;
        self.repo
            .get_event(id)?
            .ok_or(EventServiceError::InconsistentState(
                "created event not found in read-back",
            ))
    }

    /// Lists events in insertion order.
    pub fn list(&self) -> Result<Vec<Event>, EventServiceError> {
        Ok(self.repo.list_events()?)
    }

    pub fn get(&self, id: EventId) -> Result<Option<Event>, EventServiceError> {
        Ok(self.repo.get_event(id)?)
    }

    /// Replaces the full event record.
    pub fn update(&self, id: EventId, draft: EventDraft) -> Result<Event, EventServiceError> {
        draft.validate().map_err(EventServiceError::Invalid)?;
        let event = Event {
            id,
            name: draft.name,
            description: draft.description,
            location: draft.location,
            date: draft.date,
        };
        self.repo.update_event(&event)?;
        self.repo
            .get_event(id)?
            .ok_or(EventServiceError::InconsistentState(
                "updated event not found in read-back",
            ))
    }

    /// Deletes one event. Tasks keep any reference they hold to this id;
    /// the event reference on tasks is an unchecked grouping context.
    pub fn delete(&self, id: EventId) -> Result<(), EventServiceError> {
        self.repo.delete_event(id)?;
        Ok(())
    }
}
