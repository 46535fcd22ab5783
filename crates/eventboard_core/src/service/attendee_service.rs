//! Attendee use-case service.
//!
//! # Responsibility
//! - Provide attendee create/list/delete APIs.
//! - Cascade attendee deletion through the relationship maintainer so no
//!   task keeps a reference to a deleted attendee.
//!
//! # Invariants
//! - Email format is validated before storage; uniqueness surfaces as a
//!   duplicate-email error without touching the existing record.

use std::error::Error;
use std::fmt::{Display, Formatter};

use log::info;

use crate::model::attendee::{Attendee, AttendeeDraft, AttendeeId};
use crate::model::ValidationError;
use crate::repo::assignment_repo::AssignmentRepository;
use crate::repo::attendee_repo::AttendeeRepository;
use crate::repo::RepoError;
use crate::service::assignment::{AssignmentError, AssignmentMaintainer};

/// Service error for attendee use-cases.
#[derive(Debug)]
pub enum AttendeeServiceError {
    Invalid(ValidationError),
    /// Email already belongs to another attendee.
    DuplicateEmail(String),
    AttendeeNotFound(AttendeeId),
    Repo(RepoError),
    /// Write/read-back mismatch.
    InconsistentState(&'static str),
}

impl Display for AttendeeServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid(err) => write!(f, "{err}"),
            Self::DuplicateEmail(email) => {
                write!(f, "an attendee with email `{email}` already exists")
            }
            Self::AttendeeNotFound(id) => write!(f, "attendee not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => {
                write!(f, "inconsistent attendee state: {details}")
            }
        }
    }
}

impl Error for AttendeeServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Invalid(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for AttendeeServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::AttendeeNotFound(id),
            RepoError::Validation(err) => Self::Invalid(err),
            RepoError::Conflict { value, .. } => Self::DuplicateEmail(value),
            other => Self::Repo(other),
        }
    }
}

impl From<AssignmentError> for AttendeeServiceError {
    fn from(value: AssignmentError) -> Self {
        match value {
            AssignmentError::UnknownAttendee(id) => Self::AttendeeNotFound(id),
            AssignmentError::Repo(err) => Self::from(err),
            // Partial failures only arise from per-attendee task writes,
            // which attendee use-cases never perform.
            other => Self::Repo(RepoError::InvalidData(other.to_string())),
        }
    }
}

/// Attendee service facade over repository implementations.
pub struct AttendeeService<R: AttendeeRepository, A: AssignmentRepository> {
    repo: R,
    assignments: AssignmentMaintainer<A>,
}

impl<R: AttendeeRepository, A: AssignmentRepository> AttendeeService<R, A> {
    pub fn new(repo: R, assignments: AssignmentMaintainer<A>) -> Self {
        Self { repo, assignments }
    }

    /// Creates one attendee from a validated draft.
    pub fn create(&self, draft: &AttendeeDraft) -> Result<Attendee, AttendeeServiceError> {
        draft.validate().map_err(AttendeeServiceError::Invalid)?;
        let attendee = Attendee::from_draft(draft);
        let id = self.repo.create_attendee(&attendee)?;
        info!("event=attendee_created module=attendee status=ok attendee={id}");
        self.repo
            .get_attendee(id)?
            .ok_or(AttendeeServiceError::InconsistentState(
                "created attendee not found in read-back",
            ))
    }

    /// Lists attendees in insertion order, task references included.
    pub fn list(&self) -> Result<Vec<Attendee>, AttendeeServiceError> {
        Ok(self.repo.list_attendees()?)
    }

    pub fn get(&self, id: AttendeeId) -> Result<Option<Attendee>, AttendeeServiceError> {
        Ok(self.repo.get_attendee(id)?)
    }

    /// Deletes one attendee and strips its id from every task that
    /// referenced it.
    pub fn delete(&self, id: AttendeeId) -> Result<(), AttendeeServiceError> {
        self.repo.delete_attendee(id)?;
        self.assignments.on_attendee_deleted(id)?;
        info!("event=attendee_deleted module=attendee status=ok attendee={id}");
        Ok(())
    }
}
