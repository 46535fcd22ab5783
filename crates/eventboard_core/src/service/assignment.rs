//! Relationship maintainer for the task/attendee reference invariant.
//!
//! # Responsibility
//! - Keep `Task.assignedAttendees` and `Attendee.assignedTasks` mutually
//!   consistent on every task create/update/delete and attendee delete.
//! - Apply the recovery policy for per-attendee write failures: bounded
//!   retries, then a partial-failure error naming the ids left un-updated.
//!
//! # Invariants
//! - Assign is idempotent; re-assigning never duplicates a reference.
//! - Unassign is a no-op for pairs that are already absent.
//! - After `on_task_deleted`/`on_attendee_deleted` no reference to the
//!   deleted id survives.
//!
//! This is the one place where a bug silently corrupts data (orphaned
//! references only visible when resolving names for display), so it is an
//! explicit component rather than inline mutation logic.

use std::error::Error;
use std::fmt::{Display, Formatter};

use log::{info, warn};

use crate::model::attendee::AttendeeId;
use crate::model::task::TaskId;
use crate::repo::assignment_repo::AssignmentRepository;
use crate::repo::RepoError;

/// Attempts per attendee write before it is reported as failed.
const MAX_WRITE_ATTEMPTS: u32 = 3;

/// Error produced by relationship maintenance.
#[derive(Debug)]
pub enum AssignmentError {
    /// A referenced attendee id does not resolve to a record.
    UnknownAttendee(AttendeeId),
    /// Some per-attendee writes kept failing after retries. The writes
    /// that succeeded stay in place; `failed` names the rest.
    Partial {
        task_id: TaskId,
        failed: Vec<AttendeeId>,
    },
    Repo(RepoError),
}

impl Display for AssignmentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownAttendee(id) => write!(f, "attendee not found: {id}"),
            Self::Partial { task_id, failed } => {
                let ids = failed
                    .iter()
                    .map(|id| id.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(
                    f,
                    "task {task_id} persisted but assignment updates failed for attendees: {ids}"
                )
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AssignmentError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for AssignmentError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Maintains the bidirectional task/attendee reference lists.
pub struct AssignmentMaintainer<R: AssignmentRepository> {
    repo: R,
}

impl<R: AssignmentRepository> AssignmentMaintainer<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Consumes the maintainer and returns the underlying repository.
    pub fn into_inner(self) -> R {
        self.repo
    }

    /// Verifies that every id resolves to an attendee record.
    ///
    /// Reference checks run before the task row is written so a bogus id
    /// fails the whole request instead of producing a half-linked task.
    pub fn ensure_attendees_exist(&self, ids: &[AttendeeId]) -> Result<(), AssignmentError> {
        for &id in ids {
            if !self.repo.attendee_exists(id)? {
                return Err(AssignmentError::UnknownAttendee(id));
            }
        }
        Ok(())
    }

    /// Ensures each attendee's task list contains `task_id` exactly once.
    pub fn assign(&self, task_id: TaskId, ids: &[AttendeeId]) -> Result<(), AssignmentError> {
        self.apply(task_id, ids, "assign", |attendee| {
            self.repo.link(task_id, attendee)
        })
    }

    /// Removes `task_id` from each attendee's task list; absent pairs are
    /// left alone.
    pub fn unassign(&self, task_id: TaskId, ids: &[AttendeeId]) -> Result<(), AssignmentError> {
        self.apply(task_id, ids, "unassign", |attendee| {
            self.repo.unlink(task_id, attendee)
        })
    }

    /// Cascade for task deletion: strips the task id from every attendee
    /// that referenced it.
    pub fn on_task_deleted(&self, task_id: TaskId) -> Result<(), AssignmentError> {
        let removed = self.repo.clear_task(task_id)?;
        info!(
            "event=assignments_cleared module=assignment status=ok task={task_id} removed={removed}"
        );
        Ok(())
    }

    /// Cascade for attendee deletion: strips the attendee id from every
    /// task that referenced it.
    pub fn on_attendee_deleted(&self, attendee_id: AttendeeId) -> Result<(), AssignmentError> {
        let removed = self.repo.clear_attendee(attendee_id)?;
        info!(
            "event=assignments_cleared module=assignment status=ok attendee={attendee_id} removed={removed}"
        );
        Ok(())
    }

    // Per-attendee writes are independent single-row statements, so one
    // failing attendee must not abort the rest. Failed ids are retried up
    // to MAX_WRITE_ATTEMPTS, then reported.
    fn apply(
        &self,
        task_id: TaskId,
        ids: &[AttendeeId],
        op: &str,
        write: impl Fn(AttendeeId) -> Result<(), RepoError>,
    ) -> Result<(), AssignmentError> {
        let mut failed = Vec::new();

        for &attendee in ids {
            let mut outcome = write(attendee);
            let mut attempt = 1;
            while outcome.is_err() && attempt < MAX_WRITE_ATTEMPTS {
                attempt += 1;
                warn!(
                    "event=assignment_retry module=assignment status=retry op={op} task={task_id} attendee={attendee} attempt={attempt}"
                );
                outcome = write(attendee);
            }

            if let Err(err) = outcome {
                warn!(
                    "event=assignment_write module=assignment status=error op={op} task={task_id} attendee={attendee} error={err}"
                );
                failed.push(attendee);
            }
        }

        if failed.is_empty() {
            Ok(())
        } else {
            Err(AssignmentError::Partial { task_id, failed })
        }
    }
}
