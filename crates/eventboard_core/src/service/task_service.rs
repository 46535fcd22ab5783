//! Task use-case service.
//!
//! # Responsibility
//! - Validate and persist task lifecycle operations.
//! - Delegate all reference mutation to the relationship maintainer.
//!
//! # Invariants
//! - A task is created with at least one assigned attendee, every one of
//!   which exists before the task row is written.
//! - Status defaults to `Pending`; unknown status strings never reach
//!   storage.
//! - Immediately after create/update, every id in the task's attendee set
//!   has the task's id in its own `assignedTasks`.

use std::error::Error;
use std::fmt::{Display, Formatter};

use log::info;

use crate::model::attendee::AttendeeId;
use crate::model::event::EventId;
use crate::model::task::{Task, TaskDraft, TaskId, TaskStatus, TaskUpdate};
use crate::model::ValidationError;
use crate::repo::assignment_repo::AssignmentRepository;
use crate::repo::task_repo::TaskRepository;
use crate::repo::RepoError;
use crate::service::assignment::{AssignmentError, AssignmentMaintainer};

/// Service error for task use-cases.
#[derive(Debug)]
pub enum TaskServiceError {
    Invalid(ValidationError),
    TaskNotFound(TaskId),
    /// A referenced attendee id does not resolve to a record.
    UnknownAttendee(AttendeeId),
    /// The task row was persisted but some attendee reference updates kept
    /// failing after retries; `failed` names the attendees not updated.
    PartialAssignment {
        task_id: TaskId,
        failed: Vec<AttendeeId>,
    },
    Repo(RepoError),
    /// Write/read-back mismatch.
    InconsistentState(&'static str),
}

impl Display for TaskServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid(err) => write!(f, "{err}"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::UnknownAttendee(id) => write!(f, "attendee not found: {id}"),
            Self::PartialAssignment { task_id, failed } => {
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
            Self::InconsistentState(details) => write!(f, "inconsistent task state: {details}"),
        }
    }
}

impl Error for TaskServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Invalid(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for TaskServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::TaskNotFound(id),
            RepoError::Validation(err) => Self::Invalid(err),
            other => Self::Repo(other),
        }
    }
}

impl From<AssignmentError> for TaskServiceError {
    fn from(value: AssignmentError) -> Self {
        match value {
            AssignmentError::UnknownAttendee(id) => Self::UnknownAttendee(id),
            AssignmentError::Partial { task_id, failed } => {
                Self::PartialAssignment { task_id, failed }
            }
            AssignmentError::Repo(err) => Self::from(err),
        }
    }
}

/// Task service facade over repository implementations.
pub struct TaskService<T: TaskRepository, A: AssignmentRepository> {
    repo: T,
    assignments: AssignmentMaintainer<A>,
}

impl<T: TaskRepository, A: AssignmentRepository> TaskService<T, A> {
    pub fn new(repo: T, assignments: AssignmentMaintainer<A>) -> Self {
        Self { repo, assignments }
    }

    /// Creates one task and assigns it to every listed attendee.
    ///
    /// # Contract
    /// - Requires a non-blank name, a deadline and a non-empty attendee
    ///   set; duplicates in the set are collapsed, first occurrence wins.
    /// - Status defaults to `Pending` when the draft omits it.
    /// - Returns the created task with its generated id and resolved
    ///   attendee references.
    pub fn create(&self, draft: &TaskDraft) -> Result<Task, TaskServiceError> {
        let (deadline, status) = draft.validate().map_err(TaskServiceError::Invalid)?;
        let attendees = dedupe_ids(&draft.assigned_attendees);
        self.assignments.ensure_attendees_exist(&attendees)?;

        let task = Task {
            id: uuid::Uuid::new_v4(),
            name: draft.name.trim().to_string(),
            deadline,
            assigned_attendees: Vec::new(),
            status,
            event_id: draft.event_id,
        };
        let id = self.repo.create_task(&task)?;
        self.assignments.assign(id, &attendees)?;
        info!(
            "event=task_created module=task status=ok task={id} attendees={}",
            attendees.len()
        );

        self.read_back(id, "created task not found in read-back")
    }

    /// Lists every task in insertion order.
    pub fn list_all(&self) -> Result<Vec<Task>, TaskServiceError> {
        Ok(self.repo.list_tasks()?)
    }

    /// Lists tasks grouped under one event context; unknown event ids
    /// simply produce an empty list.
    pub fn list_by_event(&self, event_id: EventId) -> Result<Vec<Task>, TaskServiceError> {
        Ok(self.repo.list_tasks_for_event(event_id)?)
    }

    pub fn get(&self, id: TaskId) -> Result<Option<Task>, TaskServiceError> {
        Ok(self.repo.get_task(id)?)
    }

    /// Persists a new status parsed from its wire representation.
    ///
    /// Attendee assignments are untouched. Unknown status strings fail
    /// validation and leave the stored status unchanged.
    pub fn update_status(&self, id: TaskId, status: &str) -> Result<Task, TaskServiceError> {
        let status = TaskStatus::parse(status).map_err(TaskServiceError::Invalid)?;
        self.repo.update_status(id, status)?;
        self.read_back(id, "updated task not found in read-back")
    }

    /// Applies a partial update; omitted fields keep their stored value.
    ///
    /// When the update replaces the attendee set, removed attendees are
    /// unassigned and added ones assigned, keeping both reference lists
    /// consistent. The replacement set must not be empty.
    pub fn update(&self, id: TaskId, update: &TaskUpdate) -> Result<Task, TaskServiceError> {
        let current = self
            .repo
            .get_task(id)?
            .ok_or(TaskServiceError::TaskNotFound(id))?;

        let status = match update.status.as_deref() {
            Some(value) => TaskStatus::parse(value).map_err(TaskServiceError::Invalid)?,
            None => current.status,
        };
        let name = match &update.name {
            Some(value) => {
                if value.trim().is_empty() {
                    return Err(TaskServiceError::Invalid(ValidationError::MissingField(
                        "name",
                    )));
                }
                value.trim().to_string()
            }
            None => current.name.clone(),
        };

        let replacement = match &update.assigned_attendees {
            Some(ids) => {
                let deduped = dedupe_ids(ids);
                if deduped.is_empty() {
                    return Err(TaskServiceError::Invalid(
                        ValidationError::NoAssignedAttendees,
                    ));
                }
                self.assignments.ensure_attendees_exist(&deduped)?;
                Some(deduped)
            }
            None => None,
        };

        let task = Task {
            id,
            name,
            deadline: update.deadline.unwrap_or(current.deadline),
            assigned_attendees: Vec::new(),
            status,
            event_id: update.event_id.or(current.event_id),
        };
        self.repo.update_task(&task)?;

        if let Some(next) = replacement {
            let removed: Vec<AttendeeId> = current
                .assigned_attendees
                .iter()
                .copied()
                .filter(|id| !next.contains(id))
                .collect();
            let added: Vec<AttendeeId> = next
                .iter()
                .copied()
                .filter(|id| !current.assigned_attendees.contains(id))
                .collect();

            self.assignments.unassign(id, &removed)?;
            self.assignments.assign(id, &added)?;
        }

        self.read_back(id, "updated task not found in read-back")
    }

    /// Deletes one task and strips its id from every attendee that
    /// referenced it.
    ///
    /// The row goes first: if the link cleanup is interrupted, leftover
    /// links point at a dead task and resolve to nothing, which is
    /// recoverable; the reverse order could leave a live task half
    /// unassigned.
    pub fn delete(&self, id: TaskId) -> Result<(), TaskServiceError> {
        self.repo.delete_task(id)?;
        self.assignments.on_task_deleted(id)?;
        info!("event=task_deleted module=task status=ok task={id}");
        Ok(())
    }

    fn read_back(&self, id: TaskId, details: &'static str) -> Result<Task, TaskServiceError> {
        self.repo
            .get_task(id)?
            .ok_or(TaskServiceError::InconsistentState(details))
    }
}

/// Collapses duplicate ids, first occurrence wins.
fn dedupe_ids(ids: &[AttendeeId]) -> Vec<AttendeeId> {
    let mut seen = std::collections::HashSet::new();
    ids.iter()
        .copied()
        .filter(|id| seen.insert(*id))
        .collect()
}
