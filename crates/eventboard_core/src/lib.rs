//! Core domain logic for the eventboard backend.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::attendee::{Attendee, AttendeeDraft, AttendeeId};
pub use model::event::{Event, EventDraft, EventId};
pub use model::task::{Task, TaskDraft, TaskId, TaskStatus, TaskUpdate};
pub use model::ValidationError;
pub use repo::assignment_repo::{AssignmentRepository, SqliteAssignmentRepository};
pub use repo::attendee_repo::{AttendeeRepository, SqliteAttendeeRepository};
pub use repo::event_repo::{EventRepository, SqliteEventRepository};
pub use repo::task_repo::{SqliteTaskRepository, TaskRepository};
pub use repo::{RepoError, RepoResult};
pub use service::assignment::{AssignmentError, AssignmentMaintainer};
pub use service::attendee_service::{AttendeeService, AttendeeServiceError};
pub use service::event_service::{EventService, EventServiceError};
pub use service::task_service::{TaskService, TaskServiceError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
