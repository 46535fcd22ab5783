//! Task/attendee reference-table contract and SQLite implementation.
//!
//! # Responsibility
//! - Own the `task_assignees` reference table that backs both
//!   `Task.assignedAttendees` and `Attendee.assignedTasks`.
//! - Provide the single-link primitives the relationship maintainer
//!   composes into invariant-preserving operations.
//!
//! # Invariants
//! - `link` is idempotent; re-linking an existing pair changes nothing.
//! - `unlink` is a no-op when the pair is absent.

use rusqlite::{params, Connection};

use crate::model::attendee::AttendeeId;
use crate::model::task::TaskId;
use crate::repo::RepoResult;

/// Persistence interface for task/attendee reference maintenance.
///
/// Kept as a trait seam so the maintainer's retry and partial-failure
/// policy can be exercised against scripted failing implementations.
pub trait AssignmentRepository {
    /// Records that `attendee` is assigned to `task`. Idempotent.
    fn link(&self, task: TaskId, attendee: AttendeeId) -> RepoResult<()>;
    /// Removes one assignment. No-op when the pair does not exist.
    fn unlink(&self, task: TaskId, attendee: AttendeeId) -> RepoResult<()>;
    /// Removes every assignment referencing `task`; returns the count.
    fn clear_task(&self, task: TaskId) -> RepoResult<usize>;
    /// Removes every assignment referencing `attendee`; returns the count.
    fn clear_attendee(&self, attendee: AttendeeId) -> RepoResult<usize>;
    /// Whether an attendee record with this id exists.
    fn attendee_exists(&self, attendee: AttendeeId) -> RepoResult<bool>;
}

/// SQLite-backed reference-table repository.
pub struct SqliteAssignmentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAssignmentRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl AssignmentRepository for SqliteAssignmentRepository<'_> {
    fn link(&self, task: TaskId, attendee: AttendeeId) -> RepoResult<()> {
        self.conn.execute(
            "INSERT OR IGNORE INTO task_assignees (task_uuid, attendee_uuid)
             VALUES (?1, ?2);",
            params![task.to_string(), attendee.to_string()],
        )?;
        Ok(())
    }

    fn unlink(&self, task: TaskId, attendee: AttendeeId) -> RepoResult<()> {
        self.conn.execute(
            "DELETE FROM task_assignees
             WHERE task_uuid = ?1 AND attendee_uuid = ?2;",
            params![task.to_string(), attendee.to_string()],
        )?;
        Ok(())
    }

    fn clear_task(&self, task: TaskId) -> RepoResult<usize> {
        let removed = self.conn.execute(
            "DELETE FROM task_assignees WHERE task_uuid = ?1;",
            [task.to_string()],
        )?;
        Ok(removed)
    }

    fn clear_attendee(&self, attendee: AttendeeId) -> RepoResult<usize> {
        let removed = self.conn.execute(
            "DELETE FROM task_assignees WHERE attendee_uuid = ?1;",
            [attendee.to_string()],
        )?;
        Ok(removed)
    }

    fn attendee_exists(&self, attendee: AttendeeId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM attendees WHERE uuid = ?1);",
            [attendee.to_string()],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }
}
