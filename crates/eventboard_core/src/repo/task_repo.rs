//! Task repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD persistence for the `tasks` collection.
//! - Keep the status enum's storage mapping private to this module.
//!
//! # Invariants
//! - `assigned_attendees` is always resolved from the reference table at
//!   read time, oldest assignment first; the task row never stores
//!   attendee ids.
//! - Listing follows natural insertion order.

use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};

use crate::model::event::EventId;
use crate::model::attendee::AttendeeId;
use crate::model::task::{Task, TaskId, TaskStatus};
use crate::repo::{parse_uuid, RepoError, RepoResult};

const TASK_SELECT_SQL: &str = "SELECT
    uuid,
    name,
    deadline,
    status,
    event_uuid
FROM tasks";

/// Repository interface for task CRUD operations.
pub trait TaskRepository {
    /// Persists the task row only; assignments are owned by the
    /// relationship maintainer.
    fn create_task(&self, task: &Task) -> RepoResult<TaskId>;
    /// Replaces the task's scalar fields (name, deadline, status, event).
    fn update_task(&self, task: &Task) -> RepoResult<()>;
    fn update_status(&self, id: TaskId, status: TaskStatus) -> RepoResult<()>;
    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>>;
    fn list_tasks(&self) -> RepoResult<Vec<Task>>;
    fn list_tasks_for_event(&self, event_id: EventId) -> RepoResult<Vec<Task>>;
    /// Deletes the task row only; reference cleanup is owned by the
    /// relationship maintainer.
    fn delete_task(&self, id: TaskId) -> RepoResult<()>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn create_task(&self, task: &Task) -> RepoResult<TaskId> {
        self.conn.execute(
            "INSERT INTO tasks (uuid, name, deadline, status, event_uuid)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                task.id.to_string(),
                task.name.as_str(),
                task.deadline.to_string(),
                status_to_db(task.status),
                task.event_id.map(|id| id.to_string()),
            ],
        )?;

        Ok(task.id)
    }

    fn update_task(&self, task: &Task) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE tasks
             SET
                name = ?1,
                deadline = ?2,
                status = ?3,
                event_uuid = ?4,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?5;",
            params![
                task.name.as_str(),
                task.deadline.to_string(),
                status_to_db(task.status),
                task.event_id.map(|id| id.to_string()),
                task.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(task.id));
        }

        Ok(())
    }

    fn update_status(&self, id: TaskId, status: TaskStatus) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE tasks
             SET
                status = ?1,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?2;",
            params![status_to_db(status), id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_task_row(self.conn, row)?));
        }

        Ok(None)
    }

    fn list_tasks(&self) -> RepoResult<Vec<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} ORDER BY created_at ASC, uuid ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(self.conn, row)?);
        }

        Ok(tasks)
    }

    fn list_tasks_for_event(&self, event_id: EventId) -> RepoResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TASK_SELECT_SQL} WHERE event_uuid = ?1 ORDER BY created_at ASC, uuid ASC;"
        ))?;

        let mut rows = stmt.query([event_id.to_string()])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(self.conn, row)?);
        }

        Ok(tasks)
    }

    fn delete_task(&self, id: TaskId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE uuid = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_task_row(conn: &Connection, row: &Row<'_>) -> RepoResult<Task> {
    let uuid_text: String = row.get("uuid")?;
    let id = parse_uuid(&uuid_text, "tasks.uuid")?;

    let deadline_text: String = row.get("deadline")?;
    let deadline = deadline_text.parse::<NaiveDate>().map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid deadline value `{deadline_text}` in tasks.deadline"
        ))
    })?;

    let status_text: String = row.get("status")?;
    let status = parse_status(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid status value `{status_text}` in tasks.status"))
    })?;

    let event_id = match row.get::<_, Option<String>>("event_uuid")? {
        Some(value) => Some(parse_uuid(&value, "tasks.event_uuid")?),
        None => None,
    };

    let assigned_attendees = load_assigned_attendees(conn, &uuid_text)?;

    Ok(Task {
        id,
        name: row.get("name")?,
        deadline,
        assigned_attendees,
        status,
        event_id,
    })
}

fn load_assigned_attendees(conn: &Connection, task_uuid: &str) -> RepoResult<Vec<AttendeeId>> {
    let mut stmt = conn.prepare(
        "SELECT attendee_uuid
         FROM task_assignees
         WHERE task_uuid = ?1
         ORDER BY assigned_at ASC, rowid ASC;",
    )?;

    let mut rows = stmt.query([task_uuid])?;
    let mut attendees = Vec::new();
    while let Some(row) = rows.next()? {
        let value: String = row.get(0)?;
        attendees.push(parse_uuid(&value, "task_assignees.attendee_uuid")?);
    }

    Ok(attendees)
}

fn status_to_db(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Pending => "pending",
        TaskStatus::InProgress => "in_progress",
        TaskStatus::Done => "done",
    }
}

fn parse_status(value: &str) -> Option<TaskStatus> {
    match value {
        "pending" => Some(TaskStatus::Pending),
        "in_progress" => Some(TaskStatus::InProgress),
        "done" => Some(TaskStatus::Done),
        _ => None,
    }
}
