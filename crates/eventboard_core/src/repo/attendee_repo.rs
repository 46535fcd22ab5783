//! Attendee repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD persistence for the `attendees` collection.
//! - Surface the unique-email constraint as a conflict error.
//!
//! # Invariants
//! - `assigned_tasks` is always resolved from the reference table at read
//!   time, oldest assignment first; the attendee row itself never stores
//!   task ids.
//! - Email uniqueness is case-insensitive (storage-level index).

use rusqlite::{Connection, Row};

use crate::model::attendee::{Attendee, AttendeeId};
use crate::model::task::TaskId;
use crate::repo::{parse_uuid, RepoError, RepoResult};

/// Repository interface for attendee CRUD operations.
pub trait AttendeeRepository {
    /// Persists a new attendee. Fails with [`RepoError::Conflict`] when the
    /// email is already taken.
    fn create_attendee(&self, attendee: &Attendee) -> RepoResult<AttendeeId>;
    fn get_attendee(&self, id: AttendeeId) -> RepoResult<Option<Attendee>>;
    fn list_attendees(&self) -> RepoResult<Vec<Attendee>>;
    /// Deletes the attendee row only; reference cleanup is owned by the
    /// relationship maintainer.
    fn delete_attendee(&self, id: AttendeeId) -> RepoResult<()>;
}

/// SQLite-backed attendee repository.
pub struct SqliteAttendeeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAttendeeRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl AttendeeRepository for SqliteAttendeeRepository<'_> {
    fn create_attendee(&self, attendee: &Attendee) -> RepoResult<AttendeeId> {
        let inserted = self.conn.execute(
            "INSERT INTO attendees (uuid, name, email) VALUES (?1, ?2, ?3);",
            [
                attendee.id.to_string(),
                attendee.name.clone(),
                attendee.email.clone(),
            ],
        );

        match inserted {
            Ok(_) => Ok(attendee.id),
            // The only unique constraint on attendees is the email index;
            // uuids are freshly generated and never collide in practice.
            Err(rusqlite::Error::SqliteFailure(failure, _))
                if failure.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(RepoError::Conflict {
                    field: "email",
                    value: attendee.email.clone(),
                })
            }
            Err(err) => Err(err.into()),
        }
    }

    fn get_attendee(&self, id: AttendeeId) -> RepoResult<Option<Attendee>> {
        let mut stmt = self.conn.prepare(
            "SELECT uuid, name, email FROM attendees WHERE uuid = ?1;",
        )?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_attendee_row(self.conn, row)?));
        }

        Ok(None)
    }

    fn list_attendees(&self) -> RepoResult<Vec<Attendee>> {
        let mut stmt = self.conn.prepare(
            "SELECT uuid, name, email FROM attendees ORDER BY created_at ASC, uuid ASC;",
        )?;

        let mut rows = stmt.query([])?;
        let mut attendees = Vec::new();
        while let Some(row) = rows.next()? {
            attendees.push(parse_attendee_row(self.conn, row)?);
        }

        Ok(attendees)
    }

    fn delete_attendee(&self, id: AttendeeId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM attendees WHERE uuid = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_attendee_row(conn: &Connection, row: &Row<'_>) -> RepoResult<Attendee> {
    let uuid_text: String = row.get("uuid")?;
    let id = parse_uuid(&uuid_text, "attendees.uuid")?;
    let assigned_tasks = load_assigned_tasks(conn, &uuid_text)?;

    Ok(Attendee {
        id,
        name: row.get("name")?,
        email: row.get("email")?,
        assigned_tasks,
    })
}

fn load_assigned_tasks(conn: &Connection, attendee_uuid: &str) -> RepoResult<Vec<TaskId>> {
    let mut stmt = conn.prepare(
        "SELECT task_uuid
         FROM task_assignees
         WHERE attendee_uuid = ?1
         ORDER BY assigned_at ASC, rowid ASC;",
    )?;

    let mut rows = stmt.query([attendee_uuid])?;
    let mut tasks = Vec::new();
    while let Some(row) = rows.next()? {
        let value: String = row.get(0)?;
        tasks.push(parse_uuid(&value, "task_assignees.task_uuid")?);
    }

    Ok(tasks)
}
