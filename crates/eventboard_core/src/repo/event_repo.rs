//! Event repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD persistence for the `events` collection.
//!
//! # Invariants
//! - Events carry no references to other collections; deletion is a plain
//!   row delete with no cascade obligations.
//! - Listing follows natural insertion order.

use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};

use crate::model::event::{Event, EventId};
use crate::repo::{parse_uuid, RepoError, RepoResult};

const EVENT_SELECT_SQL: &str = "SELECT
    uuid,
    name,
    description,
    location,
    date
FROM events";

/// Repository interface for event CRUD operations.
pub trait EventRepository {
    fn create_event(&self, event: &Event) -> RepoResult<EventId>;
    fn update_event(&self, event: &Event) -> RepoResult<()>;
    fn get_event(&self, id: EventId) -> RepoResult<Option<Event>>;
    fn list_events(&self) -> RepoResult<Vec<Event>>;
    fn delete_event(&self, id: EventId) -> RepoResult<()>;
}

/// SQLite-backed event repository.
pub struct SqliteEventRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEventRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl EventRepository for SqliteEventRepository<'_> {
    fn create_event(&self, event: &Event) -> RepoResult<EventId> {
        self.conn.execute(
            "INSERT INTO events (uuid, name, description, location, date)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                event.id.to_string(),
                event.name.as_str(),
                event.description.as_deref(),
                event.location.as_deref(),
                event.date.map(|date| date.to_string()),
            ],
        )?;

        Ok(event.id)
    }

    fn update_event(&self, event: &Event) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE events
             SET
                name = ?1,
                description = ?2,
                location = ?3,
                date = ?4,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?5;",
            params![
                event.name.as_str(),
                event.description.as_deref(),
                event.location.as_deref(),
                event.date.map(|date| date.to_string()),
                event.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(event.id));
        }

        Ok(())
    }

    fn get_event(&self, id: EventId) -> RepoResult<Option<Event>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EVENT_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_event_row(row)?));
        }

        Ok(None)
    }

    fn list_events(&self) -> RepoResult<Vec<Event>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EVENT_SELECT_SQL} ORDER BY created_at ASC, uuid ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut events = Vec::new();
        while let Some(row) = rows.next()? {
            events.push(parse_event_row(row)?);
        }

        Ok(events)
    }

    fn delete_event(&self, id: EventId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM events WHERE uuid = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_event_row(row: &Row<'_>) -> RepoResult<Event> {
    let uuid_text: String = row.get("uuid")?;
    let id = parse_uuid(&uuid_text, "events.uuid")?;

    let date = match row.get::<_, Option<String>>("date")? {
        Some(value) => Some(value.parse::<NaiveDate>().map_err(|_| {
            RepoError::InvalidData(format!("invalid date value `{value}` in events.date"))
        })?),
        None => None,
    };

    Ok(Event {
        id,
        name: row.get("name")?,
        description: row.get("description")?,
        location: row.get("location")?,
        date,
    })
}
