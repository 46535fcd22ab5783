//! Repository contracts and SQLite implementations.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the three record collections and the
//!   task/attendee reference table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Read paths must reject invalid persisted state instead of masking it.
//! - Reference lists are always resolved from storage by id; no record
//!   embeds a copy of another record.

use std::error::Error;
use std::fmt::{Display, Formatter};

use uuid::Uuid;

use crate::db::DbError;
use crate::model::ValidationError;

pub mod assignment_repo;
pub mod attendee_repo;
pub mod event_repo;
pub mod task_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    NotFound(Uuid),
    /// A unique-field constraint was violated (attendee email).
    Conflict {
        field: &'static str,
        value: String,
    },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::Conflict { field, value } => {
                write!(f, "duplicate value for unique field `{field}`: `{value}`")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

pub(crate) fn parse_uuid(value: &str, column: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {column}")))
}
