//! Shared application state for HTTP handlers.
//!
//! Handlers lock the connection, build the per-request repository/service
//! stack from `eventboard_core`, run the synchronous operation and drop
//! the guard before responding. No guard is ever held across an await.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;

use crate::error::ApiError;

#[derive(Clone)]
pub struct AppState {
    db: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Wraps a migrated connection produced by `eventboard_core::db`.
    pub fn new(conn: Connection) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
        }
    }

    pub fn conn(&self) -> Result<MutexGuard<'_, Connection>, ApiError> {
        self.db
            .lock()
            .map_err(|_| ApiError::Internal("database lock poisoned".to_string()))
    }
}
