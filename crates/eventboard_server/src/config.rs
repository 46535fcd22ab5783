//! Server configuration from environment variables.
//!
//! Every knob has a default so the binary starts with an empty
//! environment; missing variables are logged, invalid values abort
//! startup.

use std::{env, fmt::Display, str::FromStr};

use log::{info, warn};

pub struct Config {
    pub port: u16,
    /// SQLite database file.
    pub db_path: String,
    pub log_level: String,
    /// Directory for rotated log files; stderr-only when unset.
    pub log_dir: Option<String>,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("EVENTBOARD_PORT", "3000"),
            db_path: try_load("EVENTBOARD_DB", "eventboard.db"),
            log_level: try_load("EVENTBOARD_LOG_LEVEL", eventboard_core::default_log_level()),
            log_dir: env::var("EVENTBOARD_LOG_DIR").ok(),
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        info!("Environment variable {key} not found, using default");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}
