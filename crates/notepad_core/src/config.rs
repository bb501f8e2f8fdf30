//! Runtime configuration resolved from the environment.
//!
//! # Responsibility
//! - Resolve the database path and logging settings for one process.
//!
//! # Invariants
//! - Blank variables are treated as unset.
//! - Resolution never fails; invalid logging values surface later from
//!   [`crate::logging::init_logging`].

use crate::logging::default_log_level;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "NOTEPAD_DB_PATH";
pub const LOG_DIR_ENV: &str = "NOTEPAD_LOG_DIR";
pub const LOG_LEVEL_ENV: &str = "NOTEPAD_LOG_LEVEL";

const DEFAULT_DB_FILE_NAME: &str = "notepad.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    /// File logging is off when unset.
    pub log_dir: Option<PathBuf>,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            log_dir: None,
            log_level: default_log_level().to_string(),
        }
    }
}

impl AppConfig {
    /// Reads `NOTEPAD_*` variables from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let defaults = Self::default();
        Self {
            db_path: read(DB_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            log_dir: read(LOG_DIR_ENV).map(PathBuf::from),
            log_level: read(LOG_LEVEL_ENV).unwrap_or(defaults.log_level),
        }
    }
}
