//! Explicit application bootstrap and teardown.
//!
//! # Responsibility
//! - Own the process's database connection and reminder scheduler.
//! - Hand out note services bound to them.
//!
//! # Invariants
//! - A failed open is returned as `StartupError`, never a panic.
//! - Nothing outside `App` holds the connection; screens borrow services.

use crate::config::AppConfig;
use crate::db::{open_db, open_db_in_memory, DbError};
use crate::logging::{init_logging, LoggingError};
use crate::reminder::center::NotificationCenter;
use crate::reminder::scheduler::ReminderScheduler;
use crate::repo::note_repo::{SqliteNoteRepository, StorageResult};
use crate::service::note_service::NoteService;
use log::{error, info};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum StartupError {
    Logging(LoggingError),
    /// The note database could not be opened or migrated.
    Store(DbError),
    /// The note database did not close cleanly.
    Teardown(DbError),
}

impl Display for StartupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Logging(err) => write!(f, "logging setup failed: {err}"),
            Self::Store(err) => write!(f, "note store failed to open: {err}"),
            Self::Teardown(err) => write!(f, "note store failed to close: {err}"),
        }
    }
}

impl Error for StartupError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Logging(err) => Some(err),
            Self::Store(err) | Self::Teardown(err) => Some(err),
        }
    }
}

/// One running application instance.
pub struct App<C: NotificationCenter> {
    conn: Connection,
    reminders: ReminderScheduler<C>,
}

impl<C: NotificationCenter> App<C> {
    /// Starts logging (when configured) and opens the note database.
    pub fn open(config: &AppConfig, center: C) -> Result<Self, StartupError> {
        if let Some(log_dir) = config.log_dir.as_deref() {
            init_logging(&config.log_level, log_dir).map_err(StartupError::Logging)?;
        }
        let conn = open_db(&config.db_path).map_err(|err| {
            error!("event=app_open module=app status=error error={err}");
            StartupError::Store(err)
        })?;
        info!("event=app_open module=app status=ok");
        Ok(Self::with_connection(conn, center))
    }

    /// Opens a throwaway in-memory instance.
    pub fn open_in_memory(center: C) -> Result<Self, StartupError> {
        let conn = open_db_in_memory().map_err(StartupError::Store)?;
        Ok(Self::with_connection(conn, center))
    }

    fn with_connection(conn: Connection, center: C) -> Self {
        Self {
            conn,
            reminders: ReminderScheduler::new(center),
        }
    }

    /// Note service bound to this instance's store and scheduler.
    pub fn notes(&self) -> StorageResult<NoteService<'_, SqliteNoteRepository<'_>, C>> {
        let repo = SqliteNoteRepository::try_new(&self.conn)?;
        Ok(NoteService::new(repo, &self.reminders))
    }

    pub fn reminders(&self) -> &ReminderScheduler<C> {
        &self.reminders
    }

    /// Closes the database connection.
    pub fn close(self) -> Result<(), StartupError> {
        self.conn
            .close()
            .map_err(|(_, err)| StartupError::Teardown(DbError::Sqlite(err)))?;
        info!("event=app_close module=app status=ok");
        Ok(())
    }
}
