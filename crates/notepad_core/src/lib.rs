//! Core domain logic for the notepad app.
//! This crate is the single source of truth for note invariants; host shells
//! provide the UI and the platform capabilities behind its traits.

pub mod app;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod platform;
pub mod reminder;
pub mod repo;
pub mod service;
pub mod view;

pub use app::{App, StartupError};
pub use config::AppConfig;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::note::{Note, NoteId, NoteSummary, DEFAULT_NOTE_TITLE};
pub use model::sketch::{InkColor, InkTool, Sketch, SketchError, Stroke, StrokePoint};
pub use platform::photos::{PhotoPicker, PickError, PickRequest, PickedPhoto};
pub use platform::share::SharePayload;
pub use reminder::center::{
    AlertRequest, AuthorizationStatus, InMemoryNotificationCenter, NotificationCenter,
};
pub use reminder::scheduler::{ReminderError, ReminderScheduler};
pub use reminder::trigger::CalendarTrigger;
pub use repo::note_repo::{NoteRepository, SqliteNoteRepository, StorageError, StorageResult};
pub use service::note_service::{NoteService, NoteServiceError, ReminderOutcome};
pub use view::detail::{AttachOutcome, DetailNotice, DetailSession};
pub use view::list::{filter_notes, NoteList, NoteRow, TitleEdit};
pub use view::sketch::SketchSession;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
