//! Note domain model.
//!
//! # Responsibility
//! - Define the single persisted record behind list and detail screens.
//! - Own title defaulting and attachment/reminder field helpers.
//!
//! # Invariants
//! - `id` is stable and never reused for another note.
//! - `created_at` is set once at creation and never rewritten.
//! - `reminder_at.is_some()` is the only signal that an alert should exist.
//! - `title` is never empty once normalized.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Placeholder title used for new notes and blank renames.
pub const DEFAULT_NOTE_TITLE: &str = "New Note";

/// Stable identifier for a note.
///
/// Its string form doubles as the notification identifier.
pub type NoteId = Uuid;

/// Canonical note record.
///
/// Attachments are independent optional fields; a note may carry a photo,
/// a sketch and a reminder at the same time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    /// Free text body. `None` until the first detail save.
    pub body: Option<String>,
    /// Creation time in epoch milliseconds. Default sort key.
    pub created_at: i64,
    /// Reminder fire time in epoch milliseconds.
    pub reminder_at: Option<i64>,
    /// Encoded photo bytes, opaque to core.
    pub image_data: Option<Vec<u8>>,
    /// Serialized sketch blob, see [`crate::model::sketch::Sketch`].
    pub drawing_data: Option<Vec<u8>>,
}

impl Note {
    /// Creates an empty note stamped with the current time.
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4(), now_epoch_ms())
    }

    /// Creates an empty note with caller-provided identity and creation time.
    ///
    /// Used by seeding paths and tests that need deterministic ordering.
    pub fn with_id(id: NoteId, created_at: i64) -> Self {
        Self {
            id,
            title: DEFAULT_NOTE_TITLE.to_string(),
            body: None,
            created_at,
            reminder_at: None,
            image_data: None,
            drawing_data: None,
        }
    }

    /// Identifier under which this note's alert is registered.
    pub fn notification_id(&self) -> String {
        self.id.to_string()
    }

    pub fn has_reminder(&self) -> bool {
        self.reminder_at.is_some()
    }

    /// Body text or empty string.
    pub fn body_text(&self) -> &str {
        self.body.as_deref().unwrap_or("")
    }

    /// Sets the title, falling back to the placeholder for blank input.
    pub fn set_title(&mut self, title: &str) {
        self.title = normalize_title(title);
    }
}

impl Default for Note {
    fn default() -> Self {
        Self::new()
    }
}

/// List-screen projection of a note: no attachment bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteSummary {
    pub id: NoteId,
    pub title: String,
    pub body: Option<String>,
    pub created_at: i64,
    pub reminder_at: Option<i64>,
}

impl NoteSummary {
    pub fn body_text(&self) -> &str {
        self.body.as_deref().unwrap_or("")
    }
}

impl From<&Note> for NoteSummary {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id,
            title: note.title.clone(),
            body: note.body.clone(),
            created_at: note.created_at,
            reminder_at: note.reminder_at,
        }
    }
}

/// Trims a title and substitutes the placeholder when nothing remains.
pub fn normalize_title(title: &str) -> String {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        DEFAULT_NOTE_TITLE.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    Utc::now().timestamp_millis()
}
