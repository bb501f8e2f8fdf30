//! Note repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/read/update/delete over the `notes` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Each mutating call is one statement: a note is fully written or unchanged.
//! - Mutating failures surface as `StorageError::CommitFailed`.
//! - `list_notes` order is `created_at ASC, uuid ASC`; it never reads
//!   attachment blobs.
//! - Read paths reject invalid persisted rows instead of masking them.

use crate::db::DbError;
use crate::model::note::{Note, NoteId, NoteSummary};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const NOTE_SUMMARY_SELECT_SQL: &str = "SELECT
    uuid,
    title,
    body,
    created_at,
    reminder_at
FROM notes";

const NOTE_SELECT_SQL: &str = "SELECT
    uuid,
    title,
    body,
    created_at,
    reminder_at,
    image_data,
    drawing_data
FROM notes";

pub type StorageResult<T> = Result<T, StorageError>;

/// Store error for note persistence and query operations.
#[derive(Debug)]
pub enum StorageError {
    /// A write did not commit; the stored note is unchanged.
    CommitFailed(DbError),
    /// A read failed at the database layer.
    Db(DbError),
    NotFound(NoteId),
    InvalidData(String),
}

impl StorageError {
    fn commit(err: rusqlite::Error) -> Self {
        Self::CommitFailed(DbError::Sqlite(err))
    }
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CommitFailed(err) => write!(f, "note commit failed: {err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted note data: {message}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CommitFailed(err) | Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for note CRUD operations.
pub trait NoteRepository {
    fn create_note(&self, note: &Note) -> StorageResult<NoteId>;
    fn get_note(&self, id: NoteId) -> StorageResult<Option<Note>>;
    /// Returns every note, oldest first.
    fn list_notes(&self) -> StorageResult<Vec<NoteSummary>>;
    /// Replaces all mutable fields of an existing note.
    fn update_note(&self, note: &Note) -> StorageResult<()>;
    fn delete_note(&self, id: NoteId) -> StorageResult<()>;
}

/// SQLite-backed note repository.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// Fails with `InvalidData` when the `notes` table is missing, which
    /// means the connection did not come from [`crate::db::open_db`].
    pub fn try_new(conn: &'conn Connection) -> StorageResult<Self> {
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = 'notes'
            );",
            [],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(StorageError::InvalidData(
                "required table `notes` is missing".to_string(),
            ));
        }
        Ok(Self { conn })
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn create_note(&self, note: &Note) -> StorageResult<NoteId> {
        self.conn
            .execute(
                "INSERT INTO notes (
                    uuid,
                    title,
                    body,
                    created_at,
                    reminder_at,
                    image_data,
                    drawing_data
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
                params![
                    note.id.to_string(),
                    note.title.as_str(),
                    note.body.as_deref(),
                    note.created_at,
                    note.reminder_at,
                    note.image_data.as_deref(),
                    note.drawing_data.as_deref(),
                ],
            )
            .map_err(StorageError::commit)?;

        Ok(note.id)
    }

    fn get_note(&self, id: NoteId) -> StorageResult<Option<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_note_row(row)?));
        }
        Ok(None)
    }

    fn list_notes(&self) -> StorageResult<Vec<NoteSummary>> {
        let mut stmt = self.conn.prepare(&format!(
            "{NOTE_SUMMARY_SELECT_SQL} ORDER BY created_at ASC, uuid ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(parse_summary_row(row)?);
        }
        Ok(notes)
    }

    fn update_note(&self, note: &Note) -> StorageResult<()> {
        let changed = self
            .conn
            .execute(
                "UPDATE notes
                 SET
                    title = ?2,
                    body = ?3,
                    reminder_at = ?4,
                    image_data = ?5,
                    drawing_data = ?6,
                    updated_at = (strftime('%s', 'now') * 1000)
                 WHERE uuid = ?1;",
                params![
                    note.id.to_string(),
                    note.title.as_str(),
                    note.body.as_deref(),
                    note.reminder_at,
                    note.image_data.as_deref(),
                    note.drawing_data.as_deref(),
                ],
            )
            .map_err(StorageError::commit)?;

        if changed == 0 {
            return Err(StorageError::NotFound(note.id));
        }
        Ok(())
    }

    fn delete_note(&self, id: NoteId) -> StorageResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM notes WHERE uuid = ?1;", [id.to_string()])
            .map_err(StorageError::commit)?;

        if changed == 0 {
            return Err(StorageError::NotFound(id));
        }
        Ok(())
    }
}

fn parse_summary_row(row: &Row<'_>) -> StorageResult<NoteSummary> {
    let uuid_text: String = row.get("uuid")?;
    let id = Uuid::parse_str(&uuid_text).map_err(|_| {
        StorageError::InvalidData(format!("invalid uuid value `{uuid_text}` in notes.uuid"))
    })?;

    let title: String = row.get("title")?;
    if title.trim().is_empty() {
        return Err(StorageError::InvalidData(format!(
            "empty title for note `{uuid_text}`"
        )));
    }

    Ok(NoteSummary {
        id,
        title,
        body: row.get("body")?,
        created_at: row.get("created_at")?,
        reminder_at: row.get("reminder_at")?,
    })
}

fn parse_note_row(row: &Row<'_>) -> StorageResult<Note> {
    let summary = parse_summary_row(row)?;
    Ok(Note {
        id: summary.id,
        title: summary.title,
        body: summary.body,
        created_at: summary.created_at,
        reminder_at: summary.reminder_at,
        image_data: row.get("image_data")?,
        drawing_data: row.get("drawing_data")?,
    })
}
