//! Note use-case service.
//!
//! # Responsibility
//! - Provide the single write path used by list, detail and sketch screens.
//! - Keep a note's stored `reminder_at` and its pending alert in step.
//!
//! # Invariants
//! - Every delete path cancels the alert keyed by `Note::notification_id()`.
//! - A stored `reminder_at` implies an alert was registered for it.
//! - Attachment setters commit immediately and touch no other field.
//!
//! # See also
//! - crate::view for the screen controllers built on top of this service.

use crate::model::note::{normalize_title, Note, NoteId, NoteSummary};
use crate::model::sketch::SketchError;
use crate::reminder::center::NotificationCenter;
use crate::reminder::scheduler::{ReminderError, ReminderScheduler};
use crate::reminder::trigger::CalendarTrigger;
use crate::repo::note_repo::{NoteRepository, StorageError, StorageResult};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    /// Target note does not exist.
    NoteNotFound(NoteId),
    /// Persistence-layer failure.
    Storage(StorageError),
    /// Reminder could not be registered for a reason other than permission.
    Reminder(ReminderError),
    /// Sketch strokes could not be encoded.
    Sketch(SketchError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::Storage(err) => write!(f, "{err}"),
            Self::Reminder(err) => write!(f, "{err}"),
            Self::Sketch(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent note state: {details}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Reminder(err) => Some(err),
            Self::Sketch(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StorageError> for NoteServiceError {
    fn from(value: StorageError) -> Self {
        match value {
            StorageError::NotFound(id) => Self::NoteNotFound(id),
            other => Self::Storage(other),
        }
    }
}

impl From<ReminderError> for NoteServiceError {
    fn from(value: ReminderError) -> Self {
        Self::Reminder(value)
    }
}

impl From<SketchError> for NoteServiceError {
    fn from(value: SketchError) -> Self {
        Self::Sketch(value)
    }
}

pub type NoteServiceResult<T> = Result<T, NoteServiceError>;

/// What happened to the reminder during a detail save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderOutcome {
    /// An alert is pending at the given calendar minute.
    Scheduled(CalendarTrigger),
    /// The reminder was switched off; no alert is pending.
    Cleared,
    /// The user declined alert permission; the reminder was switched off.
    PermissionDenied,
}

/// Note service facade over a repository and the process reminder scheduler.
pub struct NoteService<'s, R: NoteRepository, C: NotificationCenter> {
    repo: R,
    reminders: &'s ReminderScheduler<C>,
}

impl<'s, R: NoteRepository, C: NotificationCenter> NoteService<'s, R, C> {
    pub fn new(repo: R, reminders: &'s ReminderScheduler<C>) -> Self {
        Self { repo, reminders }
    }

    pub fn reminders(&self) -> &ReminderScheduler<C> {
        self.reminders
    }

    /// Creates one blank note stamped with the current time.
    pub fn create_note(&self) -> NoteServiceResult<Note> {
        self.insert(Note::new())
    }

    /// Gets one note by stable ID.
    pub fn get_note(&self, id: NoteId) -> NoteServiceResult<Note> {
        self.repo
            .get_note(id)?
            .ok_or(NoteServiceError::NoteNotFound(id))
    }

    /// Lists every note, oldest first, without attachment bytes.
    pub fn list_notes(&self) -> StorageResult<Vec<NoteSummary>> {
        self.repo.list_notes()
    }

    /// Replaces the title; blank input stores the placeholder.
    pub fn rename_note(&self, id: NoteId, title: &str) -> NoteServiceResult<Note> {
        let mut note = self.get_note(id)?;
        note.title = normalize_title(title);
        self.repo.update_note(&note)?;
        Ok(note)
    }

    /// Deletes a note and cancels its pending alert.
    ///
    /// The alert is cancelled even when the row is already gone.
    pub fn delete_note(&self, id: NoteId) -> NoteServiceResult<()> {
        let deleted = self.repo.delete_note(id);
        self.reminders.cancel(&id.to_string());
        deleted?;
        info!("event=note_delete module=service status=ok");
        Ok(())
    }

    /// Commits the body and reminder chosen on the detail screen.
    ///
    /// `reminder_at = None` clears the reminder. When permission is denied
    /// the body still commits and the stored reminder is cleared. If the
    /// commit fails, the alert state from before the call is restored.
    pub async fn save_body_and_reminder(
        &self,
        id: NoteId,
        body: &str,
        reminder_at: Option<i64>,
    ) -> NoteServiceResult<(Note, ReminderOutcome)> {
        let previous = self.get_note(id)?;
        let mut note = previous.clone();
        note.body = Some(body.to_string());
        let alert_id = note.notification_id();

        let outcome = match reminder_at {
            Some(at) => {
                let scheduled = self
                    .reminders
                    .schedule(&alert_id, &note.title, body, at)
                    .await;
                match scheduled {
                    Ok(trigger) => {
                        note.reminder_at = Some(at);
                        ReminderOutcome::Scheduled(trigger)
                    }
                    Err(ReminderError::PermissionDenied) => {
                        note.reminder_at = None;
                        ReminderOutcome::PermissionDenied
                    }
                    Err(err) => return Err(err.into()),
                }
            }
            None => {
                note.reminder_at = None;
                ReminderOutcome::Cleared
            }
        };

        if let Err(err) = self.repo.update_note(&note) {
            warn!("event=note_save module=service status=error error_code=commit_failed");
            if matches!(outcome, ReminderOutcome::Scheduled(_)) {
                self.restore_alert(&previous).await;
            }
            return Err(err.into());
        }

        if !matches!(outcome, ReminderOutcome::Scheduled(_)) {
            self.reminders.cancel(&alert_id);
        }
        info!(
            "event=note_save module=service status=ok reminder={}",
            note.has_reminder()
        );
        Ok((note, outcome))
    }

    /// Stores or clears the photo. Commits immediately.
    pub fn set_photo(&self, id: NoteId, image_data: Option<Vec<u8>>) -> NoteServiceResult<Note> {
        let mut note = self.get_note(id)?;
        note.image_data = image_data;
        self.repo.update_note(&note)?;
        Ok(note)
    }

    /// Stores or clears the sketch blob. Commits immediately.
    pub fn set_drawing(
        &self,
        id: NoteId,
        drawing_data: Option<Vec<u8>>,
    ) -> NoteServiceResult<Note> {
        let mut note = self.get_note(id)?;
        note.drawing_data = drawing_data;
        self.repo.update_note(&note)?;
        Ok(note)
    }

    /// Fills the store with `count` numbered sample notes.
    ///
    /// Notes share one creation instant; list order falls back to id.
    pub fn seed_samples(&self, count: usize) -> NoteServiceResult<Vec<NoteId>> {
        let created_at = crate::model::note::now_epoch_ms();
        let mut ids = Vec::with_capacity(count);
        for index in 1..=count {
            let mut note = Note::with_id(Uuid::new_v4(), created_at);
            note.title = format!("Sample Note {index}");
            ids.push(self.insert(note)?.id);
        }
        Ok(ids)
    }

    fn insert(&self, note: Note) -> NoteServiceResult<Note> {
        let id = self.repo.create_note(&note)?;
        self.repo
            .get_note(id)?
            .ok_or(NoteServiceError::InconsistentState(
                "created note not found in read-back",
            ))
    }

    async fn restore_alert(&self, previous: &Note) {
        let alert_id = previous.notification_id();
        match previous.reminder_at {
            Some(at) => {
                if let Err(err) = self
                    .reminders
                    .schedule(&alert_id, &previous.title, previous.body_text(), at)
                    .await
                {
                    warn!("event=reminder_restore module=service status=error error={err}");
                }
            }
            None => self.reminders.cancel(&alert_id),
        }
    }
}
