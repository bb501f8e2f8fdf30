//! Note detail screen.
//!
//! # Responsibility
//! - Hold the body and reminder drafts for one note until explicit save.
//! - Commit photo and sketch attachments eagerly, as soon as they change.
//!
//! # Invariants
//! - Drafts are seeded from the stored note on open and never auto-committed.
//! - Attachment commits do not flush the body or reminder drafts.
//! - A denied reminder permission turns the toggle back off and leaves a notice.

use crate::model::note::{now_epoch_ms, Note, NoteId};
use crate::model::sketch::Sketch;
use crate::platform::photos::{PhotoPicker, PickError, PickRequest};
use crate::platform::share::SharePayload;
use crate::reminder::center::NotificationCenter;
use crate::repo::note_repo::NoteRepository;
use crate::service::note_service::{NoteService, NoteServiceResult, ReminderOutcome};
use crate::view::sketch::{load_note_sketch, SketchSession};
use log::{info, warn};

/// User-visible message produced by a detail action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailNotice {
    /// Save went through but alerts are not allowed; reminder was turned off.
    ReminderPermissionDenied,
}

/// Result of attaching a photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachOutcome {
    Attached,
    /// Picker dismissed or the selection was unusable; nothing changed.
    Cancelled,
}

/// Open detail screen for one note.
#[derive(Debug, Clone)]
pub struct DetailSession {
    note: Note,
    body: String,
    reminder_enabled: bool,
    reminder_at: i64,
    notice: Option<DetailNotice>,
}

impl DetailSession {
    /// Loads the note and seeds drafts from it.
    pub fn open<R: NoteRepository, C: NotificationCenter>(
        service: &NoteService<'_, R, C>,
        id: NoteId,
    ) -> NoteServiceResult<Self> {
        let note = service.get_note(id)?;
        Ok(Self::from_note(note))
    }

    /// Seeds drafts from an already loaded note.
    pub fn from_note(note: Note) -> Self {
        Self {
            body: note.body_text().to_string(),
            reminder_enabled: note.reminder_at.is_some(),
            reminder_at: note.reminder_at.unwrap_or_else(now_epoch_ms),
            notice: None,
            note,
        }
    }

    /// Last committed state of the note.
    pub fn note(&self) -> &Note {
        &self.note
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
    }

    pub fn is_reminder_enabled(&self) -> bool {
        self.reminder_enabled
    }

    pub fn toggle_reminder(&mut self) {
        self.reminder_enabled = !self.reminder_enabled;
    }

    pub fn set_reminder_enabled(&mut self, enabled: bool) {
        self.reminder_enabled = enabled;
    }

    /// Reminder picker value in epoch milliseconds.
    pub fn reminder_time(&self) -> i64 {
        self.reminder_at
    }

    pub fn set_reminder_time(&mut self, epoch_ms: i64) {
        self.reminder_at = epoch_ms;
    }

    pub fn notice(&self) -> Option<DetailNotice> {
        self.notice
    }

    /// Commits the body and reminder drafts, scheduling or cancelling the alert.
    ///
    /// The host returns to the list unless the outcome is
    /// `ReminderOutcome::PermissionDenied`, in which case it shows
    /// [`DetailSession::notice`].
    pub async fn save<R: NoteRepository, C: NotificationCenter>(
        &mut self,
        service: &NoteService<'_, R, C>,
    ) -> NoteServiceResult<ReminderOutcome> {
        let reminder_at = self.reminder_enabled.then_some(self.reminder_at);
        let (note, outcome) = service
            .save_body_and_reminder(self.note.id, &self.body, reminder_at)
            .await?;
        self.note = note;
        self.notice = None;
        if outcome == ReminderOutcome::PermissionDenied {
            self.reminder_enabled = false;
            self.notice = Some(DetailNotice::ReminderPermissionDenied);
        }
        Ok(outcome)
    }

    /// Presents the photo chooser and stores the chosen image immediately.
    pub async fn attach_photo<R, C, P>(
        &mut self,
        service: &NoteService<'_, R, C>,
        picker: &P,
    ) -> NoteServiceResult<AttachOutcome>
    where
        R: NoteRepository,
        C: NotificationCenter,
        P: PhotoPicker,
    {
        let picked = match picker.pick(&PickRequest::default()).await {
            Ok(photo) if !photo.bytes.is_empty() => photo,
            Ok(_) => {
                warn!("event=photo_pick module=view status=error error_code=empty_image");
                return Ok(AttachOutcome::Cancelled);
            }
            Err(PickError::NoSelectionMade) => return Ok(AttachOutcome::Cancelled),
            Err(PickError::LoadFailed(message)) => {
                warn!(
                    "event=photo_pick module=view status=error error_code=load_failed error={message}"
                );
                return Ok(AttachOutcome::Cancelled);
            }
        };

        self.note = service.set_photo(self.note.id, Some(picked.bytes))?;
        info!("event=photo_attach module=view status=ok");
        Ok(AttachOutcome::Attached)
    }

    /// Removes the photo immediately.
    pub fn delete_photo<R: NoteRepository, C: NotificationCenter>(
        &mut self,
        service: &NoteService<'_, R, C>,
    ) -> NoteServiceResult<()> {
        self.note = service.set_photo(self.note.id, None)?;
        Ok(())
    }

    /// Removes the sketch immediately.
    pub fn delete_sketch<R: NoteRepository, C: NotificationCenter>(
        &mut self,
        service: &NoteService<'_, R, C>,
    ) -> NoteServiceResult<()> {
        self.note = service.set_drawing(self.note.id, None)?;
        Ok(())
    }

    /// Decoded sketch for the inline preview; `None` hides the preview.
    pub fn sketch_preview(&self) -> Option<Sketch> {
        load_note_sketch(&self.note).ok().flatten()
    }

    /// Opens the canvas for this note.
    pub fn open_sketch(&self) -> SketchSession {
        SketchSession::open(&self.note)
    }

    /// Re-reads the stored note after a sketch save, keeping drafts.
    pub fn reload<R: NoteRepository, C: NotificationCenter>(
        &mut self,
        service: &NoteService<'_, R, C>,
    ) -> NoteServiceResult<()> {
        self.note = service.get_note(self.note.id)?;
        Ok(())
    }

    /// Share-sheet content for the current title, body draft and photo.
    pub fn share_payload(&self) -> SharePayload {
        SharePayload::for_note(&self.note, &self.body)
    }

    /// Deletes the note, cancelling its reminder, and closes the screen.
    pub fn delete<R: NoteRepository, C: NotificationCenter>(
        self,
        service: &NoteService<'_, R, C>,
    ) -> NoteServiceResult<()> {
        service.delete_note(self.note.id)
    }
}
