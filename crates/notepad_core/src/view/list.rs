//! Note list screen.
//!
//! # Responsibility
//! - Present all notes oldest first, optionally narrowed by a search string.
//! - Host the add, edit-title and delete row actions.
//!
//! # Invariants
//! - Filtering is a pure projection of the loaded notes; nothing is persisted.
//! - Row positions passed to `delete_at` refer to the visible (filtered) rows.

use crate::model::note::{Note, NoteId, NoteSummary};
use crate::reminder::center::NotificationCenter;
use crate::repo::note_repo::NoteRepository;
use crate::service::note_service::{NoteService, NoteServiceResult};
use chrono::{Local, TimeZone};
use std::collections::BTreeSet;

const ROW_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One rendered list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRow {
    pub id: NoteId,
    pub title: String,
    pub created_at: i64,
    pub reminder_at: Option<i64>,
}

impl NoteRow {
    fn from_summary(note: &NoteSummary) -> Self {
        Self {
            id: note.id,
            title: note.title.clone(),
            created_at: note.created_at,
            reminder_at: note.reminder_at,
        }
    }

    /// Whether the row shows the reminder bell.
    pub fn has_bell(&self) -> bool {
        self.reminder_at.is_some()
    }

    pub fn created_label(&self) -> String {
        format_timestamp(self.created_at)
    }

    pub fn reminder_label(&self) -> Option<String> {
        self.reminder_at.map(format_timestamp)
    }
}

/// Formats epoch milliseconds as local date and time.
pub fn format_timestamp(epoch_ms: i64) -> String {
    match Local.timestamp_millis_opt(epoch_ms).single() {
        Some(local) => local.format(ROW_TIME_FORMAT).to_string(),
        None => String::from("-"),
    }
}

/// Returns notes whose title or body contains `search`, ignoring case.
///
/// An empty search returns every note. Input order is preserved.
pub fn filter_notes<'a>(notes: &'a [NoteSummary], search: &str) -> Vec<&'a NoteSummary> {
    if search.is_empty() {
        return notes.iter().collect();
    }
    let needle = search.to_lowercase();
    notes
        .iter()
        .filter(|note| {
            note.title.to_lowercase().contains(&needle)
                || note.body_text().to_lowercase().contains(&needle)
        })
        .collect()
}

/// Pending inline title edit for one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleEdit {
    note_id: NoteId,
    /// Text field contents, seeded with the current title.
    pub draft: String,
}

impl TitleEdit {
    pub fn note_id(&self) -> NoteId {
        self.note_id
    }

    /// Commits the draft title.
    pub fn confirm<R: NoteRepository, C: NotificationCenter>(
        self,
        service: &NoteService<'_, R, C>,
    ) -> NoteServiceResult<Note> {
        service.rename_note(self.note_id, &self.draft)
    }

    /// Discards the draft.
    pub fn cancel(self) {}
}

/// List screen state: loaded notes plus the search field.
#[derive(Debug, Clone, Default)]
pub struct NoteList {
    notes: Vec<NoteSummary>,
    search: String,
}

impl NoteList {
    /// Loads every note from the store.
    pub fn load<R: NoteRepository, C: NotificationCenter>(
        service: &NoteService<'_, R, C>,
    ) -> NoteServiceResult<Self> {
        let mut list = Self::default();
        list.refresh(service)?;
        Ok(list)
    }

    /// Re-reads the store, keeping the current search.
    pub fn refresh<R: NoteRepository, C: NotificationCenter>(
        &mut self,
        service: &NoteService<'_, R, C>,
    ) -> NoteServiceResult<()> {
        self.notes = service.list_notes()?;
        Ok(())
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
    }

    /// Rows matching the current search, oldest first.
    pub fn visible_rows(&self) -> Vec<NoteRow> {
        filter_notes(&self.notes, &self.search)
            .into_iter()
            .map(NoteRow::from_summary)
            .collect()
    }

    /// Creates a blank note and reloads so it lands in sort position.
    pub fn add_note<R: NoteRepository, C: NotificationCenter>(
        &mut self,
        service: &NoteService<'_, R, C>,
    ) -> NoteServiceResult<NoteId> {
        let note = service.create_note()?;
        self.refresh(service)?;
        Ok(note.id)
    }

    /// Opens the inline title editor for `id`, if the note is loaded.
    pub fn begin_title_edit(&self, id: NoteId) -> Option<TitleEdit> {
        self.notes
            .iter()
            .find(|note| note.id == id)
            .map(|note| TitleEdit {
                note_id: note.id,
                draft: note.title.clone(),
            })
    }

    /// Deletes one note (cancelling its reminder) and reloads.
    pub fn delete_note<R: NoteRepository, C: NotificationCenter>(
        &mut self,
        service: &NoteService<'_, R, C>,
        id: NoteId,
    ) -> NoteServiceResult<()> {
        service.delete_note(id)?;
        self.refresh(service)
    }

    /// Deletes the visible rows at `offsets`; out-of-range and repeated
    /// positions are ignored.
    ///
    /// The list is reloaded even when a delete fails, so rows already removed
    /// disappear before the error is returned.
    pub fn delete_at<R: NoteRepository, C: NotificationCenter>(
        &mut self,
        service: &NoteService<'_, R, C>,
        offsets: &[usize],
    ) -> NoteServiceResult<()> {
        let rows = self.visible_rows();
        let targets: BTreeSet<usize> = offsets
            .iter()
            .copied()
            .filter(|offset| *offset < rows.len())
            .collect();
        let deleted = targets
            .into_iter()
            .try_for_each(|offset| service.delete_note(rows[offset].id));
        self.refresh(service)?;
        deleted
    }
}
