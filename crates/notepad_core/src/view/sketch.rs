//! Sketch canvas screen.
//!
//! # Responsibility
//! - Seed a canvas from a note's stored drawing.
//! - Collect stroke edits and commit them only on explicit save.
//!
//! # Invariants
//! - `cancel` never writes; the note's `drawing_data` stays as it was.
//! - Undecodable stored drawings open as a blank canvas instead of failing.

use crate::model::note::{Note, NoteId};
use crate::model::sketch::{InkColor, InkTool, Sketch, SketchError, Stroke, StrokePoint};
use crate::reminder::center::NotificationCenter;
use crate::repo::note_repo::NoteRepository;
use crate::service::note_service::{NoteService, NoteServiceResult};
use log::warn;

/// Decodes a note's stored drawing, if any.
///
/// Corrupt bytes are logged and reported as the error so callers can decide
/// between hiding the preview and starting blank.
pub fn load_note_sketch(note: &Note) -> Result<Option<Sketch>, SketchError> {
    let Some(bytes) = note.drawing_data.as_deref() else {
        return Ok(None);
    };
    Sketch::from_bytes(bytes).map(Some).map_err(|err| {
        warn!("event=sketch_load module=view status=error error={err}");
        err
    })
}

/// Open canvas editing one note's sketch.
#[derive(Debug, Clone)]
pub struct SketchSession {
    note_id: NoteId,
    sketch: Sketch,
    active: Option<Stroke>,
    load_error: Option<String>,
}

impl SketchSession {
    /// Opens the canvas seeded from `note.drawing_data`.
    pub fn open(note: &Note) -> Self {
        let (sketch, load_error) = match load_note_sketch(note) {
            Ok(stored) => (stored.unwrap_or_default(), None),
            Err(err) => (Sketch::default(), Some(err.to_string())),
        };
        Self {
            note_id: note.id,
            sketch,
            active: None,
            load_error,
        }
    }

    pub fn note_id(&self) -> NoteId {
        self.note_id
    }

    /// Committed strokes on the canvas, excluding one still being drawn.
    pub fn sketch(&self) -> &Sketch {
        &self.sketch
    }

    /// Why the stored drawing was discarded on open, if it was.
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Starts a new stroke, finishing any stroke still in progress.
    pub fn begin_stroke(&mut self, tool: InkTool, color: InkColor, width: f64, at: StrokePoint) {
        self.end_stroke();
        let mut stroke = Stroke::new(tool, color, width);
        stroke.points.push(at);
        self.active = Some(stroke);
    }

    /// Appends a sample to the stroke in progress. Ignored when none is.
    pub fn extend_stroke(&mut self, at: StrokePoint) {
        if let Some(stroke) = self.active.as_mut() {
            stroke.points.push(at);
        }
    }

    pub fn end_stroke(&mut self) {
        if let Some(stroke) = self.active.take() {
            self.sketch.strokes.push(stroke);
        }
    }

    /// Removes the most recent stroke. Returns whether anything was removed.
    pub fn undo(&mut self) -> bool {
        if self.active.take().is_some() {
            return true;
        }
        self.sketch.strokes.pop().is_some()
    }

    pub fn clear(&mut self) {
        self.active = None;
        self.sketch.strokes.clear();
    }

    /// Serializes the canvas onto the note and commits.
    pub fn save<R: NoteRepository, C: NotificationCenter>(
        mut self,
        service: &NoteService<'_, R, C>,
    ) -> NoteServiceResult<Note> {
        self.end_stroke();
        let bytes = self.sketch.to_bytes()?;
        service.set_drawing(self.note_id, Some(bytes))
    }

    /// Closes the canvas without writing.
    pub fn cancel(self) {}
}
