//! Screen controllers for the note list, note detail and sketch canvas.
//!
//! # Responsibility
//! - Hold per-screen edit state that is not yet committed.
//! - Route every write through [`crate::service::note_service::NoteService`].
//!
//! # Invariants
//! - Controllers never talk to SQLite directly.
//! - The store is passed in by reference; no controller owns it.

pub mod detail;
pub mod list;
pub mod sketch;
