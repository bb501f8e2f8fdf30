//! Domain model for notes and their attachments.
//!
//! # Responsibility
//! - Define the persisted `Note` shape shared by every screen.
//! - Define the sketch stroke model stored in `Note::drawing_data`.
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId`.
//! - Attachments are independent optional fields, never a note kind.

pub mod note;
pub mod sketch;
