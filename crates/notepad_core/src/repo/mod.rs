//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the note store contract used by services.
//! - Isolate SQLite query details from view/business orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`, `CommitFailed`) in
//!   addition to DB transport errors.

pub mod note_repo;
