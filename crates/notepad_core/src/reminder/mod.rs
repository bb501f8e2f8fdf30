//! Local reminder alerts for notes.
//!
//! # Responsibility
//! - Translate a note's `reminder_at` into a calendar alert registration.
//! - Hide the host notification facility behind [`center::NotificationCenter`].
//!
//! # Invariants
//! - Alert identifiers are `Note::notification_id()` strings.

pub mod center;
pub mod scheduler;
pub mod trigger;
