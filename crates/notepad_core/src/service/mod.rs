//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository and reminder calls into use-case level APIs.
//! - Keep screen controllers decoupled from storage details.

pub mod note_service;
