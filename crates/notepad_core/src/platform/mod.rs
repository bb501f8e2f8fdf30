//! Host-platform capabilities reached from the detail screen.
//!
//! # Responsibility
//! - Describe the photo chooser the host provides.
//! - Shape the content handed to the host share sheet.

pub mod photos;
pub mod share;
