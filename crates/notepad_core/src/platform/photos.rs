//! Photo chooser seam.
//!
//! # Responsibility
//! - Describe a single still-image selection request.
//! - Report cancellation as a typed outcome instead of an empty buffer.
//!
//! # Invariants
//! - A successful pick carries non-empty encoded bytes.
//! - The picker never writes to the store; callers commit the result.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::future::Future;

/// JPEG quality the host encoder applies before bytes reach the store.
pub const PHOTO_JPEG_QUALITY: f32 = 0.7;

/// Media kinds a chooser may offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaFilter {
    StillImages,
}

/// Parameters for one chooser presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct PickRequest {
    pub filter: MediaFilter,
    pub selection_limit: u32,
    pub jpeg_quality: f32,
}

impl Default for PickRequest {
    fn default() -> Self {
        Self {
            filter: MediaFilter::StillImages,
            selection_limit: 1,
            jpeg_quality: PHOTO_JPEG_QUALITY,
        }
    }
}

/// Encoded image returned by the chooser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedPhoto {
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickError {
    /// The user dismissed the chooser without selecting anything.
    NoSelectionMade,
    /// The selected item could not be loaded as an image.
    LoadFailed(String),
}

impl Display for PickError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoSelectionMade => write!(f, "no photo selected"),
            Self::LoadFailed(message) => write!(f, "selected photo could not be loaded: {message}"),
        }
    }
}

impl Error for PickError {}

/// Host photo chooser.
///
/// The returned future resolves after a user-paced delay; there is no
/// timeout and dismissal resolves to `PickError::NoSelectionMade`.
pub trait PhotoPicker {
    fn pick(&self, request: &PickRequest) -> impl Future<Output = Result<PickedPhoto, PickError>>;
}
