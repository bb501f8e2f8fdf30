//! Vector sketch model and its persisted blob format.
//!
//! # Responsibility
//! - Hold the stroke set edited by the sketch screen.
//! - Serialize strokes to the opaque `drawing_data` blob and back.
//!
//! # Invariants
//! - `Sketch::from_bytes(&sketch.to_bytes()?)` yields an equal sketch.
//! - Blobs carry an explicit format version; unknown versions are rejected.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Current blob format version written by [`Sketch::to_bytes`].
pub const SKETCH_FORMAT_VERSION: u32 = 1;

pub type SketchResult<T> = Result<T, SketchError>;

#[derive(Debug)]
pub enum SketchError {
    /// Stored bytes are not a readable sketch blob.
    DeserializationFailed(String),
    /// Blob was written by a newer format.
    UnsupportedVersion { found: u32, supported: u32 },
    /// Encoding the stroke set failed.
    SerializationFailed(String),
}

impl Display for SketchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DeserializationFailed(message) => {
                write!(f, "sketch data could not be decoded: {message}")
            }
            Self::UnsupportedVersion { found, supported } => write!(
                f,
                "sketch format version {found} is newer than supported {supported}"
            ),
            Self::SerializationFailed(message) => {
                write!(f, "sketch data could not be encoded: {message}")
            }
        }
    }
}

impl Error for SketchError {}

/// Drawing tool a stroke was made with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InkTool {
    Pen,
    Pencil,
    Marker,
}

/// Straight RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InkColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl InkColor {
    pub const BLACK: InkColor = InkColor {
        r: 0,
        g: 0,
        b: 0,
        a: 255,
    };
}

/// One sampled input point in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokePoint {
    pub x: f64,
    pub y: f64,
    /// Normalized force, `1.0` for devices without pressure input.
    pub pressure: f64,
}

impl StrokePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            pressure: 1.0,
        }
    }
}

/// One continuous stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub tool: InkTool,
    pub color: InkColor,
    pub width: f64,
    pub points: Vec<StrokePoint>,
}

impl Stroke {
    pub fn new(tool: InkTool, color: InkColor, width: f64) -> Self {
        Self {
            tool,
            color,
            width,
            points: Vec::new(),
        }
    }
}

/// Axis-aligned drawn region, in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SketchBounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl SketchBounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Ordered stroke set; later strokes paint over earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sketch {
    pub strokes: Vec<Stroke>,
}

#[derive(Serialize)]
struct SketchBlobRef<'a> {
    version: u32,
    strokes: &'a [Stroke],
}

#[derive(Deserialize)]
struct SketchBlob {
    version: u32,
    #[serde(default)]
    strokes: Vec<Stroke>,
}

impl Sketch {
    pub fn is_empty(&self) -> bool {
        self.strokes.iter().all(|stroke| stroke.points.is_empty())
    }

    /// Region covered by all stroke points, widened by half the stroke width.
    ///
    /// Returns `None` for an empty sketch.
    pub fn bounds(&self) -> Option<SketchBounds> {
        let mut bounds: Option<SketchBounds> = None;
        for stroke in &self.strokes {
            let pad = stroke.width / 2.0;
            for point in &stroke.points {
                let next = SketchBounds {
                    min_x: point.x - pad,
                    min_y: point.y - pad,
                    max_x: point.x + pad,
                    max_y: point.y + pad,
                };
                bounds = Some(match bounds {
                    None => next,
                    Some(current) => SketchBounds {
                        min_x: current.min_x.min(next.min_x),
                        min_y: current.min_y.min(next.min_y),
                        max_x: current.max_x.max(next.max_x),
                        max_y: current.max_y.max(next.max_y),
                    },
                });
            }
        }
        bounds
    }

    /// Encodes the stroke set as a versioned blob.
    pub fn to_bytes(&self) -> SketchResult<Vec<u8>> {
        let blob = SketchBlobRef {
            version: SKETCH_FORMAT_VERSION,
            strokes: &self.strokes,
        };
        serde_json::to_vec(&blob).map_err(|err| SketchError::SerializationFailed(err.to_string()))
    }

    /// Decodes a blob written by [`Sketch::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> SketchResult<Self> {
        let blob: SketchBlob = serde_json::from_slice(bytes)
            .map_err(|err| SketchError::DeserializationFailed(err.to_string()))?;
        if blob.version > SKETCH_FORMAT_VERSION || blob.version == 0 {
            return Err(SketchError::UnsupportedVersion {
                found: blob.version,
                supported: SKETCH_FORMAT_VERSION,
            });
        }
        Ok(Self {
            strokes: blob.strokes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{InkColor, InkTool, Sketch, SketchError, Stroke, StrokePoint};

    fn sample() -> Sketch {
        let mut stroke = Stroke::new(InkTool::Pen, InkColor::BLACK, 4.0);
        stroke.points.push(StrokePoint::new(10.0, 20.0));
        stroke.points.push(StrokePoint {
            x: 30.25,
            y: 5.5,
            pressure: 0.3,
        });
        Sketch {
            strokes: vec![stroke],
        }
    }

    #[test]
    fn bytes_roundtrip_preserves_strokes() {
        let sketch = sample();
        let bytes = sketch.to_bytes().unwrap();
        assert_eq!(Sketch::from_bytes(&bytes).unwrap(), sketch);
    }

    #[test]
    fn bounds_cover_points_and_stroke_width() {
        let bounds = sample().bounds().unwrap();
        assert_eq!(bounds.min_x, 8.0);
        assert_eq!(bounds.min_y, 3.5);
        assert_eq!(bounds.max_x, 32.25);
        assert_eq!(bounds.max_y, 22.0);
        assert!(Sketch::default().bounds().is_none());
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let err = Sketch::from_bytes(b"\x00\x01not a sketch").unwrap_err();
        assert!(matches!(err, SketchError::DeserializationFailed(_)));
    }

    #[test]
    fn newer_format_version_is_rejected() {
        let err = Sketch::from_bytes(br#"{"version":9,"strokes":[]}"#).unwrap_err();
        assert!(matches!(
            err,
            SketchError::UnsupportedVersion { found: 9, .. }
        ));
    }
}
