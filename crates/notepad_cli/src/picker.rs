//! Photo picker backed by a file on disk.
//!
//! The file is accepted only if it decodes as a still image; it is then
//! re-encoded as JPEG at the requested quality before reaching the store.

use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use notepad_core::platform::photos::MediaFilter;
use notepad_core::{PhotoPicker, PickError, PickRequest, PickedPhoto};
use std::path::PathBuf;

/// Returns one preselected file as a JPEG.
pub struct FilePhotoPicker {
    path: PathBuf,
}

impl FilePhotoPicker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PhotoPicker for FilePhotoPicker {
    async fn pick(&self, request: &PickRequest) -> Result<PickedPhoto, PickError> {
        log::debug!(
            "event=photo_pick module=cli status=start selection_limit={}",
            request.selection_limit
        );
        let raw = match std::fs::read(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(PickError::NoSelectionMade)
            }
            Err(err) => return Err(PickError::LoadFailed(err.to_string())),
        };

        let decoded = match request.filter {
            MediaFilter::StillImages => image::load_from_memory(&raw)
                .map_err(|err| PickError::LoadFailed(format!("not a still image: {err}")))?,
        };
        let bytes = encode_jpeg(&decoded, request.jpeg_quality)?;
        Ok(PickedPhoto { bytes })
    }
}

/// `quality` is in `0.0..=1.0`, as carried by `PickRequest`.
fn encode_jpeg(decoded: &DynamicImage, quality: f32) -> Result<Vec<u8>, PickError> {
    let quality = (quality * 100.0).round().clamp(1.0, 100.0) as u8;
    // JPEG has no alpha channel.
    let rgb = DynamicImage::ImageRgb8(decoded.to_rgb8());
    let mut bytes = Vec::new();
    rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut bytes, quality))
        .map_err(|err| PickError::LoadFailed(format!("jpeg encoding failed: {err}")))?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::{encode_jpeg, FilePhotoPicker};
    use futures::executor::block_on;
    use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};
    use notepad_core::{PhotoPicker, PickError, PickRequest};

    const JPEG_SOI: [u8; 2] = [0xFF, 0xD8];

    fn noisy_image() -> RgbImage {
        RgbImage::from_fn(64, 64, |x, y| {
            Rgb([(x * 4) as u8, (y * 4) as u8, ((x * y) % 256) as u8])
        })
    }

    #[test]
    fn png_file_is_reencoded_as_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.png");
        noisy_image().save(&path).unwrap();

        let picked = block_on(FilePhotoPicker::new(&path).pick(&PickRequest::default())).unwrap();
        assert_eq!(picked.bytes[..2], JPEG_SOI);
        let reloaded = image::load_from_memory(&picked.bytes).unwrap();
        assert_eq!((reloaded.width(), reloaded.height()), (64, 64));
    }

    #[test]
    fn non_image_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "Buy milk").unwrap();

        let err = block_on(FilePhotoPicker::new(&path).pick(&PickRequest::default())).unwrap_err();
        assert!(matches!(err, PickError::LoadFailed(_)));
    }

    #[test]
    fn missing_file_counts_as_no_selection() {
        let dir = tempfile::tempdir().unwrap();
        let picker = FilePhotoPicker::new(dir.path().join("absent.jpg"));

        let err = block_on(picker.pick(&PickRequest::default())).unwrap_err();
        assert_eq!(err, PickError::NoSelectionMade);
    }

    #[test]
    fn lower_quality_produces_smaller_output() {
        let decoded = DynamicImage::ImageRgb8(noisy_image());
        let high = encode_jpeg(&decoded, 1.0).unwrap();
        let low = encode_jpeg(&decoded, 0.1).unwrap();
        assert!(low.len() < high.len());
    }

    #[test]
    fn transparent_images_are_flattened() {
        let decoded = DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 8, Rgba([10, 20, 30, 0])));
        let bytes = encode_jpeg(&decoded, 0.7).unwrap();
        assert_eq!(bytes[..2], JPEG_SOI);
    }
}
