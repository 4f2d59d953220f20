//! Pure Rust image processing backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP) | `image::load_from_memory` / `ImageReader` |
//! | Draw | `DynamicImage::resize_exact` with a configurable filter |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` on RGB8 |

use super::backend::{BackendError, ImageBackend};
use super::params::Quality;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageReader};
use std::io::Cursor;
use std::path::Path;

/// Backend built on the `image` crate.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend {
    filter: FilterType,
}

impl RustBackend {
    pub fn new() -> Self {
        Self::with_filter(FilterType::Lanczos3)
    }

    pub fn with_filter(filter: FilterType) -> Self {
        Self { filter }
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Load and decode an image from disk.
pub fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    ImageReader::open(path)
        .map_err(BackendError::Io)?
        .with_guessed_format()
        .map_err(BackendError::Io)?
        .decode()
        .map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
        })
}

impl ImageBackend for RustBackend {
    type Image = DynamicImage;

    fn draw(
        &self,
        image: &DynamicImage,
        width: u32,
        height: u32,
    ) -> Result<DynamicImage, BackendError> {
        if width == 0 || height == 0 {
            return Err(BackendError::ProcessingFailed(format!(
                "Cannot draw into a {width}x{height} canvas"
            )));
        }
        if (image.width(), image.height()) == (width, height) {
            return Ok(image.clone());
        }
        Ok(image.resize_exact(width, height, self.filter))
    }

    fn encode(&self, image: &DynamicImage, quality: Quality) -> Result<Vec<u8>, BackendError> {
        let mut buf = Cursor::new(Vec::new());
        // JPEG has no alpha channel
        let encoder = JpegEncoder::new_with_quality(&mut buf, quality.as_percent());
        image
            .to_rgb8()
            .write_with_encoder(encoder)
            .map_err(|e| BackendError::ProcessingFailed(format!("JPEG encode failed: {e}")))?;
        Ok(buf.into_inner())
    }

    fn decode(&self, data: &[u8]) -> Result<DynamicImage, BackendError> {
        Ok(image::load_from_memory(data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::Bitmap;
    use crate::imaging::operations::{compress, compressed_data, compressed_image};
    use image::{ImageEncoder, RgbImage, RgbaImage};

    fn gradient(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        }))
    }

    /// Deterministic pseudo-random pixels, hard to compress.
    fn noise(width: u32, height: u32) -> DynamicImage {
        let mut state: u32 = 0x9E37_79B9;
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |_, _| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            let [r, g, b, _] = state.to_le_bytes();
            image::Rgb([r, g, b])
        }))
    }

    /// Create a small valid JPEG file with the given dimensions.
    fn create_test_jpeg(path: &Path, width: u32, height: u32) {
        let img = gradient(width, height).to_rgb8();
        let file = std::fs::File::create(path).unwrap();
        let writer = std::io::BufWriter::new(file);
        JpegEncoder::new(writer)
            .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
            .unwrap();
    }

    #[test]
    fn encode_produces_jpeg() {
        let backend = RustBackend::new();
        let data = backend.encode(&gradient(10, 10), Quality::MAX).unwrap();
        assert_eq!(&data[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn encode_drops_alpha() {
        let backend = RustBackend::new();
        let rgba = DynamicImage::ImageRgba8(RgbaImage::new(16, 16));
        let data = backend.encode(&rgba, Quality::from_tenths(5)).unwrap();
        let decoded = backend.decode(&data).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (16, 16));
    }

    #[test]
    fn lower_quality_is_smaller_for_noisy_content() {
        let backend = RustBackend::new();
        let img = noise(128, 128);
        let high = backend.encode(&img, Quality::MAX).unwrap();
        let low = backend.encode(&img, Quality::FLOOR).unwrap();
        assert!(low.len() < high.len());
    }

    #[test]
    fn draw_exact_dimensions() {
        let backend = RustBackend::with_filter(FilterType::Triangle);
        let drawn = backend.draw(&gradient(400, 300), 200, 150).unwrap();
        assert_eq!((drawn.width(), drawn.height()), (200, 150));
    }

    #[test]
    fn draw_zero_canvas_errors() {
        let backend = RustBackend::new();
        assert!(backend.draw(&gradient(4, 4), 0, 4).is_err());
    }

    #[test]
    fn decode_garbage_errors() {
        let backend = RustBackend::new();
        assert!(backend.decode(b"definitely not an image").is_err());
    }

    #[test]
    fn load_image_from_disk() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("test.jpg");
        create_test_jpeg(&path, 200, 150);

        let img = load_image(&path).unwrap();
        assert_eq!(img.size().width, 200.0);
        assert_eq!(img.size().height, 150.0);
    }

    #[test]
    fn load_nonexistent_file_errors() {
        assert!(load_image(Path::new("/nonexistent/image.jpg")).is_err());
    }

    #[test]
    fn low_entropy_small_image_fits_at_full_quality() {
        let backend = RustBackend::new();
        let flat = DynamicImage::ImageRgb8(RgbImage::from_pixel(100, 100, image::Rgb([90, 140, 200])));

        let report = compress(&backend, &flat).unwrap();
        assert_eq!(report.quality, Quality::MAX);
        assert_eq!(report.attempts.len(), 1);
        assert!(report.within_budget);
    }

    #[test]
    fn rectangle_is_downscaled_and_within_ten_attempts() {
        // 2600x1950: multiple 2 → 1300x975
        let backend = RustBackend::with_filter(FilterType::Triangle);
        let report = compress(&backend, &gradient(2600, 1950)).unwrap();

        assert_eq!((report.plan.resample_width, report.plan.resample_height), (1300, 975));
        assert!(report.attempts.len() <= 10);
        assert!(report.within_budget || report.quality == Quality::FLOOR);

        let decoded = backend.decode(&report.data).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (1300, 975));
    }

    #[test]
    fn compressed_image_round_trips_through_jpeg() {
        let backend = RustBackend::with_filter(FilterType::Triangle);
        let source = gradient(300, 700);
        let data = compressed_data(&backend, &source).unwrap();
        let image = compressed_image(&backend, &source);
        assert_eq!(&data[0..2], &[0xFF, 0xD8]);
        assert_eq!((image.width(), image.height()), (300, 700));
    }
}
