//! End-to-end tests through the public API: files on disk, the real
//! `image`-crate backend, and an out-of-crate backend implementation.

use image::imageops::FilterType;
use image::{DynamicImage, ImageEncoder, RgbImage};
use photoshrink::imaging::{
    BackendError, Bitmap, Dimensions, ImageBackend, Quality, RustBackend, compress,
    compressed_data, compressed_image, load_image,
};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

fn write_png(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    });
    let file = std::fs::File::create(path).unwrap();
    image::codecs::png::PngEncoder::new(std::io::BufWriter::new(file))
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

#[test]
fn png_on_disk_shrinks_to_jpeg() {
    let tmp = tempfile::TempDir::new().unwrap();
    let source_path = tmp.path().join("portrait.png");
    write_png(&source_path, 600, 900);

    let source = load_image(&source_path).unwrap();
    let backend = RustBackend::with_filter(FilterType::Triangle);
    let report = compress(&backend, &source).unwrap();

    // 600/900 ≈ 0.667 → regular bucket, below 1280 so unscaled
    assert_eq!((report.plan.resample_width, report.plan.resample_height), (600, 900));
    assert!(report.attempts.len() <= 10);
    assert!(
        report
            .attempts
            .windows(2)
            .all(|w| w[0].quality > w[1].quality)
    );

    let output_path = tmp.path().join("portrait-compressed.jpg");
    std::fs::write(&output_path, &report.data).unwrap();
    let reloaded = load_image(&output_path).unwrap();
    assert_eq!(reloaded.size(), Dimensions::new(600.0, 900.0));
}

#[test]
fn report_serializes_without_payload() {
    let backend = RustBackend::new();
    let source = DynamicImage::ImageRgb8(RgbImage::new(64, 64));
    let report = compress(&backend, &source).unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["plan"]["bucket"]["shape"], "rectangle");
    assert_eq!(json["quality"], 1.0);
    assert!(json.get("data").is_none());
}

/// Backend whose encoder always fails after `ok_encodes` successes.
struct FlakyEncoder {
    inner: RustBackend,
    ok_encodes: usize,
    calls: AtomicUsize,
}

impl ImageBackend for FlakyEncoder {
    type Image = DynamicImage;

    fn draw(
        &self,
        image: &DynamicImage,
        width: u32,
        height: u32,
    ) -> Result<DynamicImage, BackendError> {
        self.inner.draw(image, width, height)
    }

    fn encode(&self, image: &DynamicImage, quality: Quality) -> Result<Vec<u8>, BackendError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) >= self.ok_encodes {
            return Err(BackendError::ProcessingFailed("encoder unavailable".into()));
        }
        self.inner.encode(image, quality)
    }

    fn decode(&self, data: &[u8]) -> Result<DynamicImage, BackendError> {
        self.inner.decode(data)
    }
}

#[test]
fn broken_encoder_yields_original_image() {
    let backend = FlakyEncoder {
        inner: RustBackend::new(),
        ok_encodes: 0,
        calls: AtomicUsize::new(0),
    };
    let source = DynamicImage::ImageRgb8(RgbImage::new(40, 30));

    assert!(compressed_data(&backend, &source).is_none());
    let image = compressed_image(&backend, &source);
    assert_eq!(image, source);
}

#[test]
fn encoder_failing_mid_scan_keeps_full_quality_bytes() {
    let backend = FlakyEncoder {
        inner: RustBackend::new(),
        ok_encodes: 1,
        calls: AtomicUsize::new(0),
    };
    // Noise defeats JPEG: well over the 100 KiB budget at quality 1.0
    let mut state: u32 = 0x2545_F491;
    let source = DynamicImage::ImageRgb8(RgbImage::from_fn(512, 384, |_, _| {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        let [r, g, b, _] = state.to_le_bytes();
        image::Rgb([r, g, b])
    }));

    let data = compressed_data(&backend, &source).unwrap();
    assert_eq!(backend.calls.load(Ordering::SeqCst), 2);
    assert!(data.len() > 100 * 1024);
    assert_eq!(backend.decode(&data).unwrap().size(), Dimensions::new(512.0, 384.0));
}

#[test]
fn zero_sized_image_is_returned_unchanged() {
    let backend = RustBackend::new();
    let source = DynamicImage::ImageRgb8(RgbImage::new(0, 500));

    assert!(compressed_data(&backend, &source).is_none());
    assert_eq!(compressed_image(&backend, &source), source);
}
