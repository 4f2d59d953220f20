//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait covers the three primitives the shrinking
//! pipeline needs from a graphics library: draw (resample), encode and
//! decode. The pipeline never touches pixels itself.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate.

use super::params::{Dimensions, Quality};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// An in-memory bitmap with a queryable size.
pub trait Bitmap {
    fn size(&self) -> Dimensions;
}

impl Bitmap for image::DynamicImage {
    fn size(&self) -> Dimensions {
        Dimensions::from((self.width(), self.height()))
    }
}

/// Trait for image processing backends.
///
/// `Sync` so a single backend can be shared between threads; each call
/// is independent.
pub trait ImageBackend: Sync {
    type Image: Bitmap + Clone;

    /// Redraw `image` into a canvas of exactly `width` x `height` pixels.
    fn draw(&self, image: &Self::Image, width: u32, height: u32)
    -> Result<Self::Image, BackendError>;

    /// Lossy-encode `image` at the given quality.
    fn encode(&self, image: &Self::Image, quality: Quality) -> Result<Vec<u8>, BackendError>;

    /// Reconstruct an image from encoded bytes.
    fn decode(&self, data: &[u8]) -> Result<Self::Image, BackendError>;
}
