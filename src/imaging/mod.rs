//! Image shrinking: bucketed sizing plus a stepped quality scan.
//!
//! | Stage | Where |
//! |---|---|
//! | **Classify** | [`classify`] — aspect-ratio bucket, size bucket for narrow images |
//! | **Target** | [`compute_target`] — target resolution + size budget |
//! | **Resample** | [`resample`] — uniform-scale redraw via the backend |
//! | **Encode** | [`reduce_quality`] — JPEG at 1.0, 0.9, … 0.1 until it fits |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for the sizing heuristic (unit testable)
//! - **Parameters**: Quality and dimension types
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Bitmap, ImageBackend};
pub use calculations::{
    CompressionTarget, ShapeBucket, SizeBucket, calculate_resample_dimensions, classify,
    compute_target,
};
pub use operations::{
    CompressionPlan, CompressionReport, EncodeAttempt, EncodeOutcome, compress, compressed_data,
    compressed_image, plan, reduce_quality, resample,
};
pub use params::{Dimensions, Quality};
pub use rust_backend::{RustBackend, load_image};
