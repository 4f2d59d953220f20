//! High-level image operations.
//!
//! These functions combine calculations with backend execution:
//!
//! ```text
//! source ─▶ plan (classify + compute_target) ─▶ resample ─▶ reduce_quality ─▶ bytes
//! ```
//!
//! ## Best-effort contract
//!
//! Shrinking is a convenience, so every failure degrades instead of
//! propagating:
//!
//! | Failure | Result |
//! |---|---|
//! | Unclassifiable dimensions | `None` / original image |
//! | Resample fails | continue with the unresized original |
//! | First encode (quality 1.0) fails | `None` / original image |
//! | Later encode fails | keep the last good bytes |
//! | Decode of the result fails | original image |
//!
//! Each swallowed error is logged at `warn` level.

use super::backend::{Bitmap, ImageBackend};
use super::calculations::{
    CompressionTarget, ShapeBucket, calculate_resample_dimensions, classify, compute_target,
};
use super::params::{Dimensions, Quality};
use serde::Serialize;
use tracing::{debug, warn};

/// Everything decided about an image before any pixel work.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompressionPlan {
    pub source: Dimensions,
    pub bucket: ShapeBucket,
    pub target: CompressionTarget,
    /// Pixel size the source is redrawn at, in source orientation.
    pub resample_width: u32,
    pub resample_height: u32,
    pub budget_bytes: u64,
}

/// Plan the compression of an image of the given size.
///
/// Returns `None` for degenerate dimensions.
pub fn plan(source: Dimensions) -> Option<CompressionPlan> {
    let bucket = classify(source)?;
    let target = compute_target(&bucket);
    let (resample_width, resample_height) = calculate_resample_dimensions(source, &target);

    debug!(
        source = %source,
        ?bucket,
        budget_kib = target.budget_kib,
        resample_width,
        resample_height,
        "planned compression"
    );

    Some(CompressionPlan {
        source,
        bucket,
        target,
        resample_width,
        resample_height,
        budget_bytes: target.budget_bytes(),
    })
}

/// Redraw `image` at `width` x `height`, or return it unchanged on failure.
pub fn resample<B: ImageBackend>(
    backend: &B,
    image: &B::Image,
    width: u32,
    height: u32,
) -> B::Image {
    match backend.draw(image, width, height) {
        Ok(resized) => resized,
        Err(e) => {
            warn!(error = %e, width, height, "resample failed, using original image");
            image.clone()
        }
    }
}

/// One successful encode in the quality scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EncodeAttempt {
    pub quality: Quality,
    pub encoded_len: usize,
}

/// Final state of a quality scan.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeOutcome {
    pub data: Vec<u8>,
    /// Quality the returned bytes were encoded at.
    pub quality: Quality,
    pub attempts: Vec<EncodeAttempt>,
    pub within_budget: bool,
}

/// Encode at decreasing quality until the output fits `budget_bytes`.
///
/// Starts at 1.0 and steps down by 0.1, stopping at 0.1: at most ten
/// encodes. Quality never goes back up. Returns `None` only when the very
/// first encode fails; a later failure ends the scan with the last good
/// bytes.
pub fn reduce_quality<B: ImageBackend>(
    backend: &B,
    image: &B::Image,
    budget_bytes: u64,
) -> Option<EncodeOutcome> {
    let mut quality = Quality::MAX;
    let mut data = match backend.encode(image, quality) {
        Ok(data) => data,
        Err(e) => {
            warn!(error = %e, "encode at full quality failed");
            return None;
        }
    };
    debug!(%quality, bytes = data.len(), budget_bytes, "encoded");
    let mut attempts = vec![EncodeAttempt {
        quality,
        encoded_len: data.len(),
    }];

    while data.len() as u64 > budget_bytes {
        let Some(next) = quality.step_down() else {
            break;
        };
        match backend.encode(image, next) {
            Ok(encoded) => {
                quality = next;
                data = encoded;
                debug!(%quality, bytes = data.len(), budget_bytes, "encoded");
                attempts.push(EncodeAttempt {
                    quality,
                    encoded_len: data.len(),
                });
            }
            Err(e) => {
                warn!(error = %e, quality = %next, "re-encode failed, keeping last result");
                break;
            }
        }
    }

    let within_budget = data.len() as u64 <= budget_bytes;
    if !within_budget {
        debug!(%quality, bytes = data.len(), budget_bytes, "budget not met at quality floor");
    }

    Some(EncodeOutcome {
        data,
        quality,
        attempts,
        within_budget,
    })
}

/// Plan, encode trail and bytes of one compression.
#[derive(Debug, Clone, Serialize)]
pub struct CompressionReport {
    pub plan: CompressionPlan,
    pub quality: Quality,
    pub attempts: Vec<EncodeAttempt>,
    pub within_budget: bool,
    pub encoded_len: usize,
    #[serde(skip)]
    pub data: Vec<u8>,
}

/// Run the full pipeline on `source` and report how it went.
pub fn compress<B: ImageBackend>(backend: &B, source: &B::Image) -> Option<CompressionReport> {
    let Some(plan) = plan(source.size()) else {
        warn!(size = %source.size(), "image dimensions cannot be classified");
        return None;
    };
    let resized = resample(backend, source, plan.resample_width, plan.resample_height);
    let outcome = reduce_quality(backend, &resized, plan.budget_bytes)?;

    Some(CompressionReport {
        plan,
        quality: outcome.quality,
        attempts: outcome.attempts,
        within_budget: outcome.within_budget,
        encoded_len: outcome.data.len(),
        data: outcome.data,
    })
}

/// Compressed bytes for `source`, or `None` if it cannot be classified or
/// encoded.
pub fn compressed_data<B: ImageBackend>(backend: &B, source: &B::Image) -> Option<Vec<u8>> {
    compress(backend, source).map(|report| report.data)
}

/// `source` shrunk and re-decoded; the original whenever any step fails.
pub fn compressed_image<B: ImageBackend>(backend: &B, source: &B::Image) -> B::Image {
    let Some(data) = compressed_data(backend, source) else {
        return source.clone();
    };
    match backend.decode(&data) {
        Ok(image) => image,
        Err(e) => {
            warn!(error = %e, "decoding compressed data failed, returning original");
            source.clone()
        }
    }
}
