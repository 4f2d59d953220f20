//! Pure calculation functions for the sizing heuristic.
//!
//! All functions here are pure and testable without any I/O or images.
//!
//! The pipeline is two-stage:
//!
//! ```text
//! Dimensions ──classify──▶ ShapeBucket ──compute_target──▶ CompressionTarget
//!                          (Square carries a SizeBucket)
//! ```
//!
//! The constants are empirically tuned. They are kept exactly as they are
//! so that budgets stay reproducible across releases.

use super::params::Dimensions;
use serde::Serialize;

/// Edge length the Rectangle and Giant buckets scale towards.
const BASE_EDGE: f64 = 1280.0;

/// Size class of a narrow image, keyed purely on its longer side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeBucket {
    /// Longer side below 1664.
    Small,
    /// 1664 up to (not including) 4990.
    Middle,
    /// 4990 up to (not including) 10240.
    Large,
    /// 10240 and above.
    Giant,
}

impl SizeBucket {
    /// Classify by the longer side. Lower bounds are inclusive.
    pub fn of(max_side: f64) -> Self {
        if max_side < 1664.0 {
            SizeBucket::Small
        } else if max_side < 4990.0 {
            SizeBucket::Middle
        } else if max_side < 10240.0 {
            SizeBucket::Large
        } else {
            SizeBucket::Giant
        }
    }
}

/// Aspect-ratio class of an image.
///
/// Every variant carries the short (`min`) and long (`max`) side. The names
/// are historical: `Square` holds the *narrowest* images (ratio ≤ 0.5) and
/// `Rectangle` holds everything from 9:16 up to 1:1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ShapeBucket {
    /// Ratio in (0, 0.5]; sub-classified by size.
    Square { min: f64, max: f64, size: SizeBucket },
    /// Ratio in [0.5625, 1].
    Rectangle { min: f64, max: f64 },
    /// Ratio in (0.5, 0.5625).
    Other { min: f64, max: f64 },
}

impl ShapeBucket {
    /// The (short, long) sides this bucket was built from.
    pub fn sides(&self) -> (f64, f64) {
        match *self {
            ShapeBucket::Square { min, max, .. }
            | ShapeBucket::Rectangle { min, max }
            | ShapeBucket::Other { min, max } => (min, max),
        }
    }
}

/// Classify an image by aspect ratio.
///
/// Width/height order is irrelevant. Returns `None` when the ratio falls
/// outside (0, 1], which only happens for zero, negative or NaN sides.
///
/// # Examples
/// ```
/// # use photoshrink::imaging::{Dimensions, ShapeBucket, classify};
/// let bucket = classify(Dimensions::new(4000.0, 3000.0)).unwrap();
/// assert!(matches!(bucket, ShapeBucket::Rectangle { .. }));
/// assert!(classify(Dimensions::new(0.0, 500.0)).is_none());
/// ```
pub fn classify(dims: Dimensions) -> Option<ShapeBucket> {
    // f64::min/max would drop a NaN side and classify the other one alone
    if dims.width.is_nan() || dims.height.is_nan() {
        return None;
    }
    let min = dims.min_side();
    let max = dims.max_side();
    let ratio = min / max;

    if ratio > 0.0 && ratio <= 0.5 {
        Some(ShapeBucket::Square {
            min,
            max,
            size: SizeBucket::of(max),
        })
    } else if ratio > 0.5 && ratio < 0.5625 {
        Some(ShapeBucket::Other { min, max })
    } else if (0.5625..=1.0).contains(&ratio) {
        Some(ShapeBucket::Rectangle { min, max })
    } else {
        None
    }
}

/// Target resolution and size budget for one image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CompressionTarget {
    /// Target short side in pixels.
    pub min_dim: f64,
    /// Target long side in pixels.
    pub max_dim: f64,
    /// Size budget in KiB.
    pub budget_kib: f64,
}

impl CompressionTarget {
    /// The budget in bytes, for comparison with encoded output.
    pub fn budget_bytes(&self) -> u64 {
        (self.budget_kib * 1024.0).round() as u64
    }
}

/// Whole-number downscale divisor towards [`BASE_EDGE`], never zero.
fn base_edge_multiple(max: f64) -> f64 {
    let multiple = (max / BASE_EDGE).trunc();
    if multiple == 0.0 { 1.0 } else { multiple }
}

fn scaled(min: f64, max: f64, multiple: f64) -> (f64, f64) {
    (min / multiple, max / multiple)
}

/// Compute the target resolution and size budget for a bucket.
pub fn compute_target(bucket: &ShapeBucket) -> CompressionTarget {
    match *bucket {
        ShapeBucket::Square { min, max, size } => square_target(min, max, size),
        ShapeBucket::Rectangle { min, max } => {
            let (t_min, t_max) = scaled(min, max, base_edge_multiple(max));
            CompressionTarget {
                min_dim: t_min,
                max_dim: t_max,
                budget_kib: f64::max(100.0, (t_min * t_max) / (1440.0 * 2560.0) * 400.0),
            }
        }
        ShapeBucket::Other { min, max } => {
            let ratio = min / max;
            let long_reference = BASE_EDGE / ratio;
            // Single-precision ceiling: an f64 quotient such as 1.0000000000000002
            // for an exact multiple of 1280 would otherwise round up a step.
            let multiple = f64::from(((max / long_reference) as f32).ceil());
            let (t_min, t_max) = scaled(min, max, multiple);
            CompressionTarget {
                min_dim: t_min,
                max_dim: t_max,
                budget_kib: f64::max(
                    100.0,
                    (t_min * t_max) / (BASE_EDGE * long_reference) * 500.0,
                ),
            }
        }
    }
}

fn square_target(min: f64, max: f64, size: SizeBucket) -> CompressionTarget {
    match size {
        SizeBucket::Small => CompressionTarget {
            min_dim: min,
            max_dim: max,
            budget_kib: f64::max(60.0, min * max / 1664f64.powi(2) * 150.0),
        },
        SizeBucket::Middle => {
            let t_min = (min / 2.0).trunc();
            let t_max = (max / 2.0).trunc();
            CompressionTarget {
                min_dim: t_min,
                max_dim: t_max,
                budget_kib: f64::max(60.0, (t_min * t_max) / (4990.0f64 / 2.0).powi(2) * 300.0),
            }
        }
        SizeBucket::Large => {
            let t_min = (min / 4.0).trunc();
            let t_max = (max / 4.0).trunc();
            CompressionTarget {
                min_dim: t_min,
                max_dim: t_max,
                budget_kib: f64::max(
                    100.0,
                    (t_min * t_max) / (10240.0f64 / 4.0).powi(2) * 300.0,
                ),
            }
        }
        SizeBucket::Giant => {
            let (t_min, t_max) = scaled(min, max, base_edge_multiple(max));
            CompressionTarget {
                min_dim: t_min,
                max_dim: t_max,
                budget_kib: f64::max(100.0, (t_min * t_max) / 2560f64.powi(2) * 300.0),
            }
        }
    }
}

/// Calculate the pixel size to redraw the source at.
///
/// A single scale factor is taken from the target's long side against the
/// source's long side and applied to both source sides. The source aspect
/// ratio is kept even when the target sides were truncated independently.
/// Each side is rounded and at least 1.
///
/// # Returns
/// * `(width, height)` - in the source's orientation
pub fn calculate_resample_dimensions(source: Dimensions, target: &CompressionTarget) -> (u32, u32) {
    let factor = target.max_dim / source.max_side();
    let w = (source.width * factor).round().max(1.0) as u32;
    let h = (source.height * factor).round().max(1.0) as u32;
    (w, h)
}
