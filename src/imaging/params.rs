//! Parameter types for image operations.
//!
//! These types describe *what* to do, not *how* to do it. They sit between
//! the [`operations`](super::operations) module (which decides the target
//! and drives the quality scan) and the [`backend`](super::backend) (which
//! does the actual pixel work).
//!
//! ## Types
//!
//! - [`Quality`] — Lossy encoding quality in tenths, 0.1 to 1.0.
//! - [`Dimensions`] — Real-valued width/height reported by a bitmap.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lossy encoding quality, stored as tenths (1..=10).
///
/// Tenths keep the quality scan exact: stepping down from 1.0 by 0.1 lands
/// on 0.1 after nine steps, with no floating-point drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "f64", try_from = "f64")]
pub struct Quality(u8);

impl Quality {
    /// Full quality (1.0), where every scan starts.
    pub const MAX: Quality = Quality(10);
    /// The floor (0.1); the scan never goes below it.
    pub const FLOOR: Quality = Quality(1);

    /// Build from tenths, clamped to 1..=10.
    pub fn from_tenths(tenths: u8) -> Self {
        Self(tenths.clamp(Self::FLOOR.0, Self::MAX.0))
    }

    pub fn tenths(self) -> u8 {
        self.0
    }

    /// Quality as a fraction in (0, 1].
    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / 10.0
    }

    /// Quality on the 1–100 scale JPEG encoders expect.
    pub fn as_percent(self) -> u8 {
        self.0 * 10
    }

    /// One step (0.1) lower, or `None` at the floor.
    pub fn step_down(self) -> Option<Self> {
        (self > Self::FLOOR).then(|| Self(self.0 - 1))
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self::MAX
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.as_f64())
    }
}

impl From<Quality> for f64 {
    fn from(q: Quality) -> f64 {
        q.as_f64()
    }
}

impl TryFrom<f64> for Quality {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !(value > 0.0 && value <= 1.0) {
            return Err(format!("quality must be in (0, 1], got {value}"));
        }
        Ok(Self::from_tenths((value * 10.0).round() as u8))
    }
}

/// Image size in pixels.
///
/// Real-valued because some hosts report logical points rather than
/// whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Shorter side.
    pub fn min_side(self) -> f64 {
        self.width.min(self.height)
    }

    /// Longer side.
    pub fn max_side(self) -> f64 {
        self.width.max(self.height)
    }
}

impl From<(u32, u32)> for Dimensions {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(f64::from(width), f64::from(height))
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
