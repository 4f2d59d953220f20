//! # photoshrink
//!
//! Shrinks photos to a size budget before upload or storage, keeping them
//! visually acceptable.
//!
//! # Architecture: Plan, Then Encode
//!
//! ```text
//! 1. Classify   (width, height)  →  ShapeBucket        (aspect ratio, size)
//! 2. Target     ShapeBucket      →  CompressionTarget  (resolution + KiB budget)
//! 3. Resample   source image     →  redrawn image      (uniform scale)
//! 4. Encode     redrawn image    →  JPEG bytes         (quality 1.0 → 0.1)
//! ```
//!
//! Steps 1 and 2 are pure functions, so the heuristic is unit tested
//! without any pixels. Steps 3 and 4 go through the
//! [`ImageBackend`](imaging::ImageBackend) trait, so the quality scan is
//! tested against a recording mock and runs in production on the `image`
//! crate.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Sizing heuristic, backend trait, quality scan and entry points |
//! | [`config`] | `photoshrink.toml` loading and validation (CLI only) |
//! | [`output`] | CLI output formatting for plans and compression reports |
//!
//! # Design Decisions
//!
//! ## Best Effort Over Errors
//!
//! Shrinking is a convenience, not a correctness-critical path. The entry
//! points collapse every failure into "no result":
//! [`compressed_data`](imaging::compressed_data) returns `None` and
//! [`compressed_image`](imaging::compressed_image) hands back the original
//! image. The backend still reports typed errors, and each one that gets
//! swallowed is logged through `tracing`.
//!
//! ## Linear Quality Scan
//!
//! Encoded size is not strictly monotonic in quality, so the scan steps
//! down one tenth at a time instead of bisecting. It makes at most ten
//! encodes and never raises quality.
//!
//! ## Budgets in KiB
//!
//! The bucket formulas yield numbers like 60, 100 or 144.7. These are
//! kibibytes; [`CompressionTarget::budget_bytes`](imaging::CompressionTarget::budget_bytes)
//! converts them before comparing with encoded output.

pub mod config;
pub mod imaging;
pub mod output;
