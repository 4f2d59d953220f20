//! CLI configuration module.
//!
//! Handles loading and validating `photoshrink.toml`. A user file
//! overrides just the keys it names; everything else keeps its stock
//! default.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [resample]
//! filter = "lanczos3"       # nearest | triangle | catmull-rom | gaussian | lanczos3
//!
//! [output]
//! suffix = "-compressed"    # photo.png → photo-compressed.jpg
//! ```
//!
//! The sizing heuristic itself has no knobs: bucket thresholds, budgets
//! and the quality scan are fixed so budgets stay reproducible.
//!
//! Unknown keys are rejected to catch typos early.

use image::imageops::FilterType;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `photoshrink.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShrinkConfig {
    /// How the source is redrawn at the target size.
    pub resample: ResampleConfig,
    /// Where compressed files are written.
    pub output: OutputConfig,
}

impl ShrinkConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output.suffix.is_empty() {
            return Err(ConfigError::Validation(
                "output.suffix must not be empty".into(),
            ));
        }
        if self.output.suffix.contains(['/', '\\']) {
            return Err(ConfigError::Validation(
                "output.suffix must not contain path separators".into(),
            ));
        }
        Ok(())
    }
}

/// Resampling filter names accepted in config.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResampleFilter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    #[default]
    Lanczos3,
}

impl From<ResampleFilter> for FilterType {
    fn from(filter: ResampleFilter) -> Self {
        match filter {
            ResampleFilter::Nearest => FilterType::Nearest,
            ResampleFilter::Triangle => FilterType::Triangle,
            ResampleFilter::CatmullRom => FilterType::CatmullRom,
            ResampleFilter::Gaussian => FilterType::Gaussian,
            ResampleFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResampleConfig {
    pub filter: ResampleFilter,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Appended to the input file stem when no output path is given.
    pub suffix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            suffix: "-compressed".to_string(),
        }
    }
}

// =============================================================================
// Config loading and validation
// =============================================================================

/// Parse and validate config text.
///
/// Every table and key is `#[serde(default)]`, so a file naming one key
/// keeps the stock value of every other.
pub fn parse_config(content: &str) -> Result<ShrinkConfig, ConfigError> {
    let config: ShrinkConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load config from the given file, falling back to stock defaults when
/// it does not exist.
pub fn load_config(path: &Path) -> Result<ShrinkConfig, ConfigError> {
    if !path.exists() {
        return Ok(ShrinkConfig::default());
    }
    parse_config(&fs::read_to_string(path)?)
}

/// Returns a fully-commented stock `photoshrink.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# photoshrink configuration
# ========================
#
# Every key is optional; remove anything you don't want to override.

[resample]
# Filter used when redrawing the image at its target size.
# One of: "nearest", "triangle", "catmull-rom", "gaussian", "lanczos3".
# Faster filters trade sharpness for speed.
filter = "lanczos3"

[output]
# Appended to the input file stem when `compress` is run without -o.
# photo.png → photo-compressed.jpg
suffix = "-compressed"
"##
}
