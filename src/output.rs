//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.
//!
//! # Output Format
//!
//! ## Plan
//!
//! ```text
//! photo.jpg
//!     Source: 4000x3000
//!     Bucket: rectangle
//!     Target: 1333x1000
//!     Budget: 144.7 KiB
//! ```
//!
//! ## Compress
//!
//! ```text
//! photo.jpg → photo-compressed.jpg
//!     Target: 1333x1000, budget 144.7 KiB
//!     q1.0: 412.3 KiB
//!     q0.9: 201.8 KiB
//!     q0.8: 139.2 KiB ✓
//! ```

use crate::imaging::{CompressionPlan, CompressionReport, ShapeBucket, SizeBucket};
use std::path::Path;

fn kib(bytes: usize) -> String {
    format!("{:.1} KiB", bytes as f64 / 1024.0)
}

fn bucket_label(bucket: &ShapeBucket) -> String {
    match bucket {
        ShapeBucket::Square { size, .. } => {
            let size = match size {
                SizeBucket::Small => "small",
                SizeBucket::Middle => "middle",
                SizeBucket::Large => "large",
                SizeBucket::Giant => "giant",
            };
            format!("square ({size})")
        }
        ShapeBucket::Rectangle { .. } => "rectangle".to_string(),
        ShapeBucket::Other { .. } => "other".to_string(),
    }
}

/// Format the plan for one input.
pub fn format_plan(input: &Path, plan: &CompressionPlan) -> Vec<String> {
    vec![
        input.display().to_string(),
        format!("    Source: {}", plan.source),
        format!("    Bucket: {}", bucket_label(&plan.bucket)),
        format!(
            "    Target: {}x{}",
            plan.resample_width, plan.resample_height
        ),
        format!("    Budget: {:.1} KiB", plan.target.budget_kib),
    ]
}

pub fn print_plan(input: &Path, plan: &CompressionPlan) {
    for line in format_plan(input, plan) {
        println!("{}", line);
    }
}

/// Format the result of a compression: one line per encode attempt, the
/// last marked ✓ when it met the budget.
pub fn format_report(input: &Path, output: &Path, report: &CompressionReport) -> Vec<String> {
    let mut lines = vec![
        format!("{} → {}", input.display(), output.display()),
        format!(
            "    Target: {}x{}, budget {:.1} KiB",
            report.plan.resample_width, report.plan.resample_height, report.plan.target.budget_kib
        ),
    ];
    let last = report.attempts.len().saturating_sub(1);
    for (i, attempt) in report.attempts.iter().enumerate() {
        let mark = if i == last && report.within_budget {
            " ✓"
        } else {
            ""
        };
        lines.push(format!(
            "    q{}: {}{}",
            attempt.quality,
            kib(attempt.encoded_len),
            mark
        ));
    }
    if !report.within_budget {
        lines.push(format!(
            "    Budget not met; kept quality {} result",
            report.quality
        ));
    }
    lines
}

pub fn print_report(input: &Path, output: &Path, report: &CompressionReport) {
    for line in format_report(input, output, report) {
        println!("{}", line);
    }
}
