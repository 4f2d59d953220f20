use clap::{Parser, Subcommand};
use photoshrink::config::{self, ShrinkConfig};
use photoshrink::imaging::{self, Bitmap, RustBackend};
use photoshrink::output;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(name = "photoshrink")]
#[command(about = "Shrink photos to a size budget before upload")]
#[command(long_about = "\
Shrink photos to a size budget before upload

Each image is bucketed by aspect ratio (and, for narrow images, by size),
which fixes a target resolution and a size budget. The image is redrawn at
that resolution and JPEG-encoded at quality 1.0, 0.9, ... 0.1 until it fits.

Buckets (short side / long side):
  (0, 0.5]         narrow: small | middle | large | giant by long side
  (0.5, 0.5625)    other:  divisor follows the ratio
  [0.5625, 1]      regular: scaled towards a 1280px long side

Set RUST_LOG=debug to trace every encode attempt.")]
#[command(version)]
struct Cli {
    /// Config file (missing file = stock defaults)
    #[arg(long, default_value = "photoshrink.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the bucket, target size and budget without encoding
    Plan {
        input: PathBuf,
        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },
    /// Shrink an image and write it as JPEG
    Compress {
        input: PathBuf,
        /// Output path (default: <stem><suffix>.jpg next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a stock photoshrink.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // stdout carries results; logs go to stderr
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Plan { input, json } => {
            let source = imaging::load_image(&input)?;
            let plan = imaging::plan(source.size())
                .ok_or_else(|| unclassifiable(&input, &source))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                output::print_plan(&input, &plan);
            }
        }
        Command::Compress {
            input,
            output: output_path,
            json,
        } => {
            let config = config::load_config(&cli.config)?;
            let backend = RustBackend::with_filter(config.resample.filter.into());
            let source = imaging::load_image(&input)?;
            let report = imaging::compress(&backend, &source).ok_or_else(|| {
                if imaging::plan(source.size()).is_none() {
                    unclassifiable(&input, &source)
                } else {
                    format!("{}: encoding failed", input.display())
                }
            })?;
            let output_path = output_path.unwrap_or_else(|| default_output_path(&input, &config));
            std::fs::write(&output_path, &report.data)?;
            tracing::info!(
                output = %output_path.display(),
                bytes = report.encoded_len,
                quality = %report.quality,
                "wrote compressed image"
            );
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                output::print_report(&input, &output_path, &report);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn unclassifiable(input: &Path, source: &impl Bitmap) -> String {
    format!(
        "{}: cannot classify {} image",
        input.display(),
        source.size()
    )
}

/// `<dir>/<stem><suffix>.jpg` next to the input.
fn default_output_path(input: &Path, config: &ShrinkConfig) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    input.with_file_name(format!("{stem}{}.jpg", config.output.suffix))
}
