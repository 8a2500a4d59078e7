//! rinkaku: run fixed-kernel edge detection against a source image.
//!
//! Runs the Sobel, horizontal, and vertical filters (or a chosen
//! subset) against one raster image and writes one grayscale
//! `edges<N>.png` per filter, numbered from 1 in run order.
//!
//! # Usage
//!
//! ```text
//! cargo run --release --bin rinkaku -- [OPTIONS] <IMAGE_PATH>
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use rinkaku_io::{EdgeWriter, RunReport};
use rinkaku_pipeline::{DetectorConfig, FilterKind};

/// Fixed-kernel edge detection (Sobel, horizontal, vertical).
///
/// Loads the source image once, runs each selected filter's
/// convolution pipeline, and writes one grayscale edge map per filter.
#[derive(Parser)]
#[command(name = "rinkaku", version)]
struct Cli {
    /// Path to the source image (PNG, JPEG, BMP).
    image_path: PathBuf,

    /// Directory for the numbered edges<N>.png outputs.
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Number of same-size convolution passes per channel.
    #[arg(long, default_value_t = DetectorConfig::DEFAULT_ITERATIONS, value_parser = clap::builder::RangedU64ValueParser::<u32>::new().range(0..))]
    iterations: u32,

    /// Run a single filter instead of the full Sobel, horizontal,
    /// vertical sequence.
    #[arg(long, value_enum)]
    filter: Option<Filter>,

    /// Output the run report as JSON instead of a human-readable
    /// summary.
    #[arg(long)]
    json: bool,
}

/// Filter selection for the command line.
#[derive(Clone, Copy, ValueEnum)]
enum Filter {
    /// Sobel operator (center-weighted vertical edges).
    Sobel,
    /// Plain horizontal-edge filter.
    Horizontal,
    /// Plain vertical-edge filter.
    Vertical,
}

impl From<Filter> for FilterKind {
    fn from(filter: Filter) -> Self {
        match filter {
            Filter::Sobel => Self::Sobel,
            Filter::Horizontal => Self::Horizontal,
            Filter::Vertical => Self::Vertical,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = DetectorConfig {
        iterations: cli.iterations,
        filters: cli.filter.map_or_else(
            || DetectorConfig::DEFAULT_FILTERS.to_vec(),
            |f| vec![f.into()],
        ),
    };

    let writer = EdgeWriter::new(&cli.output_dir);
    match rinkaku_io::run(&cli.image_path, &writer, &config) {
        Ok(report) => {
            print_report(&report, cli.json);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Print the run report as JSON or a human-readable summary.
fn print_report(report: &RunReport, json: bool) {
    if json {
        match serde_json::to_string_pretty(report) {
            Ok(rendered) => println!("{rendered}"),
            Err(err) => eprintln!("error: failed to render report: {err}"),
        }
        return;
    }

    for (output, diagnostics) in report.outputs.iter().zip(&report.diagnostics) {
        println!(
            "{:<10} -> {} ({}, {:.1} ms)",
            output.filter.to_string(),
            output.path.display(),
            diagnostics.dimensions,
            diagnostics.total.as_secs_f64() * 1000.0,
        );
    }
}
