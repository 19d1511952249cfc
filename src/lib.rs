//! The main library for the `segsheet` application.
//!
//! This crate turns the MATLAB output of a breast segmentation tool into rows of a
//! cumulative spreadsheet, and can stitch the subject's segmentation images into
//! a video with ffmpeg. The primary entry point is the `run` function, which takes
//! the parsed CLI arguments and executes both steps.
//!
//! The library is structured into several modules:
//! - `cli`: Defines the command-line interface.
//! - `config`: Validates the command line into a `RunConfig` before any work starts.
//! - `mat_reader`: Extracts the segmentation record from a MAT v7.3 file.
//! - `spreadsheet`: Appends records to the CSV spreadsheet.
//! - `video`: Builds and runs the encoder invocation.
//! - `locator`: Finds executables on the search path.
//! - `error`: Defines the application's custom error type.

use anyhow::{Context, Result};

pub mod cli;
pub mod config;
pub mod error;
pub mod locator;
pub mod mat_reader;
pub mod spreadsheet;
pub mod video;

use crate::cli::Cli;
use crate::config::RunConfig;
use crate::video::FfmpegEncoder;

/// The main entry point for the application logic.
///
/// This function orchestrates the entire process:
/// 1.  It validates the arguments, locating the encoder on `PATH` if a video was requested.
/// 2.  It appends the subject's record to the spreadsheet.
/// 3.  It creates the video, if requested.
///
/// # Errors
///
/// Returns an error if validation, extraction, writing or encoding fails.
/// Validation errors are returned as `AppError` so the caller can tell them apart.
pub fn run(cli: &Cli) -> Result<()> {
    // 1. Validate before touching any file
    let config = RunConfig::from_cli(cli, &locator::search_path_from_env())?;

    // 2. Write the spreadsheet row
    log::info!("Writing subject's data to spreadsheet");
    let csv_file = spreadsheet::write_data_csv(&config.mat_file, &config.csv_file)
        .with_context(|| {
            format!(
                "Failed to write data from '{}' to '{}'",
                config.mat_file.display(),
                config.csv_file.display()
            )
        })?;
    log::info!("  -> Spreadsheet saved to '{}'", csv_file.display());

    // 3. Create the video
    if let Some(request) = &config.video {
        log::info!("Creating subject segmentation video");
        let encoder = FfmpegEncoder::new(&request.encoder);
        let output = video::make_video(request, &encoder).with_context(|| {
            format!("Failed to create video '{}'", request.output.display())
        })?;
        log::info!("  -> Video saved to '{}'", output.display());
    }

    Ok(())
}
