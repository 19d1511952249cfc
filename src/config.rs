//! Validated run configuration built from the parsed command line.
//!
//! All checks happen here, before any file is read or written.

use crate::cli::Cli;
use crate::error::AppError;
use crate::locator;
use crate::video::VideoRequest;
use std::path::PathBuf;

/// What a single invocation will do.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub mat_file: PathBuf,
    pub csv_file: PathBuf,
    /// Present when `--make-mp4` was given.
    pub video: Option<VideoRequest>,
}

impl RunConfig {
    /// Validates `cli`, resolving the encoder against `search_path`.
    ///
    /// Checks run in order: the required MAT and CSV paths, then (for video
    /// creation) the encoder, the image directory and the output name.
    pub fn from_cli(cli: &Cli, search_path: &[PathBuf]) -> Result<Self, AppError> {
        let (mat_file, csv_file) = match (&cli.mat_file, &cli.csv_file) {
            (Some(mat), Some(csv)) => (mat.clone(), csv.clone()),
            _ => return Err(AppError::MissingRequiredArgs),
        };

        let video = if cli.make_mp4 {
            let encoder = locator::find_executable(&cli.encoder, search_path)
                .ok_or_else(|| AppError::EncoderNotFound(cli.encoder.clone()))?;
            let pic_dir = cli
                .pic_dir
                .clone()
                .ok_or(AppError::MissingVideoArg("image directory"))?;
            let output = cli
                .vid
                .clone()
                .ok_or(AppError::MissingVideoArg("output mp4 name"))?;

            Some(VideoRequest {
                pic_dir,
                output,
                frame_rate: cli.framerate,
                pattern: cli.pattern.clone(),
                encoder,
            })
        } else {
            None
        };

        Ok(RunConfig {
            mat_file,
            csv_file,
            video,
        })
    }
}
