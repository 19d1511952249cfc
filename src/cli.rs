use clap::Parser;
use std::path::PathBuf;

/// Usage line printed when the required options are missing.
pub const USAGE: &str = "Usage:   segsheet --mat-file MAT --csv-file CSV   |   -h,--help";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Aggregate segmentation MAT files into a spreadsheet, optionally creating a video of the segmentation images.",
    after_help = "NOTE: MP4 related options require that ffmpeg be installed and added to system path."
)]
pub struct Cli {
    /// Input '.mat' file (MATLAB v7.3+) holding the segmentation data.
    #[arg(short, long, value_name = "MAT")]
    pub mat_file: Option<PathBuf>,

    /// Output csv file. Created with a header if absent, appended to otherwise.
    #[arg(short, long, value_name = "CSV")]
    pub csv_file: Option<PathBuf>,

    /// Create an mp4 video of the subject's segmentation images.
    #[arg(long, default_value_t = false)]
    pub make_mp4: bool,

    /// Image directory holding that subject's numbered images.
    #[arg(short, long, value_name = "DIR")]
    pub pic_dir: Option<PathBuf>,

    /// Output mp4 video name.
    #[arg(short, long, value_name = "MP4")]
    pub vid: Option<PathBuf>,

    /// Frame rate of the output video (frames per second).
    #[arg(short, long, value_name = "INT", default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    pub framerate: u32,

    /// Filename fragment placed before the 3-digit frame number (e.g. 'slice_' for slice_001.jpg).
    #[arg(long, value_name = "TEXT", default_value = "")]
    pub pattern: String,

    /// Encoder executable name or path.
    #[arg(long, value_name = "PROGRAM", env = "SEGSHEET_ENCODER", default_value = "ffmpeg")]
    pub encoder: String,

    /// Print debug info about extracted fields and encoder arguments
    #[arg(long, default_value_t = false)]
    pub debug: bool,
}
