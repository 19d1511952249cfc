use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing required arguments: both --mat-file and --csv-file must be provided")]
    MissingRequiredArgs,

    #[error("Encoder '{0}' is not installed on this system or added to the system path")]
    EncoderNotFound(String),

    #[error("Create mp4 option was enabled but no {0} was specified")]
    MissingVideoArg(&'static str),

    #[error("Invalid input path: {0} does not exist or is not a file")]
    InvalidInputPath(PathBuf),

    #[error("Field '{field}' not found in {}", path.display())]
    MissingField { field: String, path: PathBuf },

    #[error("Field '{field}' in {} holds no data", path.display())]
    EmptyField { field: String, path: PathBuf },

    #[error("Field '{field}' has an unsupported data type: {dtype}")]
    UnsupportedFieldType { field: String, dtype: String },

    #[error("Image directory {0} does not exist or is not a directory")]
    InvalidPicDir(PathBuf),

    #[error("Encoder exited with status {0}")]
    EncoderFailed(i32),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Data processing error (Polars): {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    #[error("MAT file error (HDF5): {0}")]
    Hdf5(#[from] hdf5::Error),
}
