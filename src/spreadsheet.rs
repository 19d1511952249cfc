//! Builds the spreadsheet row for a segmentation record and writes it to disk.
//!
//! The spreadsheet is append-only: the header goes in when the file is first
//! created and is never rewritten. Repeated runs for the same subject simply
//! add another row.

use crate::error::AppError;
use crate::mat_reader::{self, SegmentationRecord};
use polars::prelude::*;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

pub const SUBJECT_ID_COLUMN: &str = "Subject ID";
pub const RIGHT_VOLUME_COLUMN: &str = "Right Breast Volume (cm\u{00b3})";
pub const LEFT_VOLUME_COLUMN: &str = "Left Breast Volume (cm\u{00b3})";
pub const TOTAL_VOLUME_COLUMN: &str = "Total Breast Volume (cm\u{00b3})";

/// Column labels in spreadsheet order.
pub const COLUMNS: [&str; 4] = [
    SUBJECT_ID_COLUMN,
    RIGHT_VOLUME_COLUMN,
    LEFT_VOLUME_COLUMN,
    TOTAL_VOLUME_COLUMN,
];

/// Wraps a record in a one-row DataFrame with the spreadsheet's column labels.
pub fn record_frame(record: &SegmentationRecord) -> Result<DataFrame, AppError> {
    let df = df! {
        SUBJECT_ID_COLUMN => &[record.subject_id.as_str()],
        RIGHT_VOLUME_COLUMN => &[record.right_volume],
        LEFT_VOLUME_COLUMN => &[record.left_volume],
        TOTAL_VOLUME_COLUMN => &[record.total_volume],
    }?;
    Ok(df)
}

/// Appends one record to the spreadsheet at `csv_path`.
///
/// If the file does not exist it is created and the header is written first.
/// If it exists, only the data row is appended.
///
/// # Returns
///
/// The spreadsheet path.
pub fn append_record(csv_path: &Path, record: &SegmentationRecord) -> Result<PathBuf, AppError> {
    let mut df = record_frame(record)?;
    let exists = csv_path.exists();

    let file = if exists {
        OpenOptions::new().append(true).open(csv_path)?
    } else {
        OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(csv_path)?
    };

    CsvWriter::new(file)
        .include_header(!exists)
        .with_separator(b',')
        .finish(&mut df)?;

    log::debug!(
        "Wrote row for '{}' to '{}' (header written: {})",
        record.subject_id,
        csv_path.display(),
        !exists
    );
    Ok(csv_path.to_path_buf())
}

/// Reads the segmentation record from `mat_file` and appends it to `csv_file`.
///
/// Extraction completes before the spreadsheet is opened, so an unreadable or
/// incomplete MAT file leaves the spreadsheet untouched.
pub fn write_data_csv(mat_file: &Path, csv_file: &Path) -> Result<PathBuf, AppError> {
    let record = mat_reader::load_segmentation(mat_file)?;
    append_record(csv_file, &record)
}
