//! Reads segmentation results out of MATLAB v7.3 `.mat` files.
//!
//! A v7.3 MAT file is an HDF5 container. A MATLAB struct is stored as a group
//! and each struct field as a dataset inside it, so `segdata.VT1` lives at
//! `/segdata/VT1`. Scalars are 1x1 datasets, and char arrays are stored as
//! UTF-16 code units (`uint16`).

use crate::error::AppError;
use hdf5::types::{IntSize, TypeDescriptor};
use hdf5::{Dataset, Group};
use std::path::{Path, PathBuf};

/// Top-level struct holding the segmentation output.
pub const SEGMENTATION_GROUP: &str = "segdata";
/// Subject identifier field.
pub const FIELD_ID: &str = "ID";
/// Right breast volume field.
pub const FIELD_RIGHT_VOLUME: &str = "VT1";
/// Left breast volume field.
pub const FIELD_LEFT_VOLUME: &str = "VT2";
/// Total breast volume field.
pub const FIELD_TOTAL_VOLUME: &str = "VT";

/// One subject's measured volumes, as extracted from a segmentation file.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentationRecord {
    pub subject_id: String,
    /// Right breast volume (cm³).
    pub right_volume: f64,
    /// Left breast volume (cm³).
    pub left_volume: f64,
    /// Total breast volume (cm³).
    pub total_volume: f64,
}

/// Loads the segmentation record from a MAT v7.3 file.
///
/// Every field is looked up before anything is returned, so a file missing any
/// of them fails as a whole with `AppError::MissingField`.
///
/// # Errors
///
/// * `AppError::InvalidInputPath` if `path` is not a file.
/// * `AppError::MissingField` if the `segdata` struct or one of its fields is absent.
/// * `AppError::EmptyField` if a field holds no elements.
/// * `AppError::Hdf5` if the file cannot be opened or read as HDF5.
pub fn load_segmentation(path: &Path) -> Result<SegmentationRecord, AppError> {
    if !path.is_file() {
        return Err(AppError::InvalidInputPath(path.to_path_buf()));
    }

    let file = hdf5::File::open(path)?;
    let reader = FieldReader {
        group: open_struct(&file, SEGMENTATION_GROUP, path)?,
        path: path.to_path_buf(),
    };

    let record = SegmentationRecord {
        subject_id: reader.read_string(FIELD_ID)?,
        right_volume: reader.read_scalar(FIELD_RIGHT_VOLUME)?,
        left_volume: reader.read_scalar(FIELD_LEFT_VOLUME)?,
        total_volume: reader.read_scalar(FIELD_TOTAL_VOLUME)?,
    };
    log::debug!("Extracted {:?} from '{}'", record, path.display());
    Ok(record)
}

fn open_struct(root: &Group, name: &str, path: &Path) -> Result<Group, AppError> {
    if !root.link_exists(name) {
        return Err(AppError::MissingField {
            field: name.to_string(),
            path: path.to_path_buf(),
        });
    }
    Ok(root.group(name)?)
}

/// Typed access to the fields of one MATLAB struct.
struct FieldReader {
    group: Group,
    path: PathBuf,
}

impl FieldReader {
    fn dataset(&self, field: &str) -> Result<Dataset, AppError> {
        if !self.group.link_exists(field) {
            return Err(self.missing(field));
        }
        Ok(self.group.dataset(field)?)
    }

    fn missing(&self, field: &str) -> AppError {
        AppError::MissingField {
            field: format!("{}.{}", SEGMENTATION_GROUP, field),
            path: self.path.clone(),
        }
    }

    fn empty(&self, field: &str) -> AppError {
        AppError::EmptyField {
            field: format!("{}.{}", SEGMENTATION_GROUP, field),
            path: self.path.clone(),
        }
    }

    /// Reads the first element of a numeric field as `f64`.
    fn read_scalar(&self, field: &str) -> Result<f64, AppError> {
        let dataset = self.dataset(field)?;
        check_numeric(field, &dataset.dtype()?.to_descriptor()?)?;
        let values = dataset.read_raw::<f64>()?;
        values.first().copied().ok_or_else(|| self.empty(field))
    }

    /// Reads a field as text. MATLAB char arrays are decoded from UTF-16;
    /// numeric identifiers are formatted as numbers.
    fn read_string(&self, field: &str) -> Result<String, AppError> {
        let dataset = self.dataset(field)?;
        match dataset.dtype()?.to_descriptor()? {
            TypeDescriptor::Unsigned(IntSize::U2) => {
                let units = dataset.read_raw::<u16>()?;
                if units.is_empty() {
                    return Err(self.empty(field));
                }
                Ok(String::from_utf16_lossy(&units)
                    .trim_end_matches('\0')
                    .to_string())
            }
            descriptor => {
                check_numeric(field, &descriptor)?;
                let value = self.read_scalar(field)?;
                Ok(format_numeric_id(value))
            }
        }
    }
}

fn check_numeric(field: &str, descriptor: &TypeDescriptor) -> Result<(), AppError> {
    match descriptor {
        TypeDescriptor::Integer(_)
        | TypeDescriptor::Unsigned(_)
        | TypeDescriptor::Float(_) => Ok(()),
        other => Err(AppError::UnsupportedFieldType {
            field: field.to_string(),
            dtype: format!("{:?}", other),
        }),
    }
}

/// Whole-number IDs print without a trailing `.0`.
fn format_numeric_id(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
