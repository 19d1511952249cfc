//! Assembles a directory of numbered JPEG images into a video with an external encoder.
//!
//! Images must be named `<pattern>NNN.jpg` with a zero-padded 3-digit frame
//! number, numbered sequentially from 001. The encoder stops at the first gap.

use crate::error::AppError;
use std::path::{Path, PathBuf};
use std::process::Command;
use walkdir::WalkDir;

/// Everything needed to turn one subject's image directory into a video.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoRequest {
    /// Directory holding the numbered images.
    pub pic_dir: PathBuf,
    /// Output video path. Overwritten if it exists.
    pub output: PathBuf,
    /// Frames per second.
    pub frame_rate: u32,
    /// Filename fragment before the frame number.
    pub pattern: String,
    /// Resolved path of the encoder executable.
    pub encoder: PathBuf,
}

/// Runs the encoder and reports its exit status.
pub trait Encoder {
    /// Invokes the encoder with `args`, blocking until it exits.
    ///
    /// Returns the exit code. Termination by a signal is reported as -1.
    fn invoke(&self, args: &[String]) -> Result<i32, AppError>;
}

/// An `Encoder` backed by an ffmpeg executable.
#[derive(Debug, Clone)]
pub struct FfmpegEncoder {
    pub program: PathBuf,
}

impl FfmpegEncoder {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Encoder for FfmpegEncoder {
    fn invoke(&self, args: &[String]) -> Result<i32, AppError> {
        log::debug!("Executing: {} {}", self.program.display(), args.join(" "));

        // stdio is inherited; the encoder prints its own progress
        let status = Command::new(&self.program).args(args).status()?;
        Ok(status.code().unwrap_or(-1))
    }
}

/// The encoder's input pattern, e.g. `pics/%03d.jpg` or `pics/%slice_03d.jpg`.
pub fn input_pattern(request: &VideoRequest) -> String {
    format!(
        "{}/%{}03d.jpg",
        request.pic_dir.to_string_lossy().trim_end_matches('/'),
        request.pattern
    )
}

/// Builds the encoder arguments: overwrite, frame rate, image input, output path.
pub fn encoder_args(request: &VideoRequest) -> Vec<String> {
    vec![
        "-y".to_string(),
        "-framerate".to_string(),
        request.frame_rate.to_string(),
        "-i".to_string(),
        input_pattern(request),
        request.output.to_string_lossy().to_string(),
    ]
}

/// Counts the images in the request's directory that match its naming pattern.
///
/// # Errors
///
/// Returns `AppError::InvalidPicDir` if the directory does not exist.
pub fn count_frames(request: &VideoRequest) -> Result<usize, AppError> {
    if !request.pic_dir.is_dir() {
        return Err(AppError::InvalidPicDir(request.pic_dir.clone()));
    }

    let count = WalkDir::new(&request.pic_dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .map_or(false, |name| is_frame_name(name, &request.pattern))
        })
        .count();
    Ok(count)
}

/// True for `<pattern><digits>.jpg` with at least 3 digits.
fn is_frame_name(name: &str, pattern: &str) -> bool {
    name.strip_prefix(pattern)
        .and_then(|rest| rest.strip_suffix(".jpg"))
        .map_or(false, |digits| {
            digits.len() >= 3 && digits.bytes().all(|b| b.is_ascii_digit())
        })
}

/// Creates the video described by `request` using `encoder`.
///
/// # Errors
///
/// * `AppError::InvalidPicDir` if the image directory does not exist.
/// * `AppError::EncoderFailed` if the encoder exits with a non-zero status.
pub fn make_video(request: &VideoRequest, encoder: &dyn Encoder) -> Result<PathBuf, AppError> {
    let frames = count_frames(request)?;
    if frames == 0 {
        log::warn!(
            "No images matching '{}' found in '{}'",
            input_pattern(request),
            request.pic_dir.display()
        );
    } else {
        log::debug!("Found {} frames in '{}'", frames, request.pic_dir.display());
    }

    let code = encoder.invoke(&encoder_args(request))?;
    if code != 0 {
        return Err(AppError::EncoderFailed(code));
    }
    Ok(request.output.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::fs;
    use tempfile::tempdir;

    /// Records every invocation and answers with a fixed exit code.
    struct StubEncoder {
        exit_code: i32,
        calls: RefCell<Vec<Vec<String>>>,
    }

    impl StubEncoder {
        fn new(exit_code: i32) -> Self {
            Self {
                exit_code,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl Encoder for StubEncoder {
        fn invoke(&self, args: &[String]) -> Result<i32, AppError> {
            self.calls.borrow_mut().push(args.to_vec());
            Ok(self.exit_code)
        }
    }

    fn request(pic_dir: &Path, pattern: &str) -> VideoRequest {
        VideoRequest {
            pic_dir: pic_dir.to_path_buf(),
            output: PathBuf::from("out.mp4"),
            frame_rate: 10,
            pattern: pattern.to_string(),
            encoder: PathBuf::from("ffmpeg"),
        }
    }

    #[test]
    fn test_input_pattern() {
        let req = request(Path::new("pics"), "");
        assert_eq!(input_pattern(&req), "pics/%03d.jpg");

        let req = request(Path::new("pics/"), "slice_");
        assert_eq!(input_pattern(&req), "pics/%slice_03d.jpg");
    }

    #[test]
    fn test_encoder_args() {
        let mut req = request(Path::new("pics"), "");
        req.frame_rate = 24;
        assert_eq!(
            encoder_args(&req),
            vec!["-y", "-framerate", "24", "-i", "pics/%03d.jpg", "out.mp4"]
        );
    }

    #[test]
    fn test_is_frame_name() {
        assert!(is_frame_name("001.jpg", ""));
        assert!(is_frame_name("1000.jpg", ""));
        assert!(is_frame_name("slice_012.jpg", "slice_"));
        assert!(!is_frame_name("01.jpg", ""));
        assert!(!is_frame_name("001.png", ""));
        assert!(!is_frame_name("abc.jpg", ""));
        assert!(!is_frame_name("001.jpg", "slice_"));
    }

    #[test]
    fn test_count_frames() {
        let dir = tempdir().unwrap();
        for name in ["001.jpg", "002.jpg", "003.jpg", "notes.txt", "cover.jpg"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }
        fs::create_dir(dir.path().join("004.jpg")).unwrap();

        assert_eq!(count_frames(&request(dir.path(), "")).unwrap(), 3);
        assert_eq!(count_frames(&request(dir.path(), "slice_")).unwrap(), 0);
    }

    #[test]
    fn test_make_video_invokes_encoder_once() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("001.jpg"), b"").unwrap();
        let req = request(dir.path(), "");
        let encoder = StubEncoder::new(0);

        let output = make_video(&req, &encoder).unwrap();
        assert_eq!(output, PathBuf::from("out.mp4"));

        let calls = encoder.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], encoder_args(&req));
    }

    #[test]
    fn test_make_video_surfaces_encoder_failure() {
        let dir = tempdir().unwrap();
        let encoder = StubEncoder::new(3);

        let err = make_video(&request(dir.path(), ""), &encoder).unwrap_err();
        assert!(matches!(err, AppError::EncoderFailed(3)));
    }

    #[test]
    fn test_make_video_rejects_missing_directory() {
        let dir = tempdir().unwrap();
        let encoder = StubEncoder::new(0);

        let err = make_video(&request(&dir.path().join("absent"), ""), &encoder).unwrap_err();
        assert!(matches!(err, AppError::InvalidPicDir(_)));
        assert!(encoder.calls.borrow().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_ffmpeg_encoder_reports_exit_code() {
        assert_eq!(FfmpegEncoder::new("true").invoke(&[]).unwrap(), 0);
        assert_eq!(FfmpegEncoder::new("false").invoke(&[]).unwrap(), 1);
    }
}
