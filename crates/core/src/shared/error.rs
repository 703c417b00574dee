use std::path::PathBuf;

use thiserror::Error;

/// Expected per-request failures of an analysis.
///
/// The `Display` strings are the exact messages placed in the `error`
/// field of a failed [`crate::analysis::domain::analysis_result::AnalysisReport`].
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Could not read image")]
    UnreadableImage { reason: String },

    #[error("Could not open video")]
    UnreadableVideo { reason: String },

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Unsupported file type '{0}'. Please use .png, .jpg, .jpeg, or .mp4 files.")]
    UnsupportedFileType(String),

    #[error("No face detected in the image")]
    NoFaceDetected,

    #[error("No valid frames analyzed")]
    NoValidFrames,

    #[error("Invalid face region: {0}")]
    InvalidRegion(String),

    #[error("Face detection failed: {0}")]
    Detection(String),

    #[error("Model inference failed: {0}")]
    Inference(String),

    #[error("Failed to stage temporary file: {0}")]
    Staging(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_report_strings() {
        assert_eq!(
            AnalysisError::NoFaceDetected.to_string(),
            "No face detected in the image"
        );
        assert_eq!(
            AnalysisError::NoValidFrames.to_string(),
            "No valid frames analyzed"
        );
        assert_eq!(
            AnalysisError::UnreadableImage {
                reason: "truncated".into()
            }
            .to_string(),
            "Could not read image"
        );
        assert_eq!(
            AnalysisError::UnreadableVideo {
                reason: "no stream".into()
            }
            .to_string(),
            "Could not open video"
        );
    }

    #[test]
    fn test_unsupported_type_names_extension() {
        let msg = AnalysisError::UnsupportedFileType("gif".into()).to_string();
        assert!(msg.contains("'gif'"));
        assert!(msg.contains(".mp4"));
    }
}
