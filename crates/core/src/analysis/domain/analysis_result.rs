use serde::{Deserialize, Serialize};

use crate::analysis::domain::face_metrics::FaceMetrics;
use crate::shared::error::AnalysisError;

/// Final classification of one image or video.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub is_deepfake: bool,
    pub confidence: f64,
    /// Per-face metrics, in detection order (heuristic image analysis only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FaceMetrics>>,
    /// Frames scanned, including those that yielded no result (video only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frames_analyzed: Option<usize>,
}

impl AnalysisResult {
    pub fn new(confidence: f64, threshold: f64) -> Self {
        Self {
            is_deepfake: exceeds_threshold(confidence, threshold),
            confidence,
            details: None,
            frames_analyzed: None,
        }
    }

    pub fn with_details(mut self, details: Option<Vec<FaceMetrics>>) -> Self {
        self.details = details;
        self
    }

    pub fn with_frames_analyzed(mut self, frames: usize) -> Self {
        self.frames_analyzed = Some(frames);
        self
    }
}

/// Strict comparison: a confidence equal to the threshold is authentic.
pub fn exceeds_threshold(confidence: f64, threshold: f64) -> bool {
    confidence > threshold
}

/// Boundary form of an analysis: either the result fields or a lone
/// `error` message, never both.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisReport {
    Failure { error: String },
    Success(AnalysisResult),
}

impl AnalysisReport {
    pub fn is_error(&self) -> bool {
        matches!(self, AnalysisReport::Failure { .. })
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            AnalysisReport::Success(result) => Some(result),
            AnalysisReport::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            AnalysisReport::Failure { error } => Some(error),
            AnalysisReport::Success(_) => None,
        }
    }
}

impl From<Result<AnalysisResult, AnalysisError>> for AnalysisReport {
    fn from(outcome: Result<AnalysisResult, AnalysisError>) -> Self {
        match outcome {
            Ok(result) => AnalysisReport::Success(result),
            Err(e) => AnalysisReport::Failure {
                error: e.to_string(),
            },
        }
    }
}
