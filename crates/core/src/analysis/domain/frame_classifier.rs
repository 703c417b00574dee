use crate::analysis::domain::face_metrics::FaceMetrics;
use crate::shared::error::AnalysisError;
use crate::shared::frame::Frame;

/// Outcome of classifying one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameVerdict {
    /// Likelihood of manipulation; in `[0, 1]` except for the unclamped
    /// heuristic texture term.
    pub confidence: f64,
    /// Per-face breakdown, when the classifier works face by face.
    pub details: Option<Vec<FaceMetrics>>,
}

impl FrameVerdict {
    pub fn new(confidence: f64) -> Self {
        Self {
            confidence,
            details: None,
        }
    }
}

/// The "is this frame a deepfake" capability.
///
/// Implementations may hold inference sessions or detector state, hence
/// `&mut self`. Each reports the threshold its confidences are compared
/// against.
pub trait FrameClassifier: Send {
    fn classify(&mut self, frame: &Frame) -> Result<FrameVerdict, AnalysisError>;

    /// `is_deepfake` is `confidence > threshold()`.
    fn threshold(&self) -> f64;

    fn name(&self) -> &'static str;
}
