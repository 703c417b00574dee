use crate::analysis::domain::face_metrics::{mean, FaceMetrics};
use crate::analysis::domain::frame_classifier::{FrameClassifier, FrameVerdict};
use crate::analysis::domain::heuristic_face_scorer::HeuristicFaceScorer;
use crate::detection::domain::face_detector::FaceDetector;
use crate::shared::constants::HEURISTIC_THRESHOLD;
use crate::shared::error::AnalysisError;
use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// Detect faces, score each crop, average the scores.
pub struct HeuristicClassifier {
    detector: Box<dyn FaceDetector>,
    scorer: HeuristicFaceScorer,
}

impl HeuristicClassifier {
    pub fn new(detector: Box<dyn FaceDetector>) -> Self {
        Self {
            detector,
            scorer: HeuristicFaceScorer::new(),
        }
    }
}

impl FrameClassifier for HeuristicClassifier {
    fn classify(&mut self, frame: &Frame) -> Result<FrameVerdict, AnalysisError> {
        let gray = frame.to_grayscale();
        let faces: Vec<Region> = self
            .detector
            .detect(&gray)
            .map_err(|e| AnalysisError::Detection(e.to_string()))?
            .into_iter()
            .filter_map(|r| r.clamp_to(frame.width(), frame.height()))
            .collect();
        log::debug!("Frame {}: {} face(s)", frame.index(), faces.len());

        if faces.is_empty() {
            return Err(AnalysisError::NoFaceDetected);
        }

        let details = faces
            .iter()
            .map(|region| self.scorer.score(&frame.crop(region)?))
            .collect::<Result<Vec<FaceMetrics>, AnalysisError>>()?;
        let confidence =
            mean(details.iter().map(|m| m.score)).ok_or(AnalysisError::NoFaceDetected)?;

        Ok(FrameVerdict {
            confidence,
            details: Some(details),
        })
    }

    fn threshold(&self) -> f64 {
        HEURISTIC_THRESHOLD
    }

    fn name(&self) -> &'static str {
        "heuristic"
    }
}
