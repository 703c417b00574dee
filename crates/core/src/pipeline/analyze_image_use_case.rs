use std::path::Path;

use crate::analysis::domain::analysis_result::AnalysisResult;
use crate::analysis::domain::frame_classifier::FrameClassifier;
use crate::shared::error::AnalysisError;
use crate::shared::frame::Frame;
use crate::video::domain::video_reader::VideoReader;

/// Single-image analysis: read → classify → threshold.
pub struct AnalyzeImageUseCase {
    reader: Box<dyn VideoReader>,
    classifier: Box<dyn FrameClassifier>,
}

impl AnalyzeImageUseCase {
    pub fn new(reader: Box<dyn VideoReader>, classifier: Box<dyn FrameClassifier>) -> Self {
        Self { reader, classifier }
    }

    pub fn execute(&mut self, input_path: &Path) -> Result<AnalysisResult, AnalysisError> {
        let frame = self.read(input_path)?;
        self.classify(&frame)
    }

    /// Classifies an already decoded frame against this classifier's threshold.
    pub fn classify(&mut self, frame: &Frame) -> Result<AnalysisResult, AnalysisError> {
        let verdict = self.classifier.classify(frame)?;
        Ok(AnalysisResult::new(verdict.confidence, self.classifier.threshold())
            .with_details(verdict.details))
    }

    pub fn threshold(&self) -> f64 {
        self.classifier.threshold()
    }

    pub fn classifier_name(&self) -> &'static str {
        self.classifier.name()
    }

    fn read(&mut self, input_path: &Path) -> Result<Frame, AnalysisError> {
        let unreadable = |reason: String| AnalysisError::UnreadableImage { reason };

        self.reader
            .open(input_path)
            .map_err(|e| unreadable(e.to_string()))?;
        let frame = self
            .reader
            .frames()
            .next()
            .unwrap_or_else(|| Err("image has no frames".into()))
            .map_err(|e| unreadable(e.to_string()));
        self.reader.close();
        frame
    }
}
