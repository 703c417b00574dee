use std::path::Path;
use std::time::Instant;

use crate::analysis::domain::analysis_result::AnalysisResult;
use crate::analysis::domain::face_metrics::mean;
use crate::shared::error::AnalysisError;
use crate::video::domain::video_reader::VideoReader;

use super::analyze_image_use_case::AnalyzeImageUseCase;
use super::frame_staging::FrameStager;
use super::pipeline_logger::PipelineLogger;

fn elapsed_ms(since: Instant) -> f64 {
    since.elapsed().as_secs_f64() * 1000.0
}

/// Video analysis: scan the first `max_frames` frames, run each through
/// the image pipeline via a staged JPEG, and average what succeeds.
///
/// Frames whose analysis fails are counted as scanned but contribute no
/// confidence. A decode error stops the scan early.
pub struct AnalyzeVideoUseCase {
    reader: Box<dyn VideoReader>,
    stager: FrameStager,
    max_frames: usize,
    logger: Box<dyn PipelineLogger>,
}

impl AnalyzeVideoUseCase {
    pub fn new(
        reader: Box<dyn VideoReader>,
        stager: FrameStager,
        max_frames: usize,
        logger: Box<dyn PipelineLogger>,
    ) -> Self {
        Self {
            reader,
            stager,
            max_frames,
            logger,
        }
    }

    pub fn execute(
        &mut self,
        input_path: &Path,
        image: &mut AnalyzeImageUseCase,
    ) -> Result<AnalysisResult, AnalysisError> {
        self.logger.begin_run();
        let metadata = self
            .reader
            .open(input_path)
            .map_err(|e| AnalysisError::UnreadableVideo {
                reason: e.to_string(),
            })?;
        let total = metadata.frames_to_scan(self.max_frames);
        self.logger.info(&format!(
            "Analyzing {} ({}x{}, up to {total} frames, {} classifier)",
            input_path.display(),
            metadata.width,
            metadata.height,
            image.classifier_name()
        ));

        let mut confidences = Vec::new();
        let mut scanned = 0;
        let mut frames = self.reader.frames();

        while scanned < self.max_frames {
            let decode_start = Instant::now();
            let frame = match frames.next() {
                None => break,
                Some(Ok(frame)) => frame,
                Some(Err(e)) => {
                    log::warn!("Stopping after {scanned} frames: {e}");
                    break;
                }
            };
            self.logger.timing("decode", elapsed_ms(decode_start));
            scanned += 1;
            self.logger.progress(scanned, total);

            let stage_start = Instant::now();
            let staged = match self.stager.stage_frame(&frame) {
                Ok(staged) => staged,
                Err(e) => {
                    log::debug!("Frame {}: {e}", frame.index());
                    continue;
                }
            };
            self.logger.timing("stage", elapsed_ms(stage_start));

            let classify_start = Instant::now();
            match image.execute(staged.path()) {
                Ok(result) => {
                    self.logger.metric("confidence", result.confidence);
                    confidences.push(result.confidence);
                }
                Err(e) => log::debug!("Frame {}: {e}", frame.index()),
            }
            self.logger.timing("classify", elapsed_ms(classify_start));
        }
        drop(frames);
        self.reader.close();
        self.logger.summary();

        let confidence = mean(confidences.iter().copied()).ok_or(AnalysisError::NoValidFrames)?;
        log::debug!(
            "{} of {scanned} frames classified, mean confidence {confidence:.4}",
            confidences.len()
        );
        Ok(AnalysisResult::new(confidence, image.threshold()).with_frames_analyzed(scanned))
    }
}
