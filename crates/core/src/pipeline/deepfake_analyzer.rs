use std::path::Path;

use crate::analysis::domain::analysis_result::{AnalysisReport, AnalysisResult};
use crate::analysis::domain::frame_classifier::FrameClassifier;
use crate::analysis::infrastructure::classifier_factory::create_classifier;
use crate::shared::config::AnalyzerConfig;
use crate::shared::error::AnalysisError;
use crate::shared::media_kind::MediaKind;
use crate::shared::model_resolver::ProgressFn;
use crate::video::infrastructure::ffmpeg_reader::FfmpegReader;
use crate::video::infrastructure::image_file_reader::ImageFileReader;
use crate::video::infrastructure::image_file_writer::ImageFileWriter;

use super::analyze_image_use_case::AnalyzeImageUseCase;
use super::analyze_video_use_case::AnalyzeVideoUseCase;
use super::frame_staging::FrameStager;
use super::pipeline_logger::LogPipelineLogger;

/// Long-lived analysis handle.
///
/// Built once at start-up (models are loaded here, so failures surface
/// immediately) and then reused for every request. Each `analyze_*` call
/// returns an [`AnalysisReport`]: request-level failures never escape as
/// `Err`.
pub struct DeepfakeAnalyzer {
    image: AnalyzeImageUseCase,
    video: AnalyzeVideoUseCase,
    uploads: FrameStager,
}

impl DeepfakeAnalyzer {
    pub fn from_config(config: &AnalyzerConfig) -> Result<Self, Box<dyn std::error::Error>> {
        Self::from_config_with_progress(config, None)
    }

    /// Like [`Self::from_config`], reporting face-model download progress.
    pub fn from_config_with_progress(
        config: &AnalyzerConfig,
        progress: Option<ProgressFn>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let classifier = create_classifier(config, progress)?;
        Ok(Self::with_classifier(classifier, config))
    }

    /// Wires the default readers and writers around `classifier`.
    pub fn with_classifier(classifier: Box<dyn FrameClassifier>, config: &AnalyzerConfig) -> Self {
        let stager = || {
            FrameStager::new(
                Box::new(ImageFileWriter::new()),
                config.staging_dir.clone(),
            )
        };
        Self {
            image: AnalyzeImageUseCase::new(Box::new(ImageFileReader::new()), classifier),
            video: AnalyzeVideoUseCase::new(
                Box::new(FfmpegReader::new()),
                stager(),
                config.max_video_frames,
                Box::new(LogPipelineLogger::default()),
            ),
            uploads: stager(),
        }
    }

    /// Checks existence, then dispatches on the file extension.
    pub fn analyze_path(&mut self, path: &Path) -> AnalysisReport {
        self.try_analyze_path(path).into()
    }

    pub fn analyze_image(&mut self, path: &Path) -> AnalysisReport {
        self.image.execute(path).into()
    }

    pub fn analyze_video(&mut self, path: &Path) -> AnalysisReport {
        self.video.execute(path, &mut self.image).into()
    }

    /// Analyzes an in-memory upload. `file_name` only decides the media
    /// type; the buffer is staged to a temporary file that is removed
    /// before this returns.
    pub fn analyze_bytes(&mut self, bytes: &[u8], file_name: &str) -> AnalysisReport {
        self.try_analyze_bytes(bytes, file_name).into()
    }

    fn try_analyze_path(&mut self, path: &Path) -> Result<AnalysisResult, AnalysisError> {
        if !path.exists() {
            return Err(AnalysisError::FileNotFound(path.to_path_buf()));
        }
        let kind = MediaKind::from_path(path)?;
        self.dispatch(kind, path)
    }

    fn try_analyze_bytes(
        &mut self,
        bytes: &[u8],
        file_name: &str,
    ) -> Result<AnalysisResult, AnalysisError> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        let kind = MediaKind::from_extension(extension)?;
        let staged = self.uploads.stage_bytes(bytes, extension)?;
        log::debug!("Staged {} bytes of {file_name} at {}", bytes.len(), staged.path().display());
        self.dispatch(kind, staged.path())
    }

    fn dispatch(&mut self, kind: MediaKind, path: &Path) -> Result<AnalysisResult, AnalysisError> {
        log::info!("Analyzing {} as {kind:?}", path.display());
        match kind {
            MediaKind::Image => self.image.execute(path),
            MediaKind::Video => self.video.execute(path, &mut self.image),
        }
    }
}
