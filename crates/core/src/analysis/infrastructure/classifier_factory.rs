use crate::analysis::domain::frame_classifier::FrameClassifier;
use crate::detection::infrastructure::seeta_face_detector::SeetaFaceDetector;
use crate::shared::config::{AnalyzerConfig, ClassifierKind};
use crate::shared::constants::{SEETA_MODEL_NAME, SEETA_MODEL_URL};
use crate::shared::model_resolver::{self, ModelSource, ProgressFn};

use super::heuristic_classifier::HeuristicClassifier;
use super::onnx_classifier::{ModelPreset, OnnxClassifier};

/// Builds the classifier selected by `config`, loading any model it needs.
///
/// `progress` is forwarded to the model download when the face model is
/// not cached yet.
pub fn create_classifier(
    config: &AnalyzerConfig,
    progress: Option<ProgressFn>,
) -> Result<Box<dyn FrameClassifier>, Box<dyn std::error::Error>> {
    config.validate()?;

    match ModelPreset::for_kind(config.classifier) {
        None => {
            let model_path = model_resolver::resolve(
                ModelSource {
                    name: SEETA_MODEL_NAME,
                    url: SEETA_MODEL_URL,
                },
                config.detector.model_dir.as_deref(),
                progress,
            )?;
            let detector = SeetaFaceDetector::new(&model_path, config.detector.clone())?;
            log::info!("Using heuristic classifier (face model {})", model_path.display());
            Ok(Box::new(HeuristicClassifier::new(Box::new(detector))))
        }
        Some(preset) => {
            let model_path = config.model_path.as_deref().ok_or_else(|| {
                format!("the {} classifier requires a model path", config.classifier)
            })?;
            log::info!("Using {} classifier", config.classifier);
            Ok(Box::new(OnnxClassifier::new(model_path, preset)?))
        }
    }
}

/// Short description of the classifier `kind` for help texts.
pub fn describe(kind: ClassifierKind) -> &'static str {
    match kind {
        ClassifierKind::Heuristic => "face-metric heuristic (edge, saturation, texture)",
        ClassifierKind::Torch => "ONNX export of a PyTorch model",
        ClassifierKind::Keras => "ONNX export of a Keras model",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_model_classifier_without_path_fails_validation() {
        let config = AnalyzerConfig {
            classifier: ClassifierKind::Torch,
            ..AnalyzerConfig::default()
        };
        assert!(create_classifier(&config, None).is_err());
    }

    #[test]
    fn test_model_classifier_with_missing_file_fails() {
        let config = AnalyzerConfig {
            classifier: ClassifierKind::Keras,
            model_path: Some(PathBuf::from("/nonexistent/model.onnx")),
            ..AnalyzerConfig::default()
        };
        assert!(create_classifier(&config, None).is_err());
    }

    #[test]
    fn test_describe_covers_all_kinds() {
        for kind in ClassifierKind::ALL {
            assert!(!describe(*kind).is_empty());
        }
    }
}
