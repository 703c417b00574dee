use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::constants::MAX_VIDEO_FRAMES;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{0}")]
    Invalid(String),
}

/// Which classifier backs the analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierKind {
    /// Face-metric heuristic; needs no model file.
    Heuristic,
    /// ONNX export of a PyTorch model: NCHW, ImageNet normalisation, logit output.
    Torch,
    /// ONNX export of a Keras model: NHWC, `[0,1]` pixels, sigmoid output.
    Keras,
}

impl ClassifierKind {
    pub const ALL: &[ClassifierKind] = &[
        ClassifierKind::Heuristic,
        ClassifierKind::Torch,
        ClassifierKind::Keras,
    ];

    pub fn needs_model(self) -> bool {
        !matches!(self, ClassifierKind::Heuristic)
    }
}

impl std::fmt::Display for ClassifierKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassifierKind::Heuristic => write!(f, "heuristic"),
            ClassifierKind::Torch => write!(f, "torch"),
            ClassifierKind::Keras => write!(f, "keras"),
        }
    }
}

impl std::str::FromStr for ClassifierKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "heuristic" => Ok(ClassifierKind::Heuristic),
            "torch" | "pytorch" => Ok(ClassifierKind::Torch),
            "keras" | "tensorflow" => Ok(ClassifierKind::Keras),
            other => Err(ConfigError::Invalid(format!(
                "classifier must be one of heuristic, torch, keras, got '{other}'"
            ))),
        }
    }
}

/// Tuning for the SeetaFace cascade detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorSettings {
    pub min_face_size: u32,
    pub score_threshold: f64,
    pub pyramid_scale_factor: f32,
    pub window_step: u32,
    /// Directory searched for the cascade model before downloading it.
    pub model_dir: Option<PathBuf>,
}

impl Default for DetectorSettings {
    fn default() -> Self {
        Self {
            min_face_size: 20,
            score_threshold: 2.0,
            pyramid_scale_factor: 0.8,
            window_step: 4,
            model_dir: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub classifier: ClassifierKind,
    pub model_path: Option<PathBuf>,
    pub max_video_frames: usize,
    pub detector: DetectorSettings,
    /// Where decoded video frames and uploaded buffers are staged.
    /// Defaults to the system temp directory.
    pub staging_dir: Option<PathBuf>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            classifier: ClassifierKind::Heuristic,
            model_path: None,
            max_video_frames: MAX_VIDEO_FRAMES,
            detector: DetectorSettings::default(),
            staging_dir: None,
        }
    }
}

impl AnalyzerConfig {
    /// Reads a JSON config file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.classifier.needs_model() && self.model_path.is_none() {
            return Err(ConfigError::Invalid(format!(
                "the {} classifier requires a model path",
                self.classifier
            )));
        }
        if self.max_video_frames == 0 {
            return Err(ConfigError::Invalid(
                "max_video_frames must be at least 1".to_string(),
            ));
        }
        let d = &self.detector;
        if d.min_face_size < 20 {
            return Err(ConfigError::Invalid(format!(
                "detector min_face_size must be >= 20, got {}",
                d.min_face_size
            )));
        }
        if !(d.pyramid_scale_factor > 0.0 && d.pyramid_scale_factor < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "detector pyramid_scale_factor must be in (0, 1), got {}",
                d.pyramid_scale_factor
            )));
        }
        if d.window_step == 0 {
            return Err(ConfigError::Invalid(
                "detector window_step must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.classifier, ClassifierKind::Heuristic);
        assert_eq!(config.max_video_frames, 30);
        assert!(config.model_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_json_fills_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        fs::write(
            &path,
            r#"{ "classifier": "torch", "model_path": "/models/df.onnx" }"#,
        )
        .unwrap();

        let config = AnalyzerConfig::load(&path).unwrap();
        assert_eq!(config.classifier, ClassifierKind::Torch);
        assert_eq!(config.model_path, Some(PathBuf::from("/models/df.onnx")));
        assert_eq!(config.max_video_frames, 30);
        assert_eq!(config.detector, DetectorSettings::default());
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let err = AnalyzerConfig::load(Path::new("/nonexistent/config.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_load_malformed_json_is_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        fs::write(&path, "{ classifier: ").unwrap();
        let err = AnalyzerConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_roundtrip_through_json() {
        let config = AnalyzerConfig {
            classifier: ClassifierKind::Keras,
            model_path: Some(PathBuf::from("model.onnx")),
            max_video_frames: 10,
            ..AnalyzerConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains(r#""classifier":"keras""#));
        let back: AnalyzerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[rstest]
    #[case::torch(ClassifierKind::Torch)]
    #[case::keras(ClassifierKind::Keras)]
    fn test_model_classifier_requires_model_path(#[case] kind: ClassifierKind) {
        let config = AnalyzerConfig {
            classifier: kind,
            ..AnalyzerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_frame_cap_rejected() {
        let config = AnalyzerConfig {
            max_video_frames: 0,
            ..AnalyzerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[rstest]
    #[case::small_face(DetectorSettings { min_face_size: 10, ..DetectorSettings::default() })]
    #[case::scale_one(DetectorSettings { pyramid_scale_factor: 1.0, ..DetectorSettings::default() })]
    #[case::zero_step(DetectorSettings { window_step: 0, ..DetectorSettings::default() })]
    fn test_invalid_detector_settings_rejected(#[case] detector: DetectorSettings) {
        let config = AnalyzerConfig {
            detector,
            ..AnalyzerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[rstest]
    #[case("heuristic", ClassifierKind::Heuristic)]
    #[case("PyTorch", ClassifierKind::Torch)]
    #[case("tensorflow", ClassifierKind::Keras)]
    fn test_classifier_kind_from_str(#[case] input: &str, #[case] expected: ClassifierKind) {
        assert_eq!(input.parse::<ClassifierKind>().unwrap(), expected);
    }

    #[test]
    fn test_classifier_kind_display_roundtrips() {
        for kind in ClassifierKind::ALL {
            assert_eq!(kind.to_string().parse::<ClassifierKind>().unwrap(), *kind);
        }
    }
}
