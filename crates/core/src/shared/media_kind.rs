use std::path::Path;

use crate::shared::constants::{IMAGE_EXTENSIONS, VIDEO_EXTENSIONS};
use crate::shared::error::AnalysisError;

/// Which pipeline handles a given input file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Classifies a path by its (case-insensitive) extension.
    pub fn from_path(path: &Path) -> Result<Self, AnalysisError> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .unwrap_or_default();
        Self::from_extension(&ext)
    }

    pub fn from_extension(ext: &str) -> Result<Self, AnalysisError> {
        let ext = ext.trim_start_matches('.').to_lowercase();
        if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            Ok(MediaKind::Image)
        } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            Ok(MediaKind::Video)
        } else {
            Err(AnalysisError::UnsupportedFileType(ext))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("face.png", MediaKind::Image)]
    #[case("face.JPG", MediaKind::Image)]
    #[case("face.jpeg", MediaKind::Image)]
    #[case("/tmp/clip.mp4", MediaKind::Video)]
    #[case("clip.MP4", MediaKind::Video)]
    fn test_supported_extensions(#[case] path: &str, #[case] expected: MediaKind) {
        assert_eq!(MediaKind::from_path(Path::new(path)).unwrap(), expected);
    }

    #[rstest]
    #[case("anim.gif")]
    #[case("clip.mov")]
    #[case("no_extension")]
    fn test_unsupported_extensions(#[case] path: &str) {
        let err = MediaKind::from_path(Path::new(path)).unwrap_err();
        assert!(matches!(err, AnalysisError::UnsupportedFileType(_)));
    }

    #[test]
    fn test_from_extension_accepts_leading_dot() {
        assert_eq!(MediaKind::from_extension(".Png").unwrap(), MediaKind::Image);
    }
}
