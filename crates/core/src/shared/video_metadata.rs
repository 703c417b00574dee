use std::path::PathBuf;

/// Stream properties reported by a [`crate::video::domain::video_reader::VideoReader`].
///
/// `total_frames` is 0 when the container does not advertise a count.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoMetadata {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
    pub total_frames: usize,
    pub codec: String,
    pub source_path: Option<PathBuf>,
}

impl VideoMetadata {
    /// Number of frames a scan capped at `max_frames` is expected to visit.
    pub fn frames_to_scan(&self, max_frames: usize) -> usize {
        if self.total_frames == 0 {
            max_frames
        } else {
            self.total_frames.min(max_frames)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(total_frames: usize) -> VideoMetadata {
        VideoMetadata {
            width: 640,
            height: 480,
            fps: 30.0,
            total_frames,
            codec: "h264".to_string(),
            source_path: Some(PathBuf::from("/tmp/clip.mp4")),
        }
    }

    #[test]
    fn test_frames_to_scan_caps_long_videos() {
        assert_eq!(meta(900).frames_to_scan(30), 30);
    }

    #[test]
    fn test_frames_to_scan_short_video() {
        assert_eq!(meta(12).frames_to_scan(30), 12);
    }

    #[test]
    fn test_frames_to_scan_unknown_count_uses_cap() {
        assert_eq!(meta(0).frames_to_scan(30), 30);
    }
}
