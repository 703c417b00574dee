use std::path::Path;

use crate::shared::frame::Frame;
use crate::shared::video_metadata::VideoMetadata;

/// Decoded frames in presentation order. Errors are per frame; a reader
/// that hits an unrecoverable decode error yields it and then stops.
pub type FrameStream<'a> = Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + 'a>;

/// Source of RGB frames for analysis: a still image (one frame) or a
/// video container.
pub trait VideoReader: Send {
    /// Opens `path` and reports its stream properties.
    fn open(&mut self, path: &Path) -> Result<VideoMetadata, Box<dyn std::error::Error>>;

    /// Frames of the opened source. Yields a single error when nothing is
    /// open.
    fn frames(&mut self) -> FrameStream<'_>;

    fn close(&mut self);
}
