use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// Domain interface for face detection.
///
/// Takes a single-channel (grayscale) frame and returns face boxes in the
/// order the backend reports them. Boxes may extend past the frame edge.
pub trait FaceDetector: Send {
    fn detect(&mut self, gray: &Frame) -> Result<Vec<Region>, Box<dyn std::error::Error>>;
}
