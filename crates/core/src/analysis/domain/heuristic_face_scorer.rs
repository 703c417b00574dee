use crate::analysis::domain::edge_detection::{canny, edge_density};
use crate::analysis::domain::face_metrics::FaceMetrics;
use crate::analysis::domain::pixel_statistics::{laplacian, saturation, std_dev};
use crate::shared::error::AnalysisError;
use crate::shared::frame::Frame;

pub const CANNY_LOW: i32 = 100;
pub const CANNY_HIGH: i32 = 200;

/// Saturation std is normalised by the 8-bit channel range.
const SATURATION_RANGE: f64 = 255.0;

/// Laplacian std is normalised by this fixed scale. The result is not
/// clamped, so very high-contrast faces fall below 0.
const TEXTURE_SCALE: f64 = 1000.0;

/// Scores a cropped face from classical image statistics, no model needed.
///
/// Pure and stateless: the same pixels always give the same metrics.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicFaceScorer;

impl HeuristicFaceScorer {
    pub fn new() -> Self {
        Self
    }

    /// Computes edge density, saturation consistency and texture
    /// complexity of an RGB face crop and combines them.
    pub fn score(&self, face: &Frame) -> Result<FaceMetrics, AnalysisError> {
        if face.is_empty() {
            return Err(AnalysisError::InvalidRegion(format!(
                "face region has no pixels ({}x{})",
                face.width(),
                face.height()
            )));
        }
        if face.channels() != 3 {
            return Err(AnalysisError::InvalidRegion(format!(
                "face region must be RGB, got {} channels",
                face.channels()
            )));
        }

        let (w, h) = (face.width() as usize, face.height() as usize);
        let gray = face.to_grayscale();

        let edges = canny(gray.data(), w, h, CANNY_LOW, CANNY_HIGH);
        let edge_density = edge_density(&edges);

        let sat = saturation(face.data());
        let color_std = std_dev(sat.iter().map(|&s| s as f64));
        let color_consistency = 1.0 - color_std / SATURATION_RANGE;

        let lap = laplacian(gray.data(), w, h);
        let texture_std = std_dev(lap.iter().copied());
        let texture_complexity = 1.0 - texture_std / TEXTURE_SCALE;

        Ok(FaceMetrics::combine(
            edge_density,
            color_consistency,
            texture_complexity,
        ))
    }
}
