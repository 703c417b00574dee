use serde::{Deserialize, Serialize};

pub const EDGE_WEIGHT: f64 = 0.4;
pub const COLOR_WEIGHT: f64 = 0.3;
pub const TEXTURE_WEIGHT: f64 = 0.3;

/// Per-face heuristic measurements and their weighted combination.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FaceMetrics {
    pub score: f64,
    pub edge_density: f64,
    pub color_consistency: f64,
    pub texture_complexity: f64,
}

impl FaceMetrics {
    /// Builds the record from the three sub-metrics, deriving `score`.
    pub fn combine(edge_density: f64, color_consistency: f64, texture_complexity: f64) -> Self {
        Self {
            score: EDGE_WEIGHT * edge_density
                + COLOR_WEIGHT * color_consistency
                + TEXTURE_WEIGHT * texture_complexity,
            edge_density,
            color_consistency,
            texture_complexity,
        }
    }
}

/// Arithmetic mean of `values`, or `None` for an empty input.
pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (count > 0).then(|| sum / count as f64)
}
