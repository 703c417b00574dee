use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::detection::domain::face_detector::FaceDetector;
use crate::shared::config::DetectorSettings;
use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// Frontal face cascade backed by the `rustface` crate (SeetaFace engine).
///
/// The model is parsed once; a fresh detector is built from it per call
/// because `rustface` detectors are not `Send`.
pub struct SeetaFaceDetector {
    model: rustface::Model,
    settings: DetectorSettings,
}

impl SeetaFaceDetector {
    pub fn new(
        model_path: &Path,
        settings: DetectorSettings,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let file = File::open(model_path)
            .map_err(|e| format!("cannot open face model {}: {e}", model_path.display()))?;
        let model = rustface::read_model(BufReader::new(file))
            .map_err(|e| format!("cannot parse face model {}: {e}", model_path.display()))?;
        log::debug!("Loaded face model from {}", model_path.display());
        Ok(Self { model, settings })
    }
}

impl FaceDetector for SeetaFaceDetector {
    fn detect(&mut self, gray: &Frame) -> Result<Vec<Region>, Box<dyn std::error::Error>> {
        if gray.channels() != 1 {
            return Err(format!(
                "face detector expects a grayscale frame, got {} channels",
                gray.channels()
            )
            .into());
        }

        let mut detector = rustface::create_detector_with_model(self.model.clone());
        detector.set_min_face_size(self.settings.min_face_size);
        detector.set_score_thresh(self.settings.score_threshold);
        detector.set_pyramid_scale_factor(self.settings.pyramid_scale_factor);
        detector.set_slide_window_step(self.settings.window_step, self.settings.window_step);

        let image = rustface::ImageData::new(gray.data(), gray.width(), gray.height());
        let faces = detector.detect(&image);

        Ok(faces
            .iter()
            .map(|face| {
                let bbox = face.bbox();
                Region::new(bbox.x(), bbox.y(), bbox.width() as i32, bbox.height() as i32)
            })
            .collect())
    }
}
