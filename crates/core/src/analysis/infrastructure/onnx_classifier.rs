//! Learned deepfake classifier running an ONNX model via `ort`.
//!
//! Covers both exported model families the analyzer accepts: PyTorch
//! (channels-first, ImageNet statistics, raw logit) and Keras
//! (channels-last, `[0,1]` pixels, sigmoid already applied).
use std::path::Path;

use ndarray::Array4;

use crate::analysis::domain::frame_classifier::{FrameClassifier, FrameVerdict};
use crate::shared::config::ClassifierKind;
use crate::shared::constants::{MODEL_INPUT_SIZE, MODEL_THRESHOLD};
use crate::shared::error::AnalysisError;
use crate::shared::frame::Frame;

const IMAGENET_MEAN: [f32; 3] = [0.485, 0.456, 0.406];
const IMAGENET_STD: [f32; 3] = [0.229, 0.224, 0.225];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TensorLayout {
    /// `[1, 3, H, W]`
    Nchw,
    /// `[1, H, W, 3]`
    Nhwc,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Normalization {
    /// `(p/255 - mean) / std` per channel.
    ImageNet,
    /// `p/255`.
    UnitRange,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputActivation {
    /// Raw score; sigmoid is applied here.
    Logit,
    /// Already a probability.
    Probability,
}

/// How a model expects its input and reports its output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModelPreset {
    pub name: &'static str,
    pub layout: TensorLayout,
    pub normalization: Normalization,
    pub activation: OutputActivation,
}

impl ModelPreset {
    pub const TORCH: ModelPreset = ModelPreset {
        name: "torch",
        layout: TensorLayout::Nchw,
        normalization: Normalization::ImageNet,
        activation: OutputActivation::Logit,
    };

    pub const KERAS: ModelPreset = ModelPreset {
        name: "keras",
        layout: TensorLayout::Nhwc,
        normalization: Normalization::UnitRange,
        activation: OutputActivation::Probability,
    };

    pub fn for_kind(kind: ClassifierKind) -> Option<ModelPreset> {
        match kind {
            ClassifierKind::Torch => Some(Self::TORCH),
            ClassifierKind::Keras => Some(Self::KERAS),
            ClassifierKind::Heuristic => None,
        }
    }
}

pub struct OnnxClassifier {
    session: ort::session::Session,
    preset: ModelPreset,
    input_size: u32,
}

impl OnnxClassifier {
    pub fn new(model_path: &Path, preset: ModelPreset) -> Result<Self, Box<dyn std::error::Error>> {
        let session = ort::session::Session::builder()?.commit_from_file(model_path)?;
        log::info!(
            "Loaded {} model from {}",
            preset.name,
            model_path.display()
        );
        Ok(Self {
            session,
            preset,
            input_size: MODEL_INPUT_SIZE,
        })
    }
}

impl FrameClassifier for OnnxClassifier {
    fn classify(&mut self, frame: &Frame) -> Result<FrameVerdict, AnalysisError> {
        let input = preprocess(frame, self.input_size, &self.preset)?;

        let input_value = ort::value::Tensor::from_array(input).map_err(inference_error)?;
        let outputs = self
            .session
            .run(ort::inputs![input_value])
            .map_err(inference_error)?;
        if outputs.len() == 0 {
            return Err(AnalysisError::Inference(
                "model produced no outputs".to_string(),
            ));
        }
        let tensor = outputs[0].try_extract_array::<f32>().map_err(inference_error)?;
        let raw = tensor
            .iter()
            .next()
            .copied()
            .ok_or_else(|| AnalysisError::Inference("model output is empty".to_string()))?;

        let confidence = match self.preset.activation {
            OutputActivation::Logit => sigmoid(raw as f64),
            OutputActivation::Probability => raw as f64,
        };
        Ok(FrameVerdict::new(confidence))
    }

    fn threshold(&self) -> f64 {
        MODEL_THRESHOLD
    }

    fn name(&self) -> &'static str {
        self.preset.name
    }
}

/// Resizes an RGB frame to `size`×`size` (bilinear) and lays it out as a
/// normalised f32 batch of one.
pub fn preprocess(
    frame: &Frame,
    size: u32,
    preset: &ModelPreset,
) -> Result<Array4<f32>, AnalysisError> {
    if frame.channels() != 3 || frame.is_empty() {
        return Err(AnalysisError::InvalidRegion(format!(
            "model input must be a non-empty RGB frame, got {}x{}x{}",
            frame.width(),
            frame.height(),
            frame.channels()
        )));
    }
    let img = image::RgbImage::from_raw(frame.width(), frame.height(), frame.data().to_vec())
        .ok_or_else(|| AnalysisError::InvalidRegion("frame buffer size mismatch".to_string()))?;
    let resized = image::imageops::resize(&img, size, size, image::imageops::FilterType::Triangle);

    let s = size as usize;
    let shape = match preset.layout {
        TensorLayout::Nchw => (1, 3, s, s),
        TensorLayout::Nhwc => (1, s, s, 3),
    };
    let mut tensor = Array4::<f32>::zeros(shape);
    for (x, y, pixel) in resized.enumerate_pixels() {
        let (x, y) = (x as usize, y as usize);
        for c in 0..3 {
            let v = pixel.0[c] as f32 / 255.0;
            let v = match preset.normalization {
                Normalization::ImageNet => (v - IMAGENET_MEAN[c]) / IMAGENET_STD[c],
                Normalization::UnitRange => v,
            };
            match preset.layout {
                TensorLayout::Nchw => tensor[[0, c, y, x]] = v,
                TensorLayout::Nhwc => tensor[[0, y, x, c]] = v,
            }
        }
    }
    Ok(tensor)
}

fn inference_error(e: impl std::fmt::Display) -> AnalysisError {
    AnalysisError::Inference(e.to_string())
}

pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
