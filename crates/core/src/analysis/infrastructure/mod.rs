pub mod classifier_factory;
pub mod heuristic_classifier;
pub mod onnx_classifier;
