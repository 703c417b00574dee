pub const SEETA_MODEL_NAME: &str = "seeta_fd_frontal_v1.0.bin";
pub const SEETA_MODEL_URL: &str =
    "https://github.com/atomashpolskiy/rustface/raw/master/model/seeta_fd_frontal_v1.0.bin";

/// Frames inspected per video, counted from the start of the stream.
pub const MAX_VIDEO_FRAMES: usize = 30;

/// `is_deepfake` threshold for the face-metric heuristic.
pub const HEURISTIC_THRESHOLD: f64 = 0.7;

/// `is_deepfake` threshold for learned-model classifiers.
pub const MODEL_THRESHOLD: f64 = 0.5;

/// Square input resolution of the learned models.
pub const MODEL_INPUT_SIZE: u32 = 224;

pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4"];

/// Quality used when staging decoded video frames as JPEG.
pub const STAGED_FRAME_JPEG_QUALITY: u8 = 95;
