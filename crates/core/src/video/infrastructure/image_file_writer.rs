use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;

use crate::shared::constants::STAGED_FRAME_JPEG_QUALITY;
use crate::shared::frame::Frame;
use crate::video::domain::image_writer::ImageWriter;

/// Writes RGB frames with the `image` crate. JPEG output uses a fixed
/// quality; every other extension is left to `image`'s defaults.
pub struct ImageFileWriter {
    jpeg_quality: u8,
}

impl ImageFileWriter {
    pub fn new() -> Self {
        Self {
            jpeg_quality: STAGED_FRAME_JPEG_QUALITY,
        }
    }
}

impl Default for ImageFileWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn is_jpeg(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("jpg") || e.eq_ignore_ascii_case("jpeg"))
}

impl ImageWriter for ImageFileWriter {
    fn write(&self, path: &Path, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        if frame.channels() != 3 {
            return Err(format!("expected an RGB frame, got {} channels", frame.channels()).into());
        }
        let img = image::RgbImage::from_raw(frame.width(), frame.height(), frame.data().to_vec())
            .ok_or("Failed to create image from frame data")?;

        if is_jpeg(path) {
            let mut out = BufWriter::new(File::create(path)?);
            JpegEncoder::new_with_quality(&mut out, self.jpeg_quality).encode_image(&img)?;
        } else {
            img.save(path)?;
        }
        Ok(())
    }
}
