use crate::shared::error::AnalysisError;
use crate::shared::region::Region;

/// Fixed-point luma weights (R, G, B) scaled by 2^14, matching the usual
/// 8-bit BT.601 grayscale conversion.
const LUMA_R: u32 = 4899;
const LUMA_G: u32 = 9617;
const LUMA_B: u32 = 1868;
const LUMA_SHIFT: u32 = 14;

/// A single image or video frame: tightly packed pixels in row-major order.
///
/// Color frames are RGB (3 channels); grayscale frames carry 1 channel.
/// Decoders convert to RGB at the I/O boundary so analysis code never
/// sees codec-specific layouts.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
            index,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_empty(&self) -> bool {
        self.pixel_count() == 0
    }

    /// Converts an RGB frame to a single-channel luma frame.
    ///
    /// Already-gray frames are returned as a copy.
    pub fn to_grayscale(&self) -> Frame {
        if self.channels == 1 {
            return self.clone();
        }
        let channels = self.channels as usize;
        let gray = self
            .data
            .chunks_exact(channels)
            .map(|px| luma(px[0], px[1], px[2]))
            .collect();
        Frame::new(gray, self.width, self.height, 1, self.index)
    }

    /// Copies the pixels inside `region` into a new frame.
    ///
    /// The region is clamped to the frame bounds first; a region with no
    /// overlap yields `InvalidRegion`.
    pub fn crop(&self, region: &Region) -> Result<Frame, AnalysisError> {
        let clamped = region.clamp_to(self.width, self.height).ok_or_else(|| {
            AnalysisError::InvalidRegion(format!(
                "{region:?} lies outside {}x{} frame",
                self.width, self.height
            ))
        })?;

        let channels = self.channels as usize;
        let frame_w = self.width as usize;
        let (x, y) = (clamped.x as usize, clamped.y as usize);
        let (w, h) = (clamped.width as usize, clamped.height as usize);

        let mut pixels = Vec::with_capacity(w * h * channels);
        for row in y..y + h {
            let start = (row * frame_w + x) * channels;
            pixels.extend_from_slice(&self.data[start..start + w * channels]);
        }
        Ok(Frame::new(
            pixels,
            w as u32,
            h as u32,
            self.channels,
            self.index,
        ))
    }
}

fn luma(r: u8, g: u8, b: u8) -> u8 {
    let sum = r as u32 * LUMA_R + g as u32 * LUMA_G + b as u32 * LUMA_B;
    ((sum + (1 << (LUMA_SHIFT - 1))) >> LUMA_SHIFT) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb_frame(w: u32, h: u32, rgb: [u8; 3]) -> Frame {
        let data = rgb.repeat((w * h) as usize);
        Frame::new(data, w, h, 3, 0)
    }

    #[test]
    fn test_construction_and_accessors() {
        let data = vec![0u8; 12]; // 2x2x3
        let frame = Frame::new(data.clone(), 2, 2, 3, 5);
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.channels(), 3);
        assert_eq!(frame.index(), 5);
        assert_eq!(frame.data(), &data[..]);
        assert_eq!(frame.pixel_count(), 4);
    }

    #[test]
    #[should_panic(expected = "data length must equal width * height * channels")]
    fn test_mismatched_data_length_panics_in_debug() {
        Frame::new(vec![0u8; 10], 2, 2, 3, 0);
    }

    #[test]
    fn test_zero_area_frame_is_empty() {
        let frame = Frame::new(Vec::new(), 0, 4, 3, 0);
        assert!(frame.is_empty());
    }

    #[test]
    fn test_grayscale_of_neutral_gray_is_exact() {
        let gray = rgb_frame(4, 4, [128, 128, 128]).to_grayscale();
        assert_eq!(gray.channels(), 1);
        assert!(gray.data().iter().all(|&v| v == 128));
    }

    #[test]
    fn test_grayscale_weights_green_heaviest() {
        let red = rgb_frame(1, 1, [255, 0, 0]).to_grayscale().data()[0];
        let green = rgb_frame(1, 1, [0, 255, 0]).to_grayscale().data()[0];
        let blue = rgb_frame(1, 1, [0, 0, 255]).to_grayscale().data()[0];
        assert_eq!(red, 76);
        assert_eq!(green, 150);
        assert_eq!(blue, 29);
    }

    #[test]
    fn test_grayscale_of_gray_frame_is_copy() {
        let gray = Frame::new(vec![7; 4], 2, 2, 1, 3);
        let again = gray.to_grayscale();
        assert_eq!(again.data(), gray.data());
        assert_eq!(again.index(), 3);
    }

    #[test]
    fn test_crop_extracts_sub_image() {
        // 3x2 frame, pixel value encodes column
        let data: Vec<u8> = (0..2)
            .flat_map(|_| (0..3u8).flat_map(|c| [c, c, c]))
            .collect();
        let frame = Frame::new(data, 3, 2, 3, 0);
        let crop = frame.crop(&Region::new(1, 0, 2, 2)).unwrap();
        assert_eq!(crop.width(), 2);
        assert_eq!(crop.height(), 2);
        assert_eq!(crop.data(), &[1, 1, 1, 2, 2, 2, 1, 1, 1, 2, 2, 2]);
    }

    #[test]
    fn test_crop_clamps_to_frame() {
        let frame = rgb_frame(10, 10, [1, 2, 3]);
        let crop = frame.crop(&Region::new(8, 8, 5, 5)).unwrap();
        assert_eq!((crop.width(), crop.height()), (2, 2));
    }

    #[test]
    fn test_crop_outside_frame_is_invalid_region() {
        let frame = rgb_frame(10, 10, [1, 2, 3]);
        let err = frame.crop(&Region::new(20, 20, 5, 5)).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidRegion(_)));
    }
}
