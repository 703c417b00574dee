/// Axis-aligned rectangle in frame pixel coordinates.
///
/// Detectors may report boxes that extend past the frame edge, so
/// coordinates are signed; [`Region::clamp_to`] produces the visible part.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Intersects the region with a `frame_width` × `frame_height` frame.
    ///
    /// Returns `None` when nothing of the region is visible.
    pub fn clamp_to(&self, frame_width: u32, frame_height: u32) -> Option<Region> {
        let x1 = self.x.max(0);
        let y1 = self.y.max(0);
        let x2 = (self.x.saturating_add(self.width)).min(frame_width as i32);
        let y2 = (self.y.saturating_add(self.height)).min(frame_height as i32);
        if x2 <= x1 || y2 <= y1 {
            return None;
        }
        Some(Region::new(x1, y1, x2 - x1, y2 - y1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_clamp_inside_is_identity() {
        let r = Region::new(10, 10, 30, 30);
        assert_eq!(r.clamp_to(100, 100), Some(r));
    }

    #[test]
    fn test_clamp_negative_origin() {
        let r = Region::new(-10, -5, 30, 30);
        assert_eq!(r.clamp_to(100, 100), Some(Region::new(0, 0, 20, 25)));
    }

    #[test]
    fn test_clamp_past_right_edge() {
        let r = Region::new(90, 90, 30, 30);
        assert_eq!(r.clamp_to(100, 100), Some(Region::new(90, 90, 10, 10)));
    }

    #[rstest]
    #[case::outside_right(Region::new(100, 0, 10, 10))]
    #[case::outside_top(Region::new(0, -20, 10, 10))]
    #[case::zero_width(Region::new(5, 5, 0, 10))]
    #[case::zero_height(Region::new(5, 5, 10, 0))]
    fn test_clamp_without_overlap_is_none(#[case] r: Region) {
        assert_eq!(r.clamp_to(100, 100), None);
    }
}
