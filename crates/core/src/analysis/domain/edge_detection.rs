//! Canny edge detector over an 8-bit grayscale buffer.
//!
//! 3x3 Sobel gradients (replicated border), L1 magnitude, four-direction
//! non-maximum suppression and 8-connected hysteresis between `low` and
//! `high`. Output pixels are 255 (edge) or 0.

/// tan(22.5°) in 15-bit fixed point.
const TG22: i32 = 13573;
const SHIFT: u32 = 15;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    None,
    Weak,
    Strong,
}

pub fn canny(gray: &[u8], width: usize, height: usize, low: i32, high: i32) -> Vec<u8> {
    debug_assert_eq!(gray.len(), width * height);
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let (dx, dy) = sobel(gray, width, height);
    let magnitude: Vec<i32> = dx.iter().zip(&dy).map(|(x, y)| x.abs() + y.abs()).collect();

    let mag_at = |x: isize, y: isize| -> i32 {
        if x < 0 || y < 0 || x >= width as isize || y >= height as isize {
            0
        } else {
            magnitude[y as usize * width + x as usize]
        }
    };

    let mut marks = vec![Mark::None; width * height];
    let mut stack = Vec::new();

    for y in 0..height {
        for x in 0..width {
            let i = y * width + x;
            let m = magnitude[i];
            if m <= low {
                continue;
            }
            let (xi, yi) = (x as isize, y as isize);
            let gx = dx[i];
            let gy = dy[i];
            let xs = gx.abs();
            let ys = gy.abs() << SHIFT;
            let tg22x = xs * TG22;

            let is_max = if ys < tg22x {
                m > mag_at(xi - 1, yi) && m >= mag_at(xi + 1, yi)
            } else {
                let tg67x = tg22x + (xs << (SHIFT + 1));
                if ys > tg67x {
                    m > mag_at(xi, yi - 1) && m >= mag_at(xi, yi + 1)
                } else {
                    let s: isize = if (gx ^ gy) < 0 { -1 } else { 1 };
                    m > mag_at(xi - s, yi - 1) && m > mag_at(xi + s, yi + 1)
                }
            };
            if !is_max {
                continue;
            }

            if m > high {
                marks[i] = Mark::Strong;
                stack.push(i);
            } else {
                marks[i] = Mark::Weak;
            }
        }
    }

    while let Some(i) = stack.pop() {
        let (x, y) = ((i % width) as isize, (i / width) as isize);
        for ny in y - 1..=y + 1 {
            for nx in x - 1..=x + 1 {
                if nx < 0 || ny < 0 || nx >= width as isize || ny >= height as isize {
                    continue;
                }
                let j = ny as usize * width + nx as usize;
                if marks[j] == Mark::Weak {
                    marks[j] = Mark::Strong;
                    stack.push(j);
                }
            }
        }
    }

    marks
        .into_iter()
        .map(|m| if m == Mark::Strong { 255 } else { 0 })
        .collect()
}

/// Horizontal and vertical 3x3 Sobel responses with replicated borders.
fn sobel(gray: &[u8], width: usize, height: usize) -> (Vec<i32>, Vec<i32>) {
    let px = |x: isize, y: isize| -> i32 {
        let cx = x.clamp(0, width as isize - 1) as usize;
        let cy = y.clamp(0, height as isize - 1) as usize;
        gray[cy * width + cx] as i32
    };

    let mut dx = vec![0i32; width * height];
    let mut dy = vec![0i32; width * height];
    for y in 0..height as isize {
        for x in 0..width as isize {
            let i = y as usize * width + x as usize;
            dx[i] = (px(x + 1, y - 1) + 2 * px(x + 1, y) + px(x + 1, y + 1))
                - (px(x - 1, y - 1) + 2 * px(x - 1, y) + px(x - 1, y + 1));
            dy[i] = (px(x - 1, y + 1) + 2 * px(x, y + 1) + px(x + 1, y + 1))
                - (px(x - 1, y - 1) + 2 * px(x, y - 1) + px(x + 1, y - 1));
        }
    }
    (dx, dy)
}

/// Fraction of non-zero pixels in an edge map.
pub fn edge_density(edges: &[u8]) -> f64 {
    if edges.is_empty() {
        return 0.0;
    }
    edges.iter().filter(|&&v| v > 0).count() as f64 / edges.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn vertical_step(width: usize, height: usize, split: usize) -> Vec<u8> {
        (0..height)
            .flat_map(|_| (0..width).map(move |x| if x < split { 0 } else { 255 }))
            .collect()
    }

    #[test]
    fn test_uniform_image_has_no_edges() {
        let gray = vec![128u8; 32 * 32];
        let edges = canny(&gray, 32, 32, 100, 200);
        assert_eq!(edges.len(), 32 * 32);
        assert!(edges.iter().all(|&v| v == 0));
        assert_relative_eq!(edge_density(&edges), 0.0);
    }

    #[test]
    fn test_vertical_step_produces_thin_vertical_edge() {
        let (w, h) = (20, 10);
        let edges = canny(&vertical_step(w, h, 10), w, h, 100, 200);

        // Every row has exactly one edge pixel, next to the step.
        for y in 0..h {
            let row = &edges[y * w..(y + 1) * w];
            let cols: Vec<usize> = (0..w).filter(|&x| row[x] == 255).collect();
            assert_eq!(cols.len(), 1, "row {y}: {cols:?}");
            assert!(cols[0] == 9 || cols[0] == 10);
        }
        assert_relative_eq!(edge_density(&edges), 1.0 / w as f64);
    }

    #[test]
    fn test_weak_gradient_below_low_threshold_ignored() {
        // Step of 10 gray levels -> Sobel L1 magnitude 40, below low=100.
        let gray: Vec<u8> = (0..16)
            .flat_map(|_| (0..16).map(|x| if x < 8 { 100 } else { 110 }))
            .collect();
        let edges = canny(&gray, 16, 16, 100, 200);
        assert!(edges.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_weak_edges_kept_only_when_connected_to_strong() {
        // Left half step strong (0->255), right half weak (0->30): magnitudes
        // 1020 and 120. The weak run touches the strong run and is kept.
        let (w, h) = (12, 12);
        let gray: Vec<u8> = (0..h)
            .flat_map(|y| {
                (0..w).map(move |x| match (y < 6, x < 6) {
                    (_, true) => 0,
                    (true, false) => 255,
                    (false, false) => 30,
                })
            })
            .collect();
        let connected = canny(&gray, w, h, 100, 200);
        let isolated = canny(&gray, w, h, 100, 5000);
        assert_eq!(connected[7 * w + 5], 255);
        assert_eq!(connected[10 * w + 5], 255);
        // With no strong seeds, nothing survives hysteresis.
        assert!(isolated.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_empty_input() {
        assert!(canny(&[], 0, 0, 100, 200).is_empty());
        assert_relative_eq!(edge_density(&[]), 0.0);
    }

    #[test]
    fn test_deterministic() {
        let gray: Vec<u8> = (0..64 * 64).map(|i| ((i * 37) % 251) as u8).collect();
        assert_eq!(
            canny(&gray, 64, 64, 100, 200),
            canny(&gray, 64, 64, 100, 200)
        );
    }
}
