/// Fixed-point shift used for the saturation division table.
const HSV_SHIFT: u32 = 12;

/// Saturation channel of the 8-bit HSV representation of an RGB buffer.
///
/// `S = 255 · (max − min) / max`, 0 for black pixels, rounded the same way
/// as the common fixed-point `RGB -> HSV` conversion.
pub fn saturation(rgb: &[u8]) -> Vec<u8> {
    rgb.chunks_exact(3)
        .map(|px| {
            let v = px[0].max(px[1]).max(px[2]) as i32;
            let min = px[0].min(px[1]).min(px[2]) as i32;
            if v == 0 {
                return 0;
            }
            let sdiv = ((255i32 << HSV_SHIFT) as f64 / v as f64).round() as i32;
            (((v - min) * sdiv + (1 << (HSV_SHIFT - 1))) >> HSV_SHIFT) as u8
        })
        .collect()
}

/// 4-neighbour Laplacian `[0 1 0; 1 -4 1; 0 1 0]` with reflect-101 borders.
pub fn laplacian(gray: &[u8], width: usize, height: usize) -> Vec<f64> {
    debug_assert_eq!(gray.len(), width * height);
    let px = |x: isize, y: isize| -> f64 {
        let rx = reflect_101(x, width);
        let ry = reflect_101(y, height);
        gray[ry * width + rx] as f64
    };

    let mut out = Vec::with_capacity(width * height);
    for y in 0..height as isize {
        for x in 0..width as isize {
            out.push(
                px(x, y - 1) + px(x - 1, y) + px(x + 1, y) + px(x, y + 1) - 4.0 * px(x, y),
            );
        }
    }
    out
}

/// Mirrors an out-of-range index without repeating the edge sample
/// (`-1 -> 1`, `n -> n-2`).
fn reflect_101(i: isize, n: usize) -> usize {
    let n = n as isize;
    if n == 1 {
        return 0;
    }
    let mut i = i;
    while i < 0 || i >= n {
        if i < 0 {
            i = -i;
        }
        if i >= n {
            i = 2 * n - 2 - i;
        }
    }
    i as usize
}

/// Population standard deviation; 0 for an empty input.
pub fn std_dev(values: impl IntoIterator<Item = f64> + Clone) -> f64 {
    let (sum, count) = values
        .clone()
        .into_iter()
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if count == 0 {
        return 0.0;
    }
    let mean = sum / count as f64;
    let var = values
        .into_iter()
        .map(|v| (v - mean) * (v - mean))
        .sum::<f64>()
        / count as f64;
    var.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case::gray([128, 128, 128], 0)]
    #[case::black([0, 0, 0], 0)]
    #[case::pure_red([255, 0, 0], 255)]
    #[case::half_saturated([200, 100, 100], 127)]
    fn test_saturation(#[case] rgb: [u8; 3], #[case] expected: u8) {
        assert_eq!(saturation(&rgb), vec![expected]);
    }

    #[test]
    fn test_saturation_one_value_per_pixel() {
        assert_eq!(saturation(&[10u8; 12]).len(), 4);
    }

    #[test]
    fn test_laplacian_flat_is_zero() {
        let lap = laplacian(&[77u8; 25], 5, 5);
        assert!(lap.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_laplacian_single_spike() {
        // 3x3 with a bright center
        let mut gray = vec![0u8; 9];
        gray[4] = 10;
        let lap = laplacian(&gray, 3, 3);
        assert_relative_eq!(lap[4], -40.0);
        // Edge neighbours see the spike once, plus its mirror for the
        // reflected side.
        assert_relative_eq!(lap[1], 20.0);
        assert_relative_eq!(lap[0], 0.0);
    }

    #[rstest]
    #[case(-1, 5, 1)]
    #[case(-2, 5, 2)]
    #[case(5, 5, 3)]
    #[case(6, 5, 2)]
    #[case(3, 5, 3)]
    #[case(-1, 1, 0)]
    fn test_reflect_101(#[case] i: isize, #[case] n: usize, #[case] expected: usize) {
        assert_eq!(reflect_101(i, n), expected);
    }

    #[test]
    fn test_std_dev() {
        assert_relative_eq!(std_dev(vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]), 2.0);
        assert_relative_eq!(std_dev(vec![3.0; 10]), 0.0);
        assert_relative_eq!(std_dev(Vec::<f64>::new()), 0.0);
    }
}
