//! Synthetic grayscale image builders used across the pipeline's test
//! suites: single squares, checkerboards, lone pixels, and noisy binary
//! fields.

/// A flat, row-major grayscale buffer plus its dimensions, ready to be
/// handed to [`tagedge_core::GrayImage::new`].
pub struct Fixture {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// A uniform image of one value — useful for exercising the "every tile
/// is ambiguous" path of adaptive thresholding.
pub fn uniform(width: u32, height: u32, value: u8) -> Fixture {
    Fixture {
        data: vec![value; width as usize * height as usize],
        width,
        height,
    }
}

/// A black background with one or more white axis-aligned squares
/// stamped onto it. Squares are given as `(x, y, side)` — top-left
/// corner and side length, clipped to the image bounds.
pub fn squares_on_background(width: u32, height: u32, squares: &[(u32, u32, u32)]) -> Fixture {
    let mut data = vec![0u8; width as usize * height as usize];
    for &(sx, sy, side) in squares {
        for y in sy..(sy + side).min(height) {
            for x in sx..(sx + side).min(width) {
                data[(y * width + x) as usize] = 255;
            }
        }
    }
    Fixture {
        data,
        width,
        height,
    }
}

/// A black-and-white checkerboard with `period`-pixel square cells.
pub fn checkerboard(width: u32, height: u32, period: u32) -> Fixture {
    let mut data = vec![0u8; width as usize * height as usize];
    for y in 0..height {
        for x in 0..width {
            let cell_x = x / period;
            let cell_y = y / period;
            if (cell_x + cell_y) % 2 == 0 {
                data[(y * width + x) as usize] = 255;
            }
        }
    }
    Fixture {
        data,
        width,
        height,
    }
}

/// An otherwise-black image with exactly one white pixel, for probing
/// off-by-one boundary behavior.
pub fn single_pixel(width: u32, height: u32, x: u32, y: u32) -> Fixture {
    let mut data = vec![0u8; width as usize * height as usize];
    data[(y * width + x) as usize] = 255;
    Fixture {
        data,
        width,
        height,
    }
}

/// A deterministic field of random black/white pixels, for stress-testing
/// CCL's run-linking state machine against pathological alternating runs —
/// the worst case for the run array's sizing. `density` is the fraction of
/// pixels set white, and `seed` makes the field reproducible across runs.
pub fn noisy_binary_field(width: u32, height: u32, density: f64, seed: u64) -> Fixture {
    use rand::{Rng, SeedableRng};
    use rand::rngs::StdRng;

    let mut rng = StdRng::seed_from_u64(seed);
    let mut data = vec![0u8; width as usize * height as usize];
    for pixel in data.iter_mut() {
        if rng.random_bool(density) {
            *pixel = 255;
        }
    }
    Fixture {
        data,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn squares_stamp_is_clipped_to_bounds() {
        let fx = squares_on_background(4, 4, &[(2, 2, 4)]);
        // square would run off the right/bottom edge; only the in-bounds
        // corner should be white.
        assert_eq!(fx.data[(2 * 4 + 2) as usize], 255);
        assert_eq!(fx.data[(3 * 4 + 3) as usize], 255);
        assert_eq!(fx.data[0], 0);
    }

    #[test]
    fn checkerboard_alternates_by_cell() {
        let fx = checkerboard(4, 4, 2);
        assert_eq!(fx.data[0], 255); // cell (0,0)
        assert_eq!(fx.data[2], 0); // cell (1,0)
    }

    #[test]
    fn single_pixel_sets_exactly_one() {
        let fx = single_pixel(8, 8, 7, 7);
        assert_eq!(fx.data.iter().filter(|&&v| v == 255).count(), 1);
        assert_eq!(fx.data[(7 * 8 + 7) as usize], 255);
    }

    #[test]
    fn noisy_field_is_reproducible_for_a_given_seed() {
        let a = noisy_binary_field(32, 32, 0.5, 42);
        let b = noisy_binary_field(32, 32, 0.5, 42);
        assert_eq!(a.data, b.data);
        let c = noisy_binary_field(32, 32, 0.5, 43);
        assert_ne!(a.data, c.data);
    }
}
