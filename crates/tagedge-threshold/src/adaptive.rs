//! Adaptive, tile-based threshold.
//!
//! The image is partitioned into non-overlapping tiles. Each tile's
//! pixel-value min/max is blurred by taking the min (resp. max) over its
//! 3x3 tile neighborhood, with the tile grid's edge repeated past the
//! border. Each pixel is then classified against its own tile's blurred
//! min/max: ambiguous if the local contrast is too small to trust, white
//! if above the local midpoint, black otherwise.

use log::trace;
use tagedge_core::{GrayImage, ThresholdedImage, AMBIGUOUS, BLACK, WHITE};

use crate::config::ThresholdConfig;
use crate::error::ThresholdResult;

struct TileGrid {
    tiles_x: u32,
    tiles_y: u32,
    tile_size: u32,
    min: Vec<u8>,
    max: Vec<u8>,
}

impl TileGrid {
    #[inline]
    fn index(&self, tx: u32, ty: u32) -> usize {
        ty as usize * self.tiles_x as usize + tx as usize
    }

    fn compute(img: &GrayImage, tile_size: u32) -> Self {
        let tiles_x = img.width().div_ceil(tile_size);
        let tiles_y = img.height().div_ceil(tile_size);
        let mut grid = Self {
            tiles_x,
            tiles_y,
            tile_size,
            min: vec![255u8; tiles_x as usize * tiles_y as usize],
            max: vec![0u8; tiles_x as usize * tiles_y as usize],
        };

        for ty in 0..tiles_y {
            let y0 = ty * tile_size;
            let y1 = (y0 + tile_size).min(img.height());
            for tx in 0..tiles_x {
                let x0 = tx * tile_size;
                let x1 = (x0 + tile_size).min(img.width());
                let mut tile_min = 255u8;
                let mut tile_max = 0u8;
                for y in y0..y1 {
                    let row = img.row(y);
                    for &p in &row[x0 as usize..x1 as usize] {
                        tile_min = tile_min.min(p);
                        tile_max = tile_max.max(p);
                    }
                }
                let idx = grid.index(tx, ty);
                grid.min[idx] = tile_min;
                grid.max[idx] = tile_max;
            }
        }

        grid
    }

    #[inline]
    fn clamp_tile(&self, tx: i32, ty: i32) -> (u32, u32) {
        let cx = tx.clamp(0, self.tiles_x as i32 - 1) as u32;
        let cy = ty.clamp(0, self.tiles_y as i32 - 1) as u32;
        (cx, cy)
    }

    /// Min/max over the 3x3 tile neighborhood centered on `(tx, ty)`,
    /// repeating the edge tile past the grid border.
    fn blurred(&self, tx: u32, ty: u32) -> (u8, u8) {
        let mut lo = 255u8;
        let mut hi = 0u8;
        for dy in -1..=1i32 {
            for dx in -1..=1i32 {
                let (cx, cy) = self.clamp_tile(tx as i32 + dx, ty as i32 + dy);
                let idx = self.index(cx, cy);
                lo = lo.min(self.min[idx]);
                hi = hi.max(self.max[idx]);
            }
        }
        (lo, hi)
    }
}

/// Threshold `img` into a tri-valued `{black, ambiguous, white}` image.
///
/// `config.tile_size` must be at least 1; `img`'s dimensions need not be a
/// multiple of it (the last row/column of tiles is simply narrower).
pub fn threshold(img: &GrayImage, config: &ThresholdConfig) -> ThresholdResult<ThresholdedImage> {
    let tile_size = config.tile_size.max(1);
    let grid = TileGrid::compute(img, tile_size);
    let mut out = ThresholdedImage::new(img.width(), img.height())?;

    trace!(
        "adaptive threshold: {}x{} image, {}x{} tiles, tile_size={}, min_diff={}",
        img.width(),
        img.height(),
        grid.tiles_x,
        grid.tiles_y,
        tile_size,
        config.min_diff
    );

    for y in 0..img.height() {
        let ty = y / tile_size;
        let row = img.row(y);
        for x in 0..img.width() {
            let tx = x / tile_size;
            let (lo, hi) = grid.blurred(tx, ty);
            let value = if hi.saturating_sub(lo) < config.min_diff {
                AMBIGUOUS
            } else {
                let midpoint = lo as u32 + (hi as u32 - lo as u32) / 2;
                if row[x as usize] as u32 > midpoint {
                    WHITE
                } else {
                    BLACK
                }
            };
            out.set_pixel(x, y, value);
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_image_is_ambiguous_everywhere() {
        let data = vec![128u8; 16 * 16];
        let img = GrayImage::new(&data, 16, 16).unwrap();
        let out = threshold(&img, &ThresholdConfig::default()).unwrap();
        for y in 0..16 {
            for x in 0..16 {
                assert_eq!(out.get_pixel(x, y), Some(AMBIGUOUS));
            }
        }
    }

    #[test]
    fn sharp_vertical_edge_splits_black_and_white() {
        // left half near-black, right half near-white, contrast well above min_diff
        let width = 16u32;
        let height = 16u32;
        let mut data = vec![0u8; (width * height) as usize];
        for y in 0..height {
            for x in 0..width {
                data[(y * width + x) as usize] = if x < width / 2 { 10 } else { 240 };
            }
        }
        let img = GrayImage::new(&data, width, height).unwrap();
        let out = threshold(&img, &ThresholdConfig::default()).unwrap();
        // Away from the tile straddling the boundary, classification should
        // follow the source value's side of the midpoint.
        assert_eq!(out.get_pixel(0, 8), Some(BLACK));
        assert_eq!(out.get_pixel(width - 1, 8), Some(WHITE));
    }

    #[test]
    fn low_contrast_tile_is_ambiguous_even_with_real_values() {
        // Every tile neighborhood sees a contrast of 3, below the default min_diff of 5.
        let width = 8u32;
        let height = 8u32;
        let mut data = vec![100u8; (width * height) as usize];
        data[0] = 103; // one brighter pixel, contrast 3
        let img = GrayImage::new(&data, width, height).unwrap();
        let out = threshold(&img, &ThresholdConfig::default()).unwrap();
        for y in 0..height {
            for x in 0..width {
                assert_eq!(out.get_pixel(x, y), Some(AMBIGUOUS));
            }
        }
    }

    #[test]
    fn non_multiple_dimensions_leave_narrower_border_tiles() {
        let width = 10u32; // tile_size 4 -> tiles of width 4,4,2
        let height = 6u32;
        let data = vec![50u8; (width * height) as usize];
        let img = GrayImage::new(&data, width, height).unwrap();
        let out = threshold(&img, &ThresholdConfig::default()).unwrap();
        assert_eq!(out.width(), width);
        assert_eq!(out.height(), height);
    }

    #[test]
    fn edge_tiles_repeat_rather_than_wrap() {
        // A bright spot in the single corner tile should not influence the
        // opposite corner's blurred extrema once the image is large enough
        // that the neighborhoods don't overlap.
        let width = 16u32;
        let height = 16u32;
        let mut data = vec![100u8; (width * height) as usize];
        data[0] = 255; // top-left corner pixel
        let img = GrayImage::new(&data, width, height).unwrap();
        let out = threshold(&img, &ThresholdConfig::default()).unwrap();
        assert_eq!(out.get_pixel(width - 1, height - 1), Some(AMBIGUOUS));
    }
}
