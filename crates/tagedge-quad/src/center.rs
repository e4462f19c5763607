//! Bounding box and dithered center computation.

use tagedge_cluster::point::decode;
use tagedge_core::BoundingBox;

/// Fixed irrational perturbation added to the bounding-box midpoint, in
/// doubled-coordinate (`2x`, `2y`) space.
///
/// Breaks ties in the angular sort and guarantees the sort surrogate's
/// denominators are never exactly zero, since a point's doubled
/// coordinates are always integers and the center never is.
pub const DITHER_X: f32 = 0.05118;
pub const DITHER_Y: f32 = -0.028581;

/// A bucket's center, in the same doubled-coordinate space as the
/// gradient points it was computed from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Center {
    pub cx: f32,
    pub cy: f32,
}

/// Reduce a bucket's points to their axis-aligned bounding box over the
/// encoded `(2x+dx, 2y+dy)` fields.
///
/// # Panics
///
/// Panics if `points` is empty.
pub fn bounding_box(points: &[u32]) -> BoundingBox {
    let (x0, y0, _, _, _) = decode(points[0]);
    let mut bb = BoundingBox::from_point(x0 as i32, y0 as i32);
    for &p in &points[1..] {
        let (x, y, _, _, _) = decode(p);
        bb.extend(x as i32, y as i32);
    }
    bb
}

/// The dithered center of a bounding box — its midpoint plus the fixed
/// perturbation in [`DITHER_X`]/[`DITHER_Y`].
pub fn dithered_center(bbox: &BoundingBox) -> Center {
    let (mx, my) = bbox.center();
    Center {
        cx: mx + DITHER_X,
        cy: my + DITHER_Y,
    }
}
