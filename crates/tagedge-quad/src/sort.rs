//! Angular sort around a cluster's dithered center, using a monotone
//! integer surrogate in place of `atan2`.
//!
//! Each point's `(dx, dy) = (2x - cx, 2y - cy)` is classified into one of
//! four quadrants by sign, then mapped to a value in `[0, 1)` that is
//! strictly monotone in angle within that quadrant. Quadrant index and
//! surrogate combine into one 32-bit key; sorting by that key ascending
//! orders points by angle around the center with one wraparound point
//! (the key is not continuous across the literal 0 angle, only within
//! each quadrant and across quadrant boundaries it meets).

use tagedge_cluster::point::decode;

use crate::center::Center;

const SURROGATE_BITS: u32 = 30;
const SURROGATE_SCALE: f32 = (1u32 << SURROGATE_BITS) as f32;
const SURROGATE_MASK: u32 = (1 << SURROGATE_BITS) - 1;

/// Quadrant index (`0..4`) and monotone-in-angle surrogate (`[0, 1)`) for
/// one offset from the center.
///
/// Quadrants are assigned by `(dx, dy)` sign so that the combined key
/// increases continuously as the true angle sweeps a full turn:
/// `dx>=0,dy>=0` -> 0, `dx<0,dy>=0` -> 1, `dx<0,dy<0` -> 2, `dx>=0,dy<0` ->
/// 3. Within each quadrant the surrogate is a ratio of the two offsets
/// chosen so it is `0` entering the quadrant and approaches `1` leaving
/// it, matching up with the next quadrant's `0`.
fn quadrant_and_surrogate(dx: f32, dy: f32) -> (u32, f32) {
    let (quadrant, t) = if dx >= 0.0 && dy >= 0.0 {
        (0, dy / (dx + dy))
    } else if dx < 0.0 && dy >= 0.0 {
        (1, -dx / (-dx + dy))
    } else if dx < 0.0 && dy < 0.0 {
        (2, -dy / (-dx - dy))
    } else {
        (3, dx / (dx - dy))
    };
    (quadrant, t)
}

/// Pack a point's position relative to `center` into a 32-bit sort key:
/// the top two bits are the quadrant, the bottom 30 bits a fixed-point
/// surrogate.
fn sort_key(point: u32, center: &Center) -> u32 {
    let (x, y, _, _, _) = decode(point);
    let dx = x as f32 - center.cx;
    let dy = y as f32 - center.cy;
    let (quadrant, t) = quadrant_and_surrogate(dx, dy);
    let scaled = (t.clamp(0.0, 1.0) * SURROGATE_SCALE) as u32 & SURROGATE_MASK;
    (quadrant << SURROGATE_BITS) | scaled
}

/// Sort `points` ascending by angle around `center`, using the surrogate
/// key. Not a stable ordering with respect to points that share a key —
/// only the key's value is guaranteed monotone in angle.
pub fn sort_by_angle(points: &mut [u32], center: &Center) {
    points.sort_by_key(|&p| sort_key(p, center));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quadrant_boundaries_are_monotone() {
        // Walk a dense ring of angles and check the key is non-decreasing
        // modulo one wraparound at the end.
        let n = 360;
        let mut keys = Vec::with_capacity(n);
        for i in 0..n {
            let theta = (i as f32) * std::f32::consts::TAU / n as f32;
            let dx = theta.cos();
            let dy = theta.sin();
            let (q, t) = quadrant_and_surrogate(dx, dy);
            let scaled = (t.clamp(0.0, 1.0) * SURROGATE_SCALE) as u32 & SURROGATE_MASK;
            keys.push((q << SURROGATE_BITS) | scaled);
        }
        let mut wraps = 0;
        for w in keys.windows(2) {
            if w[1] < w[0] {
                wraps += 1;
            }
        }
        assert_eq!(wraps, 1, "angle sweep should wrap exactly once");
    }

    #[test]
    fn sort_orders_points_around_a_square() {
        use tagedge_cluster::point::encode;
        // Four corners of a 20x20 square, doubled-coordinate center at
        // (20, 20) so the dither keeps denominators off zero.
        let corners = [(5, 5), (15, 5), (15, 15), (5, 15)];
        let mut points: Vec<u32> = corners
            .iter()
            .map(|&(x, y)| encode(x, y, 0, 0, true))
            .collect();
        let center = Center {
            cx: 20.05118,
            cy: 19.971419,
        };
        sort_by_angle(&mut points, &center);
        assert_eq!(points.len(), 4);
        // A full walk around the square should visit each quadrant's key
        // region in increasing order (possibly starting mid-quadrant).
        let keys: Vec<u32> = points.iter().map(|&p| sort_key(p, &center)).collect();
        let sorted = {
            let mut k = keys.clone();
            k.sort();
            k
        };
        assert_eq!(keys, sorted);
    }
}
