//! Block-based Merged-Row-Scan (BMRS) connected-component labeling.
//!
//! Each polarity is labeled independently over its own packed binary plane
//! (a "compressed" plane built by mask equality against the thresholded
//! image), then both planes' labels are written into one combined label
//! image. Run discovery and linking is a single forward pass per plane;
//! the union-find never needs to revisit an earlier row.

use log::trace;
use tagedge_core::{DisjointSet, LabelImage, PackedBinaryImage};

use crate::error::RegionResult;
use crate::run::Run;

/// `u<<1` across a whole row, carrying the previous word's MSB into the
/// next word's LSB — the column-index direction runs low word to high
/// word, so this represents "shift every set column one position right".
fn shift_left_with_carry(words: &[u64], out: &mut [u64]) {
    let mut carry = 0u64;
    for (dst, &w) in out.iter_mut().zip(words) {
        *dst = (w << 1) | carry;
        carry = w >> 63;
    }
}

/// Build the merged-row plane: row `i` is the bitwise OR of source rows
/// `2i` and `2i+1`.
fn build_merged_plane(compressed: &PackedBinaryImage) -> RegionResult<PackedBinaryImage> {
    let merged_height = compressed.alloc_height() / 2;
    let stride = compressed.double_word_stride() as usize;
    let img = PackedBinaryImage::from_rows(compressed.width(), merged_height, |i, dst| {
        let top = compressed.row(2 * i);
        let bottom = compressed.row(2 * i + 1);
        for k in 0..stride {
            dst[k] = top[k] | bottom[k];
        }
    })?;
    Ok(img)
}

/// Build the flag plane: bit `j` of row `i` is set iff the foreground in
/// merged row `i` is 8-connected to the foreground in merged row `i+1` at
/// column `j`. Only defined when there are at least two merged rows.
fn build_flag_plane(
    compressed: &PackedBinaryImage,
    merged_height: u32,
) -> RegionResult<Option<PackedBinaryImage>> {
    if merged_height <= 1 {
        return Ok(None);
    }
    let stride = compressed.double_word_stride() as usize;
    let img = PackedBinaryImage::from_rows(compressed.width(), merged_height - 1, |i, dst| {
        let upper = compressed.row(2 * i + 1);
        let lower = compressed.row(2 * i + 2);
        let mut upper_shifted = vec![0u64; stride];
        let mut lower_shifted = vec![0u64; stride];
        shift_left_with_carry(upper, &mut upper_shifted);
        shift_left_with_carry(lower, &mut lower_shifted);
        for k in 0..stride {
            dst[k] = (upper[k] | upper_shifted[k]) & (lower[k] | lower_shifted[k]);
        }
    })?;
    Ok(Some(img))
}

/// Scan one packed row for maximal runs of set bits, using a
/// count-trailing-zeros primitive to locate each run's start and end
/// word by word.
fn scan_runs(row: &[u64], double_word_width: u32) -> Vec<(u16, u16)> {
    let mut runs = Vec::new();
    let total_bits = double_word_width * 64;
    let mut pos = 0u32;
    while pos < total_bits {
        let word_idx = (pos / 64) as usize;
        let bit_idx = pos % 64;
        let word = row[word_idx] >> bit_idx;
        if word == 0 {
            pos = (word_idx as u32 + 1) * 64;
            continue;
        }
        let start = pos + word.trailing_zeros();
        let mut end = start;
        loop {
            let w_idx = (end / 64) as usize;
            if w_idx >= double_word_width as usize {
                break;
            }
            let b_idx = end % 64;
            let w = row[w_idx] >> b_idx;
            let ones = (!w).trailing_zeros().min(64 - b_idx);
            end += ones;
            if ones < 64 - b_idx {
                break;
            }
        }
        runs.push((start as u16, end as u16));
        pos = end;
    }
    runs
}

/// Whether any flag bit is set in the half-open column range `[start, end)`.
fn is_connected(flag_row: &[u64], start: u32, end: u32) -> bool {
    if start >= end {
        return false;
    }
    let first_word = (start / 64) as usize;
    let last_word = ((end - 1) / 64) as usize;
    let lo = start % 64;
    if first_word == last_word {
        let hi = (end - 1) % 64 + 1;
        let mask = if hi == 64 {
            !0u64 << lo
        } else {
            (!0u64 << lo) & !(!0u64 << hi)
        };
        return flag_row[first_word] & mask != 0;
    }
    if flag_row[first_word] & (!0u64 << lo) != 0 {
        return true;
    }
    if flag_row[first_word + 1..last_word].iter().any(|&w| w != 0) {
        return true;
    }
    let hi = (end - 1) % 64 + 1;
    let mask_last = if hi == 64 { !0u64 } else { !(!0u64 << hi) };
    flag_row[last_word] & mask_last != 0
}

/// Link a freshly scanned row's runs against the previous row's runs,
/// assigning each new run a label (merging equivalences along the way).
///
/// This is the explicit state machine the original's goto-based cursor
/// walk collapses into: `advance_upper` skips prior runs that end before
/// the new run starts, `emit_run` resolves (or creates) the new run's
/// label, and the caller's loop over new runs is the `end_of_row`
/// transition back to `advance_upper` for the next run.
fn link_row(
    current: Vec<(u16, u16)>,
    prior: &[Run],
    flag_row: Option<&[u64]>,
    ds: &mut DisjointSet,
) -> Vec<Run> {
    let mut upper_idx = 0usize;
    let mut out = Vec::with_capacity(current.len());

    for (start_pos, end_pos) in current {
        // advance_upper: skip prior runs that end strictly before this run starts
        while upper_idx < prior.len() && prior[upper_idx].end_pos < start_pos {
            upper_idx += 1;
        }

        let label = if upper_idx >= prior.len() || prior[upper_idx].start_pos > end_pos {
            // no prior run can possibly overlap
            ds.new_label()
        } else {
            let flag_row = flag_row.expect("prior runs imply a flag row exists");
            let mut found = 0u32;
            let mut j = upper_idx;
            while j < prior.len() && prior[j].start_pos <= end_pos {
                let candidate = prior[j];
                let overlap_start = start_pos.max(candidate.start_pos) as u32;
                let overlap_end = end_pos.min(candidate.end_pos) as u32;
                // overlap_end is the inclusive column both runs share;
                // is_connected takes a half-open range, so widen by one.
                if is_connected(flag_row, overlap_start, overlap_end + 1) {
                    let contributed = ds.get_label(candidate.label);
                    found = if found == 0 {
                        contributed
                    } else if found != contributed {
                        ds.merge(found, contributed)
                    } else {
                        found
                    };
                }
                if candidate.end_pos >= end_pos {
                    break;
                }
                j += 1;
            }
            upper_idx = j;
            if found == 0 {
                ds.new_label()
            } else {
                found
            }
        };

        out.push(Run {
            start_pos,
            end_pos,
            label,
        });
    }

    out
}

/// Run discovery and linking over an entire merged plane.
fn find_runs(
    merged: &PackedBinaryImage,
    flags: Option<&PackedBinaryImage>,
    ds: &mut DisjointSet,
) -> Vec<Vec<Run>> {
    let merged_height = merged.height();
    let double_word_width = merged.double_word_width();
    let mut rows = Vec::with_capacity(merged_height as usize);

    let first = scan_runs(merged.row(0), double_word_width)
        .into_iter()
        .map(|(start_pos, end_pos)| Run {
            start_pos,
            end_pos,
            label: ds.new_label(),
        })
        .collect::<Vec<_>>();
    rows.push(first);

    for i in 1..merged_height {
        let current = scan_runs(merged.row(i), double_word_width);
        let flag_row = flags.map(|f| f.row(i - 1));
        let linked = link_row(current, &rows[i as usize - 1], flag_row, ds);
        rows.push(linked);
    }

    rows
}

/// Write each row's runs into the output label image, resolving each run's
/// pre-flatten label to its final dense id and incrementing population
/// counts lazily as pixels are visited.
fn write_labels(
    labels: &mut LabelImage,
    compressed: &PackedBinaryImage,
    runs_by_row: &[Vec<Run>],
    ds: &mut DisjointSet,
) {
    for (i, runs) in runs_by_row.iter().enumerate() {
        let i = i as u32;
        let upper_bits = compressed.row(2 * i);
        let lower_bits = compressed.row(2 * i + 1);
        let upper_y = 2 * i;
        let lower_y = 2 * i + 1;
        let in_bounds_lower = lower_y < labels.height();

        for run in runs {
            let final_label = ds.get_label(run.label);
            for j in run.start_pos..run.end_pos {
                let word = (j / 64) as usize;
                let bit = 1u64 << (j % 64);
                if upper_bits[word] & bit != 0 {
                    labels.set(j as u32, upper_y, final_label);
                    ds.increment_count(final_label);
                }
                if in_bounds_lower && lower_bits[word] & bit != 0 {
                    labels.set(j as u32, lower_y, final_label);
                    ds.increment_count(final_label);
                }
            }
        }
    }
}

/// Worst-case number of distinct labels a `width`x`height` plane can
/// produce under 8-connectivity (every other pixel its own component).
/// Sized for two polarities sharing one solver, matching
/// [`label_dual`]'s capacity requirement.
pub fn solver_capacity(width: u32, height: u32) -> usize {
    let (w, h) = (width as usize, height as usize);
    (((h + 1) / 2) * ((w + 1) / 2) + 1) * 2
}

/// Discover and link every run of one polarity plane, issuing labels from
/// `ds` as it goes. The returned runs carry *pre-flatten* label ids —
/// `ds` must be flattened before these runs are handed to
/// [`write_labels`], since [`DisjointSet::get_label`] before flatten only
/// returns a raw parent pointer, which is not guaranteed equal across two
/// different run-label ids in the same equivalence class until the
/// union-find has been fully resolved.
fn discover_runs(plane: &PackedBinaryImage, ds: &mut DisjointSet) -> RegionResult<Vec<Vec<Run>>> {
    let merged_height = plane.alloc_height() / 2;
    let merged = build_merged_plane(plane)?;
    let flags = build_flag_plane(plane, merged_height)?;
    let runs = find_runs(&merged, flags.as_ref(), ds);
    trace!(
        "bmrs: {}x{} plane, {} merged rows, {} labels issued so far",
        plane.width(),
        plane.height(),
        merged_height,
        ds.len()
    );
    Ok(runs)
}

/// Label a single polarity plane, returning the label image and the
/// distinct label count (including background).
pub fn label_single(plane: &PackedBinaryImage, ds: &mut DisjointSet) -> RegionResult<(LabelImage, u32)> {
    ds.reset();
    ds.new_label(); // background
    let runs = discover_runs(plane, ds)?;
    let n_labels = ds.flatten();
    let mut labels = LabelImage::new(plane.width(), plane.height())?;
    write_labels(&mut labels, plane, &runs, ds);
    Ok((labels, n_labels))
}

/// Label both polarities of a thresholded image into one combined label
/// image. White (foreground) and black (background) components are
/// labeled independently, each with their own plane, but share one
/// [`DisjointSet`]: `ds` issues label `0` to the background slot once,
/// and run discovery on each plane only ever hands out fresh ids above
/// whatever the solver currently holds, so the two polarities' label
/// ranges can never collide — white and black pixels are mutually
/// exclusive by construction, so no pixel could ever receive a
/// colliding id from the other plane's range.
///
/// Returns the total distinct label count after flattening (including
/// background).
pub fn label_dual(
    white: &PackedBinaryImage,
    black: &PackedBinaryImage,
    ds: &mut DisjointSet,
) -> RegionResult<(LabelImage, u32)> {
    debug_assert_eq!(white.width(), black.width());
    debug_assert_eq!(white.height(), black.height());

    ds.reset();
    ds.new_label(); // background

    let white_runs = discover_runs(white, ds)?;
    let black_runs = discover_runs(black, ds)?;
    let n_labels = ds.flatten();

    let mut labels = LabelImage::new(white.width(), white.height())?;
    write_labels(&mut labels, white, &white_runs, ds);
    write_labels(&mut labels, black, &black_runs, ds);
    Ok((labels, n_labels))
}

/// Zero out every pixel whose label's population count is below
/// `min_count`. `ds` must already have been flattened so its counts are
/// indexed by final label id.
pub fn prune_small_labels(labels: &mut LabelImage, ds: &DisjointSet, min_count: u32) {
    for y in 0..labels.height() {
        for x in 0..labels.width() {
            let label = labels.get(x, y);
            if label != 0 && ds.count(label) < min_count {
                labels.set(x, y, 0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_plane(rows: &[&str]) -> PackedBinaryImage {
        let height = rows.len() as u32;
        let width = rows[0].len() as u32;
        let mut data = Vec::with_capacity((width * height) as usize);
        for row in rows {
            for c in row.chars() {
                data.push(if c == '1' { 255 } else { 0 });
            }
        }
        PackedBinaryImage::from_nonzero(&data, width, height).unwrap()
    }

    #[test]
    fn single_run_first_row_gets_one_label() {
        let plane = make_plane(&["0110", "0110"]);
        let mut ds = DisjointSet::with_capacity(16);
        let (labels, n) = label_single(&plane, &mut ds).unwrap();
        assert_eq!(n, 2);
        assert_eq!(labels.get(1, 0), labels.get(2, 1));
        assert!(labels.get(1, 0) != 0);
    }

    #[test]
    fn two_disjoint_runs_get_two_labels() {
        let plane = make_plane(&["1000000001", "1000000001"]);
        let mut ds = DisjointSet::with_capacity(16);
        let (labels, n) = label_single(&plane, &mut ds).unwrap();
        assert_eq!(n, 3);
        assert_ne!(labels.get(0, 0), labels.get(9, 0));
    }

    #[test]
    fn eight_connected_diagonal_runs_merge() {
        // row0: bit at column 1; row1: bit at column 2 -- diagonally touching, 8-connected
        let plane = make_plane(&["0100", "0010"]);
        let mut ds = DisjointSet::with_capacity(16);
        let (labels, n) = label_single(&plane, &mut ds).unwrap();
        assert_eq!(n, 2); // background + one merged component
        assert_eq!(labels.get(1, 0), labels.get(2, 1));
    }

    #[test]
    fn odd_height_last_row_links_correctly() {
        let plane = make_plane(&["010", "010", "010"]);
        let mut ds = DisjointSet::with_capacity(16);
        let (labels, _n) = label_single(&plane, &mut ds).unwrap();
        let l = labels.get(1, 0);
        assert_eq!(labels.get(1, 1), l);
        assert_eq!(labels.get(1, 2), l);
    }

    #[test]
    fn prune_removes_small_components() {
        let plane = make_plane(&["100000001", "100000001"]);
        let mut ds = DisjointSet::with_capacity(16);
        let (mut labels, _n) = label_single(&plane, &mut ds).unwrap();
        prune_small_labels(&mut labels, &ds, 3);
        for y in 0..2 {
            for x in 0..9 {
                assert_eq!(labels.get(x, y), 0);
            }
        }
    }

    #[test]
    fn dual_polarity_labels_never_collide() {
        // white squares at corners, black fills the rest
        let width = 10u32;
        let height = 10u32;
        let mut gray = vec![0u8; (width * height) as usize];
        for y in 0..3u32 {
            for x in 0..3u32 {
                gray[(y * width + x) as usize] = 255;
            }
        }
        for y in 6..9u32 {
            for x in 6..9u32 {
                gray[(y * width + x) as usize] = 255;
            }
        }
        let white = PackedBinaryImage::from_eq(&gray, width, height, 255).unwrap();
        let black = PackedBinaryImage::from_eq(&gray, width, height, 0).unwrap();
        let mut ds = DisjointSet::with_capacity(solver_capacity(width, height));
        let (labels, n) = label_dual(&white, &black, &mut ds).unwrap();
        // two white squares + one connected black background + the label-0 slot
        assert_eq!(n, 4);
        let white_label_a = labels.get(1, 1);
        let white_label_b = labels.get(7, 7);
        let black_label = labels.get(5, 0);
        assert!(white_label_a != 0 && white_label_b != 0 && black_label != 0);
        assert_ne!(white_label_a, white_label_b);
        assert_ne!(white_label_a, black_label);
        assert_ne!(white_label_b, black_label);
    }

    /// A single 3x3 foreground square on a 5x5 background should produce
    /// exactly two labels (background + the square) and pass every CCL
    /// invariant.
    #[test]
    fn single_square_scenario_satisfies_ccl_invariants() {
        use tagedge_core::ThresholdedImage;
        use tagedge_test::squares_on_background;

        let fixture = squares_on_background(5, 5, &[(1, 1, 3)]);
        let mut thresholded = ThresholdedImage::new(fixture.width, fixture.height).unwrap();
        for y in 0..fixture.height {
            for x in 0..fixture.width {
                thresholded.set_pixel(x, y, fixture.data[(y * fixture.width + x) as usize]);
            }
        }
        let white = PackedBinaryImage::from_eq(
            thresholded.as_bytes(),
            fixture.width,
            fixture.height,
            255,
        )
        .unwrap();
        let black =
            PackedBinaryImage::from_eq(thresholded.as_bytes(), fixture.width, fixture.height, 0)
                .unwrap();
        let mut ds = DisjointSet::with_capacity(solver_capacity(fixture.width, fixture.height));
        let (labels, n) = label_dual(&white, &black, &mut ds).unwrap();
        assert_eq!(n, 3); // label-0 slot + one foreground + one background
        tagedge_test::assert_ccl_invariants(&labels, &thresholded, &ds);
    }

    /// Two runs in adjacent merged rows that only touch diagonally, at
    /// the single column where the flag plane's boundary-row
    /// intersection sets a bit, must still end up in the same label.
    #[test]
    fn diagonal_connectivity_across_merged_row_boundary_merges() {
        use tagedge_core::{BLACK, ThresholdedImage, WHITE};

        // Merged row 0 (source rows 0-1) carries the run [0,3); merged
        // row 1 (source rows 2-3) carries [3,6). The runs share no
        // column, so they only connect through the single diagonal bit
        // at column 3.
        let rows = ["000000", "111000", "000111", "000000"];
        let plane = make_plane(&rows);
        let mut ds = DisjointSet::with_capacity(32);
        let (labels, _n) = label_single(&plane, &mut ds).unwrap();

        assert_eq!(labels.get(2, 1), labels.get(3, 2));

        let mut thresholded = ThresholdedImage::new(6, 4).unwrap();
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                thresholded.set_pixel(x as u32, y as u32, if c == '1' { WHITE } else { BLACK });
            }
        }
        tagedge_test::assert_ccl_invariants(&labels, &thresholded, &ds);
    }
}
