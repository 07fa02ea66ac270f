//! Intra-tile suppression resolved as a bounded fixed-point iteration.
//!
//! Within a tile, mutually overlapping boxes are resolved in priority order
//! (a lower index is a higher priority) without an ordered scan: the tile's
//! self-IoU matrix is masked to strictly-upper-triangular entries at or
//! above the threshold, then rounds of masking zero the rows of boxes whose
//! suppression has been established, until the total overlap mass stops
//! decreasing. Each round a suppressed box loses its ability to suppress
//! others, which is how chains (A beats B, so B releases C) settle.

use crate::batch::{box_is_live, BOX_DIMS};
use crate::suppress::SuppressionScratch;
use crate::trace::trace_event;

/// Overlap mass above which a box counts as established-suppressed within a
/// round. Fixed by the algorithm; only the convergence epsilon is tunable.
const ESTABLISHED_MASS: f32 = 0.5;

/// Resolves suppression within one tile and zeroes the losers in place.
///
/// Returns the number of rounds the fixed point took.
pub(crate) fn self_tile_suppress(
    tile: &mut [f32],
    iou_threshold: f32,
    epsilon: f32,
    max_rounds: usize,
    scratch: &mut SuppressionScratch,
) -> usize {
    let t = tile.len() / BOX_DIMS;
    let iou = &mut scratch.iou;
    iou.fill_pairwise(tile, tile);

    // Keep only entries where a strictly higher-priority box overlaps at or
    // above the threshold: entry (i, j) survives iff i < j.
    for i in 0..t {
        let row = iou.row_slice_mut(i);
        for (j, value) in row.iter_mut().enumerate() {
            if j <= i || *value < iou_threshold {
                *value = 0.0;
            }
        }
    }

    let mut mass: f32 = iou.values().iter().sum();
    let mut changed = true;
    let mut round = 0;
    while changed && round < max_rounds {
        // col_max[j]: heaviest overlap currently claimed against box j.
        scratch.col_max.fill(0.0);
        for i in 0..t {
            let row = iou.row_slice(i);
            for (cm, &value) in scratch.col_max.iter_mut().zip(row) {
                *cm = cm.max(value);
            }
        }

        // masked_max[j]: heaviest claim against j from a box that is not
        // itself established-suppressed.
        scratch.masked_max.fill(0.0);
        for i in 0..t {
            if scratch.col_max[i] > ESTABLISHED_MASS {
                continue;
            }
            let row = iou.row_slice(i);
            for (mm, &value) in scratch.masked_max.iter_mut().zip(row) {
                *mm = mm.max(value);
            }
        }

        // Boxes suppressed this round stop suppressing: zero their rows.
        let mut new_mass = 0.0f32;
        for i in 0..t {
            let row = iou.row_slice_mut(i);
            if scratch.masked_max[i] > ESTABLISHED_MASS {
                row.fill(0.0);
            } else {
                new_mass += row.iter().sum::<f32>();
            }
        }

        changed = mass - new_mass > epsilon;
        mass = new_mass;
        round += 1;
    }

    // Any box with remaining incoming overlap lost to a surviving
    // higher-priority box.
    scratch.col_max.fill(0.0);
    for i in 0..t {
        let row = iou.row_slice(i);
        for (sum, &value) in scratch.col_max.iter_mut().zip(row) {
            *sum += value;
        }
    }
    for (j, &incoming) in scratch.col_max.iter().enumerate() {
        if incoming > 0.0 {
            tile[j * BOX_DIMS..(j + 1) * BOX_DIMS].fill(0.0);
        }
    }

    trace_event!(
        "self_suppression",
        rounds = round,
        survivors = tile.chunks_exact(BOX_DIMS).filter(|b| box_is_live(b)).count()
    );
    round
}
