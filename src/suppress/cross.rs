//! Cross-tile suppression against earlier, already-committed tiles.

use crate::batch::BOX_DIMS;
use crate::suppress::SuppressionScratch;

/// Zeroes every box in `tile` that overlaps a box from an earlier tile at or
/// above the threshold.
///
/// `earlier` is the element's row prefix covering all tiles before the
/// current one; the inner loop over it is bounded by the current tile index.
/// Earlier tiles have already been suppressed, so their zeroed boxes carry
/// zero overlap and never suppress anything here.
pub(crate) fn cross_tile_suppress(
    earlier: &[f32],
    tile: &mut [f32],
    iou_threshold: f32,
    scratch: &mut SuppressionScratch,
) {
    let t = tile.len() / BOX_DIMS;
    for earlier_tile in earlier.chunks_exact(tile.len()) {
        scratch.iou.fill_pairwise(earlier_tile, tile);

        for keep in scratch.keep.iter_mut() {
            *keep = true;
        }
        for i in 0..t {
            let row = scratch.iou.row_slice(i);
            for (keep, &value) in scratch.keep.iter_mut().zip(row) {
                if value >= iou_threshold {
                    *keep = false;
                }
            }
        }

        for (j, &keep) in scratch.keep.iter().enumerate() {
            if !keep {
                tile[j * BOX_DIMS..(j + 1) * BOX_DIMS].fill(0.0);
            }
        }
    }
}
