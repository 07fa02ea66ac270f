//! Scalar reference implementation of the pairwise overlap fill.

use crate::batch::BOX_DIMS;
use crate::overlap::pair_iou;

// With the `simd` feature the dispatch bypasses this fill; it stays as the
// reference the equivalence test compares against.
#[cfg_attr(feature = "simd", allow(dead_code))]
pub(crate) fn fill_rows(a: &[f32], b: &[f32], out: &mut [f32], cols: usize) {
    for (i, abox) in a.chunks_exact(BOX_DIMS).enumerate() {
        let row = &mut out[i * cols..(i + 1) * cols];
        for (entry, bbox) in row.iter_mut().zip(b.chunks_exact(BOX_DIMS)) {
            *entry = pair_iou(abox, bbox);
        }
    }
}
