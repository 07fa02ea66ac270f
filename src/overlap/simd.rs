//! SIMD-accelerated overlap fill using the `wide` crate.
//!
//! The column loop is vectorized to score one left-hand box against 8
//! right-hand boxes at a time with `f32x8`; the right-hand slice is first
//! transposed into per-coordinate lanes. A scalar tail covers column counts
//! that are not a multiple of the lane width.

use crate::batch::BOX_DIMS;
use crate::overlap::pair_iou;
use wide::f32x8;
use wide::CmpGt;

const LANES: usize = 8;

/// Load 8 f32 values into f32x8.
#[inline]
fn load_f32x8(slice: &[f32]) -> f32x8 {
    f32x8::from([
        slice[0], slice[1], slice[2], slice[3], slice[4], slice[5], slice[6], slice[7],
    ])
}

pub(crate) fn fill_rows(a: &[f32], b: &[f32], out: &mut [f32], cols: usize) {
    // TODO: hoist the transposed lanes into the suppression scratch so the
    // self-IoU fill of each tile does not re-transpose its own boxes.
    let mut bx0 = vec![0.0f32; cols];
    let mut by0 = vec![0.0f32; cols];
    let mut bx1 = vec![0.0f32; cols];
    let mut by1 = vec![0.0f32; cols];
    let mut b_area = vec![0.0f32; cols];
    for (j, bbox) in b.chunks_exact(BOX_DIMS).enumerate() {
        bx0[j] = bbox[0];
        by0[j] = bbox[1];
        bx1[j] = bbox[2];
        by1[j] = bbox[3];
        b_area[j] = (bbox[2] - bbox[0]) * (bbox[3] - bbox[1]);
    }

    let simd_end = cols / LANES * LANES;
    let zero = f32x8::ZERO;
    for (i, abox) in a.chunks_exact(BOX_DIMS).enumerate() {
        let row = &mut out[i * cols..(i + 1) * cols];
        let ax0 = f32x8::splat(abox[0]);
        let ay0 = f32x8::splat(abox[1]);
        let ax1 = f32x8::splat(abox[2]);
        let ay1 = f32x8::splat(abox[3]);
        let a_area = f32x8::splat((abox[2] - abox[0]) * (abox[3] - abox[1]));

        let mut j = 0;
        while j < simd_end {
            let ix0 = ax0.max(load_f32x8(&bx0[j..]));
            let iy0 = ay0.max(load_f32x8(&by0[j..]));
            let ix1 = ax1.min(load_f32x8(&bx1[j..]));
            let iy1 = ay1.min(load_f32x8(&by1[j..]));

            let iw = (ix1 - ix0).max(zero);
            let ih = (iy1 - iy0).max(zero);
            let inter = iw * ih;
            let union = a_area + load_f32x8(&b_area[j..]) - inter;

            // Lanes with a non-positive union are padding pairs; blend them
            // to zero instead of dividing.
            let iou = union.cmp_gt(zero).blend(inter / union, zero);
            row[j..j + LANES].copy_from_slice(&iou.to_array());
            j += LANES;
        }

        while j < cols {
            row[j] = pair_iou(abox, &b[j * BOX_DIMS..(j + 1) * BOX_DIMS]);
            j += 1;
        }
    }
}
