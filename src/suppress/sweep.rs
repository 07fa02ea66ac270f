//! Sequential tile sweep over a padded batch.
//!
//! Tiles are processed strictly left to right; tile `idx + 1` only starts
//! after tile `idx` has been committed, because its cross pass reads every
//! earlier tile. Batch elements are independent, so a tile step may fan out
//! across the batch when the `rayon` feature and the `parallel` switch are
//! both on; results are identical to the sequential path.

use crate::batch::{box_is_live, PaddedBatch, BOX_DIMS};
use crate::suppress::cross::cross_tile_suppress;
use crate::suppress::selftile::self_tile_suppress;
use crate::suppress::{NmsConfig, SuppressionScratch};
use crate::trace::{trace_event, trace_span};
#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Per-tile parameters shared by every batch element.
#[derive(Clone, Copy)]
struct SweepParams {
    tile_len: usize,
    iou_threshold: f32,
    epsilon: f32,
    max_rounds: usize,
}

/// Runs the suppression sweep in place and returns the per-element count of
/// surviving boxes over the tiles that were processed.
///
/// The exit is evaluated jointly over the batch before each tile: the sweep
/// continues while any element is still below `max_output_size` and tiles
/// remain, so some elements may accumulate more output than requested; the
/// driver truncates at selection time.
pub(crate) fn sweep_tiles(
    padded: &mut PaddedBatch,
    iou_threshold: f32,
    max_output_size: usize,
    config: &NmsConfig,
) -> Vec<usize> {
    let batch = padded.batch();
    let num_tiles = padded.num_tiles();
    let mut output_size = vec![0usize; batch];
    if batch == 0 || num_tiles == 0 {
        return output_size;
    }

    let _span = trace_span!("tile_sweep", batch = batch, tiles = num_tiles).entered();

    let tile_size = padded.tile_size();
    let params = SweepParams {
        tile_len: tile_size * BOX_DIMS,
        iou_threshold,
        epsilon: config.convergence_epsilon,
        max_rounds: tile_size,
    };
    let row_len = padded.row_len();
    let mut scratches: Vec<SuppressionScratch> = (0..batch)
        .map(|_| SuppressionScratch::new(tile_size))
        .collect();

    let mut processed = 0usize;
    for idx in 0..num_tiles {
        if output_size.iter().all(|&size| size >= max_output_size) {
            break;
        }

        #[cfg(feature = "rayon")]
        if config.parallel {
            step_parallel(
                padded.boxes_mut(),
                row_len,
                idx,
                params,
                &mut scratches,
                &mut output_size,
            );
        } else {
            step_sequential(
                padded.boxes_mut(),
                row_len,
                idx,
                params,
                &mut scratches,
                &mut output_size,
            );
        }
        #[cfg(not(feature = "rayon"))]
        step_sequential(
            padded.boxes_mut(),
            row_len,
            idx,
            params,
            &mut scratches,
            &mut output_size,
        );

        processed += 1;
    }

    trace_event!("tile_sweep_done", tiles = processed);
    output_size
}

fn step_sequential(
    boxes: &mut [f32],
    row_len: usize,
    idx: usize,
    params: SweepParams,
    scratches: &mut [SuppressionScratch],
    output_size: &mut [usize],
) {
    for ((row, scratch), size) in boxes
        .chunks_exact_mut(row_len)
        .zip(scratches.iter_mut())
        .zip(output_size.iter_mut())
    {
        *size += process_tile(row, idx, params, scratch);
    }
}

#[cfg(feature = "rayon")]
fn step_parallel(
    boxes: &mut [f32],
    row_len: usize,
    idx: usize,
    params: SweepParams,
    scratches: &mut [SuppressionScratch],
    output_size: &mut [usize],
) {
    boxes
        .par_chunks_exact_mut(row_len)
        .zip(scratches.par_iter_mut())
        .zip(output_size.par_iter_mut())
        .for_each(|((row, scratch), size)| {
            *size += process_tile(row, idx, params, scratch);
        });
}

/// Suppresses one element's tile `idx` and returns its survivor count.
fn process_tile(
    row: &mut [f32],
    idx: usize,
    params: SweepParams,
    scratch: &mut SuppressionScratch,
) -> usize {
    let (earlier, rest) = row.split_at_mut(idx * params.tile_len);
    let tile = &mut rest[..params.tile_len];
    cross_tile_suppress(earlier, tile, params.iou_threshold, scratch);
    self_tile_suppress(
        tile,
        params.iou_threshold,
        params.epsilon,
        params.max_rounds,
        scratch,
    );
    tile.chunks_exact(BOX_DIMS).filter(|b| box_is_live(b)).count()
}
