//! Suppression passes and the padded NMS driver.
//!
//! The driver pads the input up to a tile multiple, sweeps the tiles (cross
//! pass against earlier tiles, then the intra-tile fixed point), and derives
//! the final per-element selection. Every loop bound is static for a fixed
//! tile size and input shape, which is what makes the total work predictable
//! compared to a data-dependent greedy scan.

use crate::batch::{BoxesView, PaddedBatch, ScoresView};
use crate::overlap::IouMatrix;
use crate::select::{rank_live, Selection};
use crate::trace::{trace_event, trace_span};
use crate::util::{TileNmsError, TileNmsResult};

pub(crate) mod cross;
pub(crate) mod selftile;
pub(crate) mod sweep;

/// Tile size used by [`NmsConfig::default`].
pub const DEFAULT_TILE_SIZE: usize = 512;

/// Configuration for the padded suppression driver.
#[derive(Clone, Copy, Debug)]
pub struct NmsConfig {
    /// Number of boxes per tile; the box count is padded up to a multiple.
    pub tile_size: usize,
    /// Minimum decrease in total overlap mass for the intra-tile fixed
    /// point to keep iterating. A tolerance, not an exact-equality test.
    pub convergence_epsilon: f32,
    /// Process batch elements of a tile step in parallel (requires the
    /// `rayon` feature; ignored without it).
    pub parallel: bool,
}

impl Default for NmsConfig {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            convergence_epsilon: 0.5,
            parallel: false,
        }
    }
}

/// Reusable per-element scratch for the suppression passes.
pub(crate) struct SuppressionScratch {
    pub(crate) iou: IouMatrix,
    pub(crate) keep: Vec<bool>,
    pub(crate) col_max: Vec<f32>,
    pub(crate) masked_max: Vec<f32>,
}

impl SuppressionScratch {
    pub(crate) fn new(tile_size: usize) -> Self {
        Self {
            iou: IouMatrix::new(tile_size, tile_size),
            keep: vec![true; tile_size],
            col_max: vec![0.0; tile_size],
            masked_max: vec![0.0; tile_size],
        }
    }
}

/// Batched padded non-maximum suppression with the default configuration.
///
/// Boxes must arrive ranked by descending score; entry order is the
/// suppression priority and is never re-sorted. Returns the per-element
/// selected indices and valid counts.
pub fn non_max_suppression_padded(
    scores: ScoresView<'_>,
    boxes: BoxesView<'_>,
    max_output_size: usize,
    iou_threshold: f32,
) -> TileNmsResult<Selection> {
    non_max_suppression_padded_with(
        &NmsConfig::default(),
        scores,
        boxes,
        max_output_size,
        iou_threshold,
    )
}

/// Batched padded non-maximum suppression with an explicit configuration.
///
/// Validation happens before any padding: the threshold must be finite, the
/// tile size nonzero, and the two views must agree on batch size and box
/// count. Threshold degeneracy is policy, not an error: a threshold `<= 0`
/// suppresses everything that overlaps at all, and `>= 1` suppresses only
/// exact duplicates. A `max_output_size` of zero selects nothing.
pub fn non_max_suppression_padded_with(
    config: &NmsConfig,
    scores: ScoresView<'_>,
    boxes: BoxesView<'_>,
    max_output_size: usize,
    iou_threshold: f32,
) -> TileNmsResult<Selection> {
    if !iou_threshold.is_finite() {
        return Err(TileNmsError::NonFiniteThreshold {
            threshold: iou_threshold,
        });
    }

    let _span = trace_span!(
        "nms_padded",
        batch = boxes.batch(),
        num_boxes = boxes.num_boxes(),
        max_output = max_output_size
    )
    .entered();

    let mut padded = PaddedBatch::from_views(boxes, scores, config.tile_size)?;
    let output_size = sweep::sweep_tiles(&mut padded, iou_threshold, max_output_size, config);
    let selection = rank_live(&padded, &output_size, max_output_size);

    trace_event!(
        "nms_padded_done",
        selected = selection.total_valid()
    );
    Ok(selection)
}
