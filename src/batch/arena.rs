//! Owned, tile-aligned working copy of a box batch.
//!
//! The suppression sweep mutates boxes in place, so the borrowed input views
//! are first copied into one owned buffer per array, padded up to the next
//! multiple of the tile size with all-zero boxes (and zero scores). Tile
//! slices are addressed by offset into each element's row: a tile iteration
//! borrows every earlier tile immutably and its own tile slice exclusively,
//! and the slice is committed back simply by the borrow ending before the
//! next tile starts.

use crate::batch::{BoxesView, ScoresView, BOX_DIMS};
use crate::util::{TileNmsError, TileNmsResult};

/// Owned padded copy of a `(batch, num_boxes, 4)` box array and its scores.
pub struct PaddedBatch {
    boxes: Vec<f32>,
    scores: Vec<f32>,
    batch: usize,
    num_boxes: usize,
    tile_size: usize,
}

impl PaddedBatch {
    /// Builds a padded working copy from borrowed views.
    ///
    /// Fails fast on a zero tile size or when the two views disagree on the
    /// batch size or box count. Padding is a no-op when the box count is
    /// already a multiple of the tile size.
    pub fn from_views(
        boxes: BoxesView<'_>,
        scores: ScoresView<'_>,
        tile_size: usize,
    ) -> TileNmsResult<Self> {
        if tile_size == 0 {
            return Err(TileNmsError::InvalidTileSize { tile_size });
        }
        if boxes.batch() != scores.batch() || boxes.num_boxes() != scores.num_boxes() {
            return Err(TileNmsError::ShapeMismatch {
                scores_batch: scores.batch(),
                scores_boxes: scores.num_boxes(),
                boxes_batch: boxes.batch(),
                boxes_boxes: boxes.num_boxes(),
            });
        }

        let batch = boxes.batch();
        let num_boxes = boxes.num_boxes();
        let padded = num_boxes.div_ceil(tile_size) * tile_size;

        let mut padded_boxes = vec![0.0f32; batch * padded * BOX_DIMS];
        let mut padded_scores = vec![0.0f32; batch * padded];
        let src_boxes = boxes.as_slice();
        let src_scores = scores.as_slice();
        for b in 0..batch {
            let src = &src_boxes[b * num_boxes * BOX_DIMS..(b + 1) * num_boxes * BOX_DIMS];
            let dst_start = b * padded * BOX_DIMS;
            padded_boxes[dst_start..dst_start + src.len()].copy_from_slice(src);

            let src = &src_scores[b * num_boxes..(b + 1) * num_boxes];
            let dst_start = b * padded;
            padded_scores[dst_start..dst_start + src.len()].copy_from_slice(src);
        }

        Ok(Self {
            boxes: padded_boxes,
            scores: padded_scores,
            batch,
            num_boxes: padded,
            tile_size,
        })
    }

    /// Returns the batch size.
    pub fn batch(&self) -> usize {
        self.batch
    }

    /// Returns the per-element box count after padding.
    pub fn num_boxes(&self) -> usize {
        self.num_boxes
    }

    /// Returns the tile size.
    pub fn tile_size(&self) -> usize {
        self.tile_size
    }

    /// Returns the number of tiles per batch element.
    pub fn num_tiles(&self) -> usize {
        self.num_boxes / self.tile_size
    }

    /// Returns the padded coordinate row for batch element `b`.
    pub fn element(&self, b: usize) -> Option<&[f32]> {
        if b >= self.batch {
            return None;
        }
        let len = self.num_boxes * BOX_DIMS;
        let start = b * len;
        self.boxes.get(start..start + len)
    }

    /// Returns the padded score row for batch element `b`.
    pub fn scores_element(&self, b: usize) -> Option<&[f32]> {
        if b >= self.batch {
            return None;
        }
        let start = b * self.num_boxes;
        self.scores.get(start..start + self.num_boxes)
    }

    /// Mutable access to the flat box buffer, one padded row per element.
    pub(crate) fn boxes_mut(&mut self) -> &mut [f32] {
        &mut self.boxes
    }

    /// Length in floats of one padded element row.
    pub(crate) fn row_len(&self) -> usize {
        self.num_boxes * BOX_DIMS
    }
}
