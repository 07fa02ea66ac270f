//! Final selection of surviving box indices.
//!
//! After the sweep, survivors are the still-nonzero boxes; their original
//! order already encodes priority, so the per-element selection is a stable
//! walk that takes the first `max_output_size` alive indices. Positions past
//! the valid count are filled with a sentinel (the padded box count) and
//! must be ignored by the caller.

use crate::batch::{box_is_live, PaddedBatch, BOX_DIMS};

/// Per-batch-element selection result.
pub struct Selection {
    indices: Vec<usize>,
    valid: Vec<usize>,
    batch: usize,
    max_output: usize,
    sentinel: usize,
}

impl Selection {
    /// Returns the batch size.
    pub fn batch(&self) -> usize {
        self.batch
    }

    /// Returns the requested maximum output size (the row width).
    pub fn max_output(&self) -> usize {
        self.max_output
    }

    /// Returns the padding value used past the valid count of each row.
    pub fn sentinel(&self) -> usize {
        self.sentinel
    }

    /// Returns the full index row for batch element `b`, sentinel included.
    pub fn indices(&self, b: usize) -> Option<&[usize]> {
        if b >= self.batch {
            return None;
        }
        let start = b * self.max_output;
        self.indices.get(start..start + self.max_output)
    }

    /// Returns only the genuinely selected indices for batch element `b`.
    pub fn selected(&self, b: usize) -> Option<&[usize]> {
        let count = self.valid_count(b)?;
        let row = self.indices(b)?;
        row.get(..count)
    }

    /// Returns the number of valid leading entries for batch element `b`.
    pub fn valid_count(&self, b: usize) -> Option<usize> {
        self.valid.get(b).copied()
    }

    /// Returns the total number of selected boxes across the batch.
    pub fn total_valid(&self) -> usize {
        self.valid.iter().sum()
    }
}

/// Ranks alive boxes per element and assembles the selection.
///
/// `output_size` is the sweep's per-element survivor count over processed
/// tiles; the valid count is that number capped at `max_output`. The index
/// walk covers the whole padded row, which is safe because the sweep only
/// stops early once every element already has `max_output` survivors inside
/// the processed prefix.
pub(crate) fn rank_live(
    padded: &PaddedBatch,
    output_size: &[usize],
    max_output: usize,
) -> Selection {
    let batch = padded.batch();
    let sentinel = padded.num_boxes();
    let mut indices = Vec::with_capacity(batch * max_output);
    let mut valid = Vec::with_capacity(batch);

    for (b, &survivors) in output_size.iter().enumerate().take(batch) {
        let row = padded.element(b).unwrap_or(&[]);
        let mut taken = 0;
        for (i, coords) in row.chunks_exact(BOX_DIMS).enumerate() {
            if taken == max_output {
                break;
            }
            if box_is_live(coords) {
                indices.push(i);
                taken += 1;
            }
        }
        indices.resize(indices.len() + (max_output - taken), sentinel);
        valid.push(survivors.min(max_output));
    }

    Selection {
        indices,
        valid,
        batch,
        max_output,
        sentinel,
    }
}
