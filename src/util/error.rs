//! Error types for tilenms.

use thiserror::Error;

/// Result alias for tilenms operations.
pub type TileNmsResult<T> = std::result::Result<T, TileNmsError>;

/// Errors raised while validating inputs to the suppression pipeline.
///
/// All variants are produced at the API boundary, before any padding or
/// suppression work starts; once the shapes are accepted the algorithm is
/// total and always yields a well-shaped output.
#[derive(Debug, Error, PartialEq)]
pub enum TileNmsError {
    /// The backing buffer is shorter than the declared shape requires.
    #[error("buffer too small for {context}: needed {needed}, got {got}")]
    BufferTooSmall {
        needed: usize,
        got: usize,
        context: &'static str,
    },
    /// Scores and boxes disagree on the batch size or per-element box count.
    #[error(
        "scores shape ({scores_batch}, {scores_boxes}) does not match \
         boxes shape ({boxes_batch}, {boxes_boxes})"
    )]
    ShapeMismatch {
        scores_batch: usize,
        scores_boxes: usize,
        boxes_batch: usize,
        boxes_boxes: usize,
    },
    /// The tile size must be nonzero.
    #[error("invalid tile size: {tile_size}")]
    InvalidTileSize { tile_size: usize },
    /// The IoU threshold must be a finite number.
    #[error("iou threshold must be finite, got {threshold}")]
    NonFiniteThreshold { threshold: f32 },
}
