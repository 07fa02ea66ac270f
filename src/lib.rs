//! TileNMS is a batched, tile-based non-maximum suppression library.
//!
//! The classic greedy NMS scan is sequential and data-dependent; this crate
//! instead pads each batch element's boxes up to a multiple of a fixed tile
//! size and suppresses tile by tile, so every loop bound is static for a
//! given input shape. Boxes enter ranked by descending score and are never
//! re-sorted; an earlier index is a higher suppression priority.
//!
//! The baseline is scalar CPU code; the `rayon` feature adds batch
//! parallelism within a tile step, the `simd` feature vectorizes the
//! pairwise overlap kernel, and the `tracing` feature instruments the
//! driver and sweep.

pub mod batch;
pub mod overlap;
mod select;
pub mod suppress;
mod trace;
pub mod util;

pub use batch::{BoxesView, PaddedBatch, ScoresView, BOX_DIMS};
pub use overlap::{bbox_overlap, IouMatrix};
pub use select::Selection;
pub use suppress::{
    non_max_suppression_padded, non_max_suppression_padded_with, NmsConfig, DEFAULT_TILE_SIZE,
};
pub use util::{TileNmsError, TileNmsResult};
