//! Pure building blocks of the tile pipeline: coordinates, bounding boxes, Web Mercator math,
//! concurrency limits, progress reporting and atomic file writes.

pub mod io;
pub mod mercator;
pub mod progress;

mod concurrency;
pub use concurrency::*;

mod types;
pub use types::*;
