//! Raster helpers for the tile pipeline: PNG encoding and decoding, and cutting a regional image
//! into 256 px tiles.

pub mod format;
mod split;
mod traits;

pub use split::*;
pub use traits::*;
