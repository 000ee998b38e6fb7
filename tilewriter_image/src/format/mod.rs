//! Image file formats. Tiles and regional images are always PNG.

pub mod png;
