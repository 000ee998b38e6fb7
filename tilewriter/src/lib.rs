//! Renders a geographic area of interest into a slippy map tile pyramid.
//!
//! For every zoom level the tile rectangle covering the area is split into regional batches.
//! Each batch is rendered as one large image with a border of padding tiles, and the image is
//! then cut into 256 px tiles written to `{z}/{x}/{y}.png`.

pub mod area;
pub mod config;
pub mod pipeline;
pub mod render;
