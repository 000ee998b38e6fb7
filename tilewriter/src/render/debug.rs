//! A renderer that draws the tile grid instead of a map.
//!
//! Every 256 px cell gets a one pixel outline and, if it lies on the map, a square marker whose
//! colour encodes the tile it shows (see [`marker_color`]). Splitting a debug image and reading
//! the marker back verifies the pixel offsets end to end.

use super::{MapRenderer, RenderRequest};
use anyhow::{Context, Result};
use async_trait::async_trait;
use image::{Rgba, RgbaImage};
use imageproc::{
	drawing::{draw_filled_rect_mut, draw_hollow_rect_mut},
	rect::Rect,
};
use tilewriter_core::{MercatorBBox, TileCoord, mercator};

const OUTLINE: Rgba<u8> = Rgba([40, 40, 40, 255]);

/// Distance of the marker from the top-left corner of its cell, in pixels.
pub const MARKER_OFFSET: u32 = 8;
/// Edge length of the marker, in pixels.
pub const MARKER_SIZE: u32 = 16;

/// The colour of the marker drawn into `coord`: low bytes of x and y, the level, opaque.
pub fn marker_color(coord: &TileCoord) -> Rgba<u8> {
	Rgba([(coord.x & 0xff) as u8, (coord.y & 0xff) as u8, coord.level, 255])
}

#[derive(Debug, Default)]
pub struct DebugRenderer;

#[async_trait]
impl MapRenderer for DebugRenderer {
	fn name(&self) -> &str {
		"debug"
	}

	async fn render(&self, request: &RenderRequest<'_>) -> Result<RgbaImage> {
		let (bbox, width, height) = (request.bbox, request.width, request.height);
		let background = request.options.background;
		tokio::task::spawn_blocking(move || draw(bbox, width, height, background))
			.await
			.context("debug renderer task failed")
	}
}

fn draw(bbox: MercatorBBox, width: u32, height: u32, background: Rgba<u8>) -> RgbaImage {
	let mut image = RgbaImage::from_pixel(width, height, background);
	if width == 0 || height == 0 {
		return image;
	}

	let res_x = bbox.width() / f64::from(width);
	let res_y = bbox.height() / f64::from(height);
	let level = level_of_resolution(res_x);
	let cell = mercator::TILE_SIZE;

	for y0 in (0..height).step_by(cell as usize) {
		for x0 in (0..width).step_by(cell as usize) {
			let outline = Rect::at(x0 as i32, y0 as i32).of_size(cell.min(width - x0), cell.min(height - y0));
			draw_hollow_rect_mut(&mut image, outline, OUTLINE);

			let mx = bbox.x_min + (f64::from(x0) + f64::from(cell) / 2.0) * res_x;
			let my = bbox.y_max - (f64::from(y0) + f64::from(cell) / 2.0) * res_y;
			if mx.abs() >= mercator::ORIGIN_SHIFT || my.abs() >= mercator::ORIGIN_SHIFT {
				continue;
			}
			let coord = mercator::meters_to_tile(mx, my, level);
			let marker = Rect::at((x0 + MARKER_OFFSET) as i32, (y0 + MARKER_OFFSET) as i32).of_size(MARKER_SIZE, MARKER_SIZE);
			draw_filled_rect_mut(&mut image, marker, marker_color(&coord));
		}
	}
	image
}

/// The zoom level whose tiles are 256 px wide at `meters_per_pixel`.
fn level_of_resolution(meters_per_pixel: f64) -> u8 {
	let level = (mercator::resolution(0) / meters_per_pixel).log2().round();
	if level.is_finite() {
		level.clamp(0.0, f64::from(mercator::MAX_LEVEL)) as u8
	} else {
		0
	}
}
