//! Splits the tile rectangle of a zoom level into regional batches.

use anyhow::{Result, ensure};
use itertools::Itertools;
use std::fmt;
use tilewriter_core::{GeoBBox, MercatorBBox, TileBBox, TileCoord, mercator};
use tilewriter_derive::context;

/// A group of at most `step × step` tiles rendered as one image with `border` padding tiles on
/// every side.
///
/// The image always has the full size `(step + 2·border) · 256` and is anchored at the batch's
/// first tile, so a trailing batch that covers fewer tiles than `step` leaves the rest of its
/// image unused.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionalBatch {
	tiles: TileBBox,
	step: u32,
	border: u32,
}

impl RegionalBatch {
	/// # Errors
	/// Fails if `tiles` is empty or larger than `step` in either direction, or if the image
	/// size does not fit into a `u32`.
	pub fn new(tiles: TileBBox, step: u32, border: u32) -> Result<RegionalBatch> {
		check_batch_size(step, border)?;
		ensure!(!tiles.is_empty(), "a batch must contain at least one tile");
		ensure!(
			tiles.width() <= step && tiles.height() <= step,
			"{tiles:?} does not fit into a batch of step {step}"
		);
		Ok(RegionalBatch { tiles, step, border })
	}

	pub fn level(&self) -> u8 {
		self.tiles.level
	}

	/// The first tile, in XYZ numbering.
	pub fn anchor(&self) -> TileCoord {
		TileCoord {
			level: self.tiles.level,
			x: self.tiles.x_min(),
			y: self.tiles.y_min(),
		}
	}

	/// The tiles this batch produces.
	pub fn tiles(&self) -> &TileBBox {
		&self.tiles
	}

	pub fn step(&self) -> u32 {
		self.step
	}

	pub fn border(&self) -> u32 {
		self.border
	}

	/// Edge length of the square regional image in pixels.
	pub fn image_size(&self) -> u32 {
		(self.step + 2 * self.border) * mercator::TILE_SIZE
	}

	/// The rendered tile range including padding, `[x_min, y_min, x_max, y_max]` inclusive.
	///
	/// At the edge of the map the range extends past the grid.
	pub fn padded_range(&self) -> [i64; 4] {
		let (x, y) = (i64::from(self.tiles.x_min()), i64::from(self.tiles.y_min()));
		let (step, border) = (i64::from(self.step), i64::from(self.border));
		[x - border, y - border, x + step + border - 1, y + step + border - 1]
	}

	/// The projected rectangle to render.
	pub fn render_bbox(&self) -> MercatorBBox {
		let [x_min, y_min, x_max, y_max] = self.padded_range();
		let level = self.level();
		mercator::tile_bounds(x_min, y_min, level).union(&mercator::tile_bounds(x_max, y_max, level))
	}

	/// Top-left pixel of `coord` in the regional image, or `None` if the batch does not
	/// produce that tile.
	pub fn pixel_offset(&self, coord: &TileCoord) -> Option<(u32, u32)> {
		if !self.tiles.contains(coord) {
			return None;
		}
		let i = coord.x - self.tiles.x_min();
		let j = coord.y - self.tiles.y_min();
		Some((
			(self.border + i) * mercator::TILE_SIZE,
			(self.border + j) * mercator::TILE_SIZE,
		))
	}
}

impl fmt::Debug for RegionalBatch {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "RegionalBatch({:?}, s{}, b{})", self.tiles, self.step, self.border)
	}
}

/// All batches of one zoom level.
#[derive(Clone, Debug, PartialEq)]
pub struct ZoomPlan {
	pub level: u8,
	/// The minimal tile rectangle covering the area.
	pub tile_bbox: TileBBox,
	/// Column by column, each column from north to south.
	pub batches: Vec<RegionalBatch>,
}

impl ZoomPlan {
	/// Number of batch columns.
	pub fn columns(&self) -> usize {
		self.batches.iter().map(|b| b.tiles().x_min()).unique().count()
	}

	/// Number of batch rows.
	pub fn rows(&self) -> usize {
		self.batches.iter().map(|b| b.tiles().y_min()).unique().count()
	}

	/// `W x H tiles -> RX x RY regional tiles`
	pub fn describe(&self) -> String {
		format!(
			"{} x {} tiles -> {} x {} regional tiles",
			self.tile_bbox.width(),
			self.tile_bbox.height(),
			self.columns(),
			self.rows()
		)
	}
}

/// `step >= 1` and `(step + 2·border) · 256` must fit into a `u32`.
pub fn check_batch_size(step: u32, border: u32) -> Result<()> {
	ensure!(step >= 1, "step must be at least 1");
	let image_size = (u64::from(step) + 2 * u64::from(border)) * u64::from(mercator::TILE_SIZE);
	ensure!(
		image_size <= u64::from(u32::MAX),
		"regional images of {image_size} pixels are too large, reduce step or border"
	);
	Ok(())
}

/// Computes [`ZoomPlan`]s for fixed `step` and `border`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Planner {
	step: u32,
	border: u32,
}

impl Planner {
	pub fn new(step: u32, border: u32) -> Result<Planner> {
		check_batch_size(step, border)?;
		Ok(Planner { step, border })
	}

	/// Plans zoom level `level` for the area `bbox`.
	///
	/// The result only depends on the arguments, so a rerun produces the same batches.
	#[context("Failed to plan level {level} for {bbox:?}")]
	pub fn plan(&self, bbox: &GeoBBox, level: u8) -> Result<ZoomPlan> {
		let tile_bbox = TileBBox::from_geo(level, bbox)?;
		let batches = tile_bbox
			.iter_grid(self.step)
			.map(|tiles| RegionalBatch::new(tiles, self.step, self.border))
			.collect::<Result<Vec<_>>>()?;
		Ok(ZoomPlan {
			level,
			tile_bbox,
			batches,
		})
	}
}
