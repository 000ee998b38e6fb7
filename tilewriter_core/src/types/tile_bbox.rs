//! Tile-aligned bounding boxes for a single zoom level.
//!
//! A `TileBBox` describes a rectangular region of Web Mercator tiles at zoom level `z`.
//! Coordinates are inclusive on the maximum side when expressed as
//! `(x_min, y_min, x_max, y_max)`; internally the box stores `(x_min, y_min, width, height)`.
//!
//! ```
//! # use tilewriter_core::TileBBox;
//! let bb = TileBBox::from_min_and_size(4, 5, 6, 3, 2).unwrap();
//! assert_eq!((bb.x_min(), bb.y_min(), bb.x_max(), bb.y_max()), (5, 6, 7, 7));
//! assert_eq!(format!("{bb:?}"), "4: [5,6,7,7] (3x2)");
//! ```

use crate::{GeoBBox, MercatorBBox, TileCoord, mercator};
use anyhow::{Result, ensure};
use itertools::Itertools;
use std::fmt;
use tilewriter_derive::context;

/// A rectangular region of tiles at a specific zoom level.
#[derive(Clone, Copy, Hash, PartialEq, Eq)]
pub struct TileBBox {
	/// Zoom level of the bounding box.
	pub level: u8,
	x_min: u32,
	y_min: u32,
	width: u32,
	height: u32,
}

impl TileBBox {
	/// Creates a box from its minimum tile and its size in tiles.
	///
	/// # Errors
	/// Returns an error if the box does not fit into the grid of `level`.
	#[context("Failed to create TileBBox from min ({x_min}, {y_min}) and size ({width}, {height}) at level {level}")]
	pub fn from_min_and_size(level: u8, x_min: u32, y_min: u32, width: u32, height: u32) -> Result<TileBBox> {
		ensure!(level <= mercator::MAX_LEVEL, "level ({level}) must be <= 31");

		let size = 1u64 << level;

		ensure!(u64::from(x_min) < size, "x_min ({x_min}) must be < size ({size})");
		ensure!(u64::from(y_min) < size, "y_min ({y_min}) must be < size ({size})");
		ensure!(
			u64::from(width) + u64::from(x_min) <= size,
			"width ({width}) + x_min ({x_min}) must be <= size ({size})"
		);
		ensure!(
			u64::from(height) + u64::from(y_min) <= size,
			"height ({height}) + y_min ({y_min}) must be <= size ({size})"
		);

		Ok(TileBBox {
			level,
			x_min,
			y_min,
			width,
			height,
		})
	}

	/// Creates a box from its inclusive minimum and maximum tile indices.
	///
	/// # Errors
	/// Returns an error if `level` > 31, if a maximum exceeds the grid, or if a minimum exceeds its
	/// maximum.
	#[context("Failed to create TileBBox from min ({x_min}, {y_min}) and max ({x_max}, {y_max}) at level {level}")]
	pub fn from_min_and_max(level: u8, x_min: u32, y_min: u32, x_max: u32, y_max: u32) -> Result<TileBBox> {
		ensure!(level <= mercator::MAX_LEVEL, "level ({level}) must be <= 31");

		let max = (1u64 << level) - 1;

		ensure!(x_min <= x_max, "x_min ({x_min}) must be <= x_max ({x_max})");
		ensure!(y_min <= y_max, "y_min ({y_min}) must be <= y_max ({y_max})");
		ensure!(u64::from(x_max) <= max, "x_max ({x_max}) must be <= max ({max})");
		ensure!(u64::from(y_max) <= max, "y_max ({y_max}) must be <= max ({max})");

		Ok(TileBBox {
			level,
			x_min,
			y_min,
			width: x_max + 1 - x_min,
			height: y_max + 1 - y_min,
		})
	}

	/// Returns the smallest tile rectangle covering the geographic box at `level`.
	///
	/// All four corners are converted to tiles and the component-wise minimum and maximum are
	/// taken. The rectangle is not clipped to the shape of the area, so near the corners it may
	/// contain tiles outside of it.
	///
	/// # Errors
	/// Returns an error if `level` > 31.
	///
	/// ```
	/// # use tilewriter_core::{GeoBBox, TileBBox};
	/// let geo = GeoBBox::new(8.0653, 51.3563, 12.3528, 52.2564).unwrap();
	/// let bbox = TileBBox::from_geo(9, &geo).unwrap();
	/// assert_eq!(bbox, TileBBox::from_min_and_max(9, 267, 168, 273, 170).unwrap());
	/// ```
	#[context("Failed to convert {bbox:?} to a TileBBox at level {level}")]
	pub fn from_geo(level: u8, bbox: &GeoBBox) -> Result<TileBBox> {
		ensure!(level <= mercator::MAX_LEVEL, "level ({level}) must be <= 31");

		let mut bbox = *bbox;
		bbox.limit_to_mercator();

		let tiles = bbox
			.corners()
			.map(|p| mercator::lat_lon_to_tile(p.lat, p.lon, level));
		let (x_min, x_max) = tiles.iter().map(|t| t.x).minmax().into_option().unwrap_or_default();
		let (y_min, y_max) = tiles.iter().map(|t| t.y).minmax().into_option().unwrap_or_default();

		Self::from_min_and_max(level, x_min, y_min, x_max, y_max)
	}

	#[must_use]
	#[inline]
	pub fn x_min(&self) -> u32 {
		self.x_min
	}

	#[must_use]
	#[inline]
	pub fn y_min(&self) -> u32 {
		self.y_min
	}

	/// Maximum x index (inclusive).
	#[must_use]
	#[inline]
	pub fn x_max(&self) -> u32 {
		self.x_min + self.width.max(1) - 1
	}

	/// Maximum y index (inclusive).
	#[must_use]
	#[inline]
	pub fn y_max(&self) -> u32 {
		self.y_min + self.height.max(1) - 1
	}

	/// Width in tiles.
	#[must_use]
	#[inline]
	pub fn width(&self) -> u32 {
		self.width
	}

	/// Height in tiles.
	#[must_use]
	#[inline]
	pub fn height(&self) -> u32 {
		self.height
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.width == 0 || self.height == 0
	}

	#[must_use]
	pub fn count_tiles(&self) -> u64 {
		u64::from(self.width) * u64::from(self.height)
	}

	/// Returns `true` if `coord` lies at the same level and inside the box.
	#[must_use]
	pub fn contains(&self, coord: &TileCoord) -> bool {
		!self.is_empty()
			&& coord.level == self.level
			&& (self.x_min..=self.x_max()).contains(&coord.x)
			&& (self.y_min..=self.y_max()).contains(&coord.y)
	}

	/// Returns an iterator over all tile coordinates within the box, row by row.
	pub fn iter_coords(&self) -> impl Iterator<Item = TileCoord> + '_ {
		let level = self.level;
		let y_range = self.y_min..self.y_min + self.height;
		let x_range = self.x_min..self.x_min + self.width;
		y_range
			.cartesian_product(x_range)
			.map(move |(y, x)| TileCoord { level, x, y })
	}

	/// Splits the box into cells of at most `size × size` tiles, anchored at the box's
	/// minimum corner.
	///
	/// The cells are ordered column by column: all cells of the first `size` columns from north
	/// to south, then the next columns. The last cell in each direction is shorter when the box is
	/// not a multiple of `size`.
	///
	/// ```
	/// # use tilewriter_core::TileBBox;
	/// let bbox = TileBBox::from_min_and_max(5, 2, 3, 6, 4).unwrap();
	/// let cells: Vec<String> = bbox.iter_grid(3).map(|c| c.to_string()).collect();
	/// assert_eq!(cells, vec!["5:[2,3,4,4]", "5:[5,3,6,4]"]);
	/// ```
	pub fn iter_grid(&self, size: u32) -> impl Iterator<Item = TileBBox> + '_ {
		assert!(size != 0, "size must be greater than 0");

		let columns = (self.x_min..self.x_min + self.width).step_by(size as usize);
		let rows = (self.y_min..self.y_min + self.height).step_by(size as usize);
		columns.cartesian_product(rows).map(move |(x, y)| TileBBox {
			level: self.level,
			x_min: x,
			y_min: y,
			width: size.min(self.x_min + self.width - x),
			height: size.min(self.y_min + self.height - y),
		})
	}

	/// Projected bounds of the whole box.
	#[must_use]
	pub fn to_mercator_bbox(&self) -> MercatorBBox {
		let min = mercator::tile_bounds(i64::from(self.x_min), i64::from(self.y_min), self.level);
		let max = mercator::tile_bounds(i64::from(self.x_max()), i64::from(self.y_max()), self.level);
		min.union(&max)
	}

	/// Inclusive bounds as `[x_min, y_min, x_max, y_max]`.
	#[must_use]
	pub fn as_array(&self) -> [u32; 4] {
		[self.x_min, self.y_min, self.x_max(), self.y_max()]
	}
}

/// Formats as `z: [x_min,y_min,x_max,y_max] (widthxheight)`.
impl fmt::Debug for TileBBox {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{}: [{},{},{},{}] ({}x{})",
			self.level,
			self.x_min,
			self.y_min,
			self.x_max(),
			self.y_max(),
			self.width,
			self.height
		)
	}
}

/// Formats as `z:[x_min,y_min,x_max,y_max]`.
impl fmt::Display for TileBBox {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{}:[{},{},{},{}]",
			self.level,
			self.x_min,
			self.y_min,
			self.x_max(),
			self.y_max()
		)
	}
}
