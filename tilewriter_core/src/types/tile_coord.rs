//! Three-dimensional tile coordinates in a Web Mercator pyramid.
//!
//! Coordinates use XYZ numbering: `y = 0` is the northern edge of the map.
//!
//! ```
//! use tilewriter_core::TileCoord;
//!
//! let coord = TileCoord::new(5, 6, 7).unwrap();
//! assert_eq!((coord.level, coord.x, coord.y), (5, 6, 7));
//! assert!(TileCoord::new(5, 32, 0).is_err());
//! ```

use crate::mercator;
use anyhow::{Result, ensure};
use std::fmt::{self, Debug};

/// A tile coordinate with zoom level, x and y index.
#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Hash, Copy)]
pub struct TileCoord {
	/// The zoom level of the tile.
	pub level: u8,
	/// The x index of the tile.
	pub x: u32,
	/// The y index of the tile, counted from the north.
	pub y: u32,
}

impl TileCoord {
	/// Creates a new `TileCoord` at `level` with the indices `x`, `y`.
	///
	/// # Errors
	/// Returns an error if `level` > 31 or an index lies outside `0..2^level`.
	pub fn new(level: u8, x: u32, y: u32) -> Result<TileCoord> {
		ensure!(level <= mercator::MAX_LEVEL, "level ({level}) must be <= 31");
		let max = 1u64 << level;
		ensure!(u64::from(x) < max, "x ({x}) out of bounds for level {level}");
		ensure!(u64::from(y) < max, "y ({y}) out of bounds for level {level}");
		Ok(TileCoord { level, x, y })
	}

	/// Get the maximum valid x or y index for this tile's zoom level, `2^level - 1`.
	///
	/// ```
	/// use tilewriter_core::TileCoord;
	///
	/// let coord = TileCoord::new(5, 10, 15).unwrap();
	/// assert_eq!(coord.max_value(), 31);
	/// ```
	#[must_use]
	pub fn max_value(&self) -> u32 {
		((1u64 << self.level) - 1) as u32
	}

	/// Flips the y index vertically within the tile grid.
	///
	/// This converts between XYZ (y increasing southward) and TMS (y increasing northward)
	/// numbering; applying it twice restores the original coordinate.
	///
	/// ```
	/// use tilewriter_core::TileCoord;
	///
	/// let mut coord = TileCoord::new(3, 1, 2).unwrap();
	/// coord.flip_y();
	/// assert_eq!(coord.y, 5);
	/// ```
	pub fn flip_y(&mut self) {
		self.y = self.max_value() - self.y;
	}
}

/// Formats as `TileCoord(z, [x, y])`.
impl Debug for TileCoord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "TileCoord({}, [{}, {}])", self.level, self.x, self.y)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[test]
	fn new_and_fields() {
		let coord = TileCoord::new(5, 3, 4).unwrap();
		assert_eq!((coord.level, coord.x, coord.y), (5, 3, 4));
		assert_eq!(format!("{coord:?}"), "TileCoord(5, [3, 4])");
	}

	#[rstest]
	#[case(32, 0, 0)]
	#[case(2, 4, 0)]
	#[case(2, 0, 4)]
	fn new_out_of_bounds(#[case] level: u8, #[case] x: u32, #[case] y: u32) {
		assert!(TileCoord::new(level, x, y).is_err());
	}

	#[test]
	fn max_value_at_level_31() {
		let coord = TileCoord::new(31, 0, 0).unwrap();
		assert_eq!(coord.max_value(), (1u32 << 31) - 1);
	}

	#[test]
	fn flip_y_is_an_involution() {
		for level in 0..=10u8 {
			let max = (1u32 << level) - 1;
			for y in [0, max / 2, max] {
				let original = TileCoord::new(level, 0, y).unwrap();
				let mut coord = original;
				coord.flip_y();
				assert_eq!(coord.y, (1u32 << level) - y - 1);
				coord.flip_y();
				assert_eq!(coord, original);
			}
		}
	}

	#[test]
	fn ordering_is_level_then_x_then_y() {
		let mut v = vec![
			TileCoord::new(2, 1, 0).unwrap(),
			TileCoord::new(1, 1, 1).unwrap(),
			TileCoord::new(2, 0, 3).unwrap(),
		];
		v.sort();
		assert_eq!(
			v,
			vec![
				TileCoord::new(1, 1, 1).unwrap(),
				TileCoord::new(2, 0, 3).unwrap(),
				TileCoord::new(2, 1, 0).unwrap(),
			]
		);
	}
}
