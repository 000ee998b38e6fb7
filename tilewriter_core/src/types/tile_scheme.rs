use crate::TileCoord;
use serde::Deserialize;
use std::fmt::{self, Display};

/// The numbering of the tile rows written to disk.
///
/// Coordinates are always computed in XYZ numbering; the scheme only decides which `y`
/// ends up in the file name.
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum TileScheme {
	/// XYZ numbering, `y = 0` is the northern edge.
	#[serde(alias = "xyz")]
	#[cfg_attr(feature = "cli", value(alias = "xyz"))]
	Google,
	/// TMS numbering, `y = 0` is the southern edge: `y_tms = 2^z - y - 1`.
	#[default]
	Tms,
}

impl TileScheme {
	/// Returns the `y` index of `coord` in this numbering.
	///
	/// ```
	/// use tilewriter_core::{TileCoord, TileScheme};
	///
	/// let coord = TileCoord::new(10, 100, 50).unwrap();
	/// assert_eq!(TileScheme::Google.y_of(&coord), 50);
	/// assert_eq!(TileScheme::Tms.y_of(&coord), 973);
	/// ```
	#[must_use]
	pub fn y_of(&self, coord: &TileCoord) -> u32 {
		match self {
			TileScheme::Google => coord.y,
			TileScheme::Tms => coord.max_value() - coord.y,
		}
	}

	/// Converts a coordinate given in this numbering back to XYZ.
	#[must_use]
	pub fn to_xyz(&self, mut coord: TileCoord) -> TileCoord {
		if *self == TileScheme::Tms {
			coord.flip_y();
		}
		coord
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			TileScheme::Google => "google",
			TileScheme::Tms => "tms",
		}
	}
}

impl Display for TileScheme {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(TileScheme::Google, 4, 3, 3)]
	#[case(TileScheme::Tms, 0, 0, 0)]
	#[case(TileScheme::Tms, 1, 0, 1)]
	#[case(TileScheme::Tms, 3, 2, 5)]
	#[case(TileScheme::Tms, 10, 50, 973)]
	fn y_numbering(#[case] scheme: TileScheme, #[case] level: u8, #[case] y: u32, #[case] expected: u32) {
		let coord = TileCoord::new(level, 0, y).unwrap();
		assert_eq!(scheme.y_of(&coord), expected);
	}

	#[test]
	fn tms_round_trip() {
		for level in [0u8, 1, 4, 12] {
			let max = (1u32 << level) - 1;
			for y in [0, max / 3, max] {
				let coord = TileCoord::new(level, 1u32.min(max), y).unwrap();
				let tms = TileCoord::new(level, coord.x, TileScheme::Tms.y_of(&coord)).unwrap();
				assert_eq!(TileScheme::Tms.to_xyz(tms), coord);
				assert_eq!(TileScheme::Google.to_xyz(coord), coord);
			}
		}
	}

	#[test]
	fn display_and_default() {
		assert_eq!(TileScheme::default(), TileScheme::Tms);
		assert_eq!(TileScheme::Google.to_string(), "google");
		assert_eq!(TileScheme::Tms.to_string(), "tms");
	}
}
