use super::RegionalBatch;
use std::path::{Path, PathBuf};
use tilewriter_core::{TileCoord, TileScheme};

/// File names of the regional images and of the tile tree below the output directory.
///
/// ```
/// use std::path::PathBuf;
/// use tilewriter::pipeline::TileLayout;
/// use tilewriter_core::{TileCoord, TileScheme};
///
/// let layout = TileLayout::new("out", TileScheme::Tms);
/// let coord = TileCoord::new(10, 100, 50).unwrap();
/// assert_eq!(layout.tile_path(&coord), PathBuf::from("out/10/100/973.png"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileLayout {
	root: PathBuf,
	scheme: TileScheme,
}

impl TileLayout {
	pub fn new(root: impl Into<PathBuf>, scheme: TileScheme) -> TileLayout {
		TileLayout {
			root: root.into(),
			scheme,
		}
	}

	pub fn root(&self) -> &Path {
		&self.root
	}

	pub fn scheme(&self) -> TileScheme {
		self.scheme
	}

	/// `{root}/{z}`
	pub fn level_dir(&self, level: u8) -> PathBuf {
		self.root.join(level.to_string())
	}

	/// `{z}_{x}_{y}_s{step}_b{border}.png`, with the anchor in XYZ numbering.
	///
	/// Step and border are part of the name, so images rendered with other settings are never
	/// reused.
	pub fn regional_name(batch: &RegionalBatch) -> String {
		let anchor = batch.anchor();
		format!(
			"{}_{}_{}_s{}_b{}.png",
			anchor.level,
			anchor.x,
			anchor.y,
			batch.step(),
			batch.border()
		)
	}

	pub fn regional_path(&self, batch: &RegionalBatch) -> PathBuf {
		self.root.join(Self::regional_name(batch))
	}

	/// `{root}/{z}/{x}/{y}.png` with `y` numbered according to the scheme.
	pub fn tile_path(&self, coord: &TileCoord) -> PathBuf {
		self.level_dir(coord.level)
			.join(coord.x.to_string())
			.join(format!("{}.png", self.scheme.y_of(coord)))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use rstest::rstest;
	use tilewriter_core::TileBBox;

	#[test]
	fn regional_path() {
		let batch = RegionalBatch::new(TileBBox::from_min_and_max(10, 104, 50, 105, 53).unwrap(), 4, 1).unwrap();
		let layout = TileLayout::new("/data", TileScheme::Tms);
		assert_eq!(layout.regional_path(&batch), PathBuf::from("/data/10_104_50_s4_b1.png"));
		assert_eq!(layout.level_dir(10), PathBuf::from("/data/10"));
	}

	#[rstest]
	#[case(TileScheme::Tms, 0, 0, 0, "0/0/0.png")]
	#[case(TileScheme::Tms, 3, 1, 2, "3/1/5.png")]
	#[case(TileScheme::Google, 3, 1, 2, "3/1/2.png")]
	#[case(TileScheme::Tms, 10, 105, 53, "10/105/970.png")]
	fn tile_paths(#[case] scheme: TileScheme, #[case] z: u8, #[case] x: u32, #[case] y: u32, #[case] expected: &str) {
		let layout = TileLayout::new("out", scheme);
		let coord = TileCoord::new(z, x, y).unwrap();
		assert_eq!(layout.tile_path(&coord), Path::new("out").join(expected));
	}
}
