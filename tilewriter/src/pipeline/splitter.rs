use super::{RegionalBatch, SplitOutcome, TileLayout};
use anyhow::{Context, Result, ensure};
use std::sync::Arc;
use tilewriter_core::io::is_file;
use tilewriter_derive::context;
use tilewriter_image::{crop_tile, format::png};

/// Cuts regional images into tiles.
#[derive(Clone, Debug)]
pub struct TileSplitter {
	layout: Arc<TileLayout>,
}

impl TileSplitter {
	pub fn new(layout: Arc<TileLayout>) -> TileSplitter {
		TileSplitter { layout }
	}

	/// Writes every tile of `batch` that does not exist yet. Blocking.
	///
	/// The regional image is only decoded if at least one tile is missing. A missing regional
	/// image is reported in the outcome, not as an error.
	#[context("Failed to split {batch:?}")]
	pub fn split(&self, batch: &RegionalBatch) -> Result<SplitOutcome> {
		let mut outcome = SplitOutcome::default();
		let mut pending = Vec::new();
		for coord in batch.tiles().iter_coords() {
			let path = self.layout.tile_path(&coord);
			if is_file(&path) {
				log::trace!("{coord:?}: {path:?} exists, skipping");
				outcome.skipped += 1;
			} else {
				pending.push((coord, path));
			}
		}
		if pending.is_empty() {
			return Ok(outcome);
		}

		let source = self.layout.regional_path(batch);
		if !is_file(&source) {
			log::warn!("regional image {source:?} is missing, {} tiles not written", pending.len());
			outcome.missing = true;
			return Ok(outcome);
		}

		let image = png::load(&source)?;
		let size = batch.image_size();
		ensure!(
			image.dimensions() == (size, size),
			"{source:?} is {}x{} px, expected {size}x{size}",
			image.width(),
			image.height()
		);

		for (coord, path) in pending {
			let (x, y) = batch
				.pixel_offset(&coord)
				.with_context(|| format!("{coord:?} is not part of the batch"))?;
			let tile = crop_tile(&image, x, y)?;
			png::save(&path, &tile, None)?;
			log::trace!("{coord:?}: wrote {path:?}");
			outcome.written += 1;
		}
		Ok(outcome)
	}
}
