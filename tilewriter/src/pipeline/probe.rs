use super::{RegionalBatch, TileLayout};
use anyhow::{Context, Result};
use futures::{StreamExt, TryStreamExt, stream};
use std::sync::Arc;
use tilewriter_core::io::is_file;

/// What already exists on disk for a batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BatchStatus {
	pub regional_exists: bool,
	pub tiles_present: u64,
}

impl BatchStatus {
	pub fn is_complete(&self, batch: &RegionalBatch) -> bool {
		self.tiles_present == batch.tiles().count_tiles()
	}
}

/// Checks the files of every batch, `concurrency` batches at a time. The result keeps the
/// order of `batches`.
pub async fn probe_batches(layout: Arc<TileLayout>, batches: &[RegionalBatch], concurrency: usize) -> Result<Vec<BatchStatus>> {
	stream::iter(batches.iter().copied())
		.map(|batch| {
			let layout = layout.clone();
			async move {
				tokio::task::spawn_blocking(move || BatchStatus {
					regional_exists: is_file(&layout.regional_path(&batch)),
					tiles_present: batch
						.tiles()
						.iter_coords()
						.filter(|coord| is_file(&layout.tile_path(coord)))
						.count() as u64,
				})
				.await
				.context("probe task failed")
			}
		})
		.buffered(concurrency.max(1))
		.try_collect()
		.await
}

#[cfg(test)]
mod tests {
	use super::*;
	use assert_fs::TempDir;
	use pretty_assertions::assert_eq;
	use tilewriter_core::{TileBBox, TileCoord, TileScheme};

	#[tokio::test]
	async fn reports_existing_files_in_order() -> Result<()> {
		let dir = TempDir::new()?;
		let layout = Arc::new(TileLayout::new(dir.path(), TileScheme::Google));
		let first = RegionalBatch::new(TileBBox::from_min_and_max(3, 0, 0, 1, 1)?, 2, 0)?;
		let second = RegionalBatch::new(TileBBox::from_min_and_max(3, 2, 0, 2, 1)?, 2, 0)?;

		std::fs::write(layout.regional_path(&second), b"png")?;
		for coord in [TileCoord::new(3, 2, 0)?, TileCoord::new(3, 2, 1)?, TileCoord::new(3, 0, 0)?] {
			let path = layout.tile_path(&coord);
			std::fs::create_dir_all(path.parent().unwrap())?;
			std::fs::write(path, b"png")?;
		}

		let status = probe_batches(layout, &[first, second], 4).await?;
		assert_eq!(
			status,
			vec![
				BatchStatus {
					regional_exists: false,
					tiles_present: 1
				},
				BatchStatus {
					regional_exists: true,
					tiles_present: 2
				},
			]
		);
		assert!(!status[0].is_complete(&first));
		assert!(status[1].is_complete(&second));
		Ok(())
	}
}
