use super::{RegionalBatch, RenderOutcome, TileLayout};
use crate::render::{MapRenderer, RenderGate, RenderOptions, RenderRequest};
use anyhow::{Context, Result};
use std::sync::Arc;
use tilewriter_core::io::is_file;
use tilewriter_derive::context;
use tilewriter_image::format::png;

/// Regional images are intermediate files, so they are compressed for speed.
const REGIONAL_PNG_SPEED: u8 = 90;

/// Renders regional images, skipping those that already exist.
pub struct RenderDriver {
	gate: RenderGate,
	options: RenderOptions,
	layout: Arc<TileLayout>,
}

impl RenderDriver {
	pub fn new(renderer: Box<dyn MapRenderer>, options: RenderOptions, layout: Arc<TileLayout>) -> RenderDriver {
		RenderDriver {
			gate: RenderGate::new(renderer),
			options,
			layout,
		}
	}

	pub fn renderer_name(&self) -> &str {
		self.gate.name()
	}

	/// Renders `batch` unless its regional image exists.
	///
	/// A failed render writes nothing, so the next run tries again.
	#[context("Failed to render regional image {:?}", self.layout.regional_path(batch))]
	pub async fn render(&self, batch: &RegionalBatch) -> Result<RenderOutcome> {
		let path = self.layout.regional_path(batch);
		if is_file(&path) {
			log::debug!("{batch:?}: {path:?} exists, skipping");
			return Ok(RenderOutcome::Skipped);
		}

		let level_dir = self.layout.level_dir(batch.level());
		tokio::fs::create_dir_all(&level_dir)
			.await
			.with_context(|| format!("creating directory {level_dir:?}"))?;

		let size = batch.image_size();
		let request = RenderRequest {
			bbox: batch.render_bbox(),
			width: size,
			height: size,
			options: &self.options,
		};
		log::debug!("{batch:?}: rendering {:?} at {size}x{size} px", request.bbox);
		let image = self.gate.render(&request).await?;

		tokio::task::spawn_blocking(move || png::save(&path, &image, Some(REGIONAL_PNG_SPEED)))
			.await
			.context("PNG encoder task failed")??;
		Ok(RenderOutcome::Rendered)
	}
}
