use super::{Planner, PipelineStats, RenderDriver, TileLayout, TileSplitter, ZoomPlan};
use crate::{config::PipelineConfig, render::MapRenderer};
use anyhow::{Context, Result};
use futures::{StreamExt, TryStreamExt, stream};
use std::sync::Arc;
use tilewriter_core::{ConcurrencyLimits, GeoBBox, progress::get_progress_bar};
use tilewriter_derive::context;

/// Runs the render and split stages over all configured zoom levels.
///
/// ```no_run
/// # async fn example() -> anyhow::Result<()> {
/// use tilewriter::{config::PipelineConfig, pipeline::Pipeline, render::DebugRenderer};
///
/// let config = PipelineConfig {
/// 	area_of_interest: Some("13.08,52.33,13.76,52.68".into()),
/// 	..PipelineConfig::default()
/// };
/// let stats = Pipeline::new(config.arc(), Box::new(DebugRenderer))?.run().await?;
/// println!("{stats}");
/// # Ok(())
/// # }
/// ```
pub struct Pipeline {
	config: Arc<PipelineConfig>,
	area: GeoBBox,
	planner: Planner,
	layout: Arc<TileLayout>,
	driver: RenderDriver,
	splitter: TileSplitter,
	limits: ConcurrencyLimits,
	show_progress: bool,
}

impl Pipeline {
	/// Validates the configuration and loads the area of interest.
	///
	/// # Errors
	/// Every configuration error is raised here, before anything is rendered.
	pub fn new(config: Arc<PipelineConfig>, renderer: Box<dyn MapRenderer>) -> Result<Pipeline> {
		config.validate()?;
		let area = config
			.area_of_interest
			.as_ref()
			.context("no area of interest configured")?
			.load()?;

		let layout = Arc::new(TileLayout::new(&config.output_path, config.tile_format));
		Ok(Pipeline {
			area,
			planner: Planner::new(config.step, config.border)?,
			driver: RenderDriver::new(renderer, config.render.options(), layout.clone()),
			splitter: TileSplitter::new(layout.clone()),
			limits: config.limits(),
			layout,
			config,
			show_progress: false,
		})
	}

	/// Draws progress bars on stderr while running.
	pub fn with_progress(mut self, show: bool) -> Self {
		self.show_progress = show;
		self
	}

	/// The loaded WGS84 extent.
	pub fn area(&self) -> &GeoBBox {
		&self.area
	}

	pub fn layout(&self) -> &TileLayout {
		&self.layout
	}

	pub fn plan_level(&self, level: u8) -> Result<ZoomPlan> {
		self.planner.plan(&self.area, level)
	}

	/// Processes all zoom levels in ascending order.
	pub async fn run(&self) -> Result<PipelineStats> {
		log::info!(
			"rendering levels {}..={} with {:?} into {:?}",
			self.config.start_z,
			self.config.end_z,
			self.driver.renderer_name(),
			self.layout.root()
		);
		let total = PipelineStats::default();
		for level in self.config.levels() {
			let stats = self.run_level(level).await?;
			total.merge(&stats);
		}
		log::info!("all done: {total}");
		Ok(total)
	}

	/// Renders all missing regional images of `level`, then splits them into tiles.
	#[context("Failed to process level {level}")]
	pub async fn run_level(&self, level: u8) -> Result<PipelineStats> {
		let plan = self.plan_level(level)?;
		log::info!(
			"zoom:{level}  step:{}  border:{}  tiles {}",
			self.config.step,
			self.config.border,
			plan.tile_bbox
		);
		log::info!("generating regional tiles... ({})", plan.describe());

		let stats = PipelineStats::default();
		let batch_count = plan.batches.len() as u64;

		let progress = get_progress_bar(&format!("render z{level}"), batch_count, !self.show_progress);
		stream::iter(plan.batches.iter().map(Ok))
			.try_for_each_concurrent(self.limits.cpu_bound, |batch| {
				let (stats, progress) = (&stats, &progress);
				async move {
					let outcome = self.driver.render(batch).await?;
					stats.record_render(outcome);
					log::info!(
						"{} {outcome} ({}/{batch_count})",
						TileLayout::regional_name(batch),
						stats.batches_rendered_or_skipped()
					);
					progress.inc(1);
					Ok::<_, anyhow::Error>(())
				}
			})
			.await?;
		progress.finish();

		log::info!("splitting regional tiles into {} tiles...", self.layout.scheme());
		let progress = get_progress_bar(&format!("split z{level}"), batch_count, !self.show_progress);
		let mut splits = stream::iter(plan.batches.iter().copied())
			.map(|batch| {
				let splitter = self.splitter.clone();
				tokio::task::spawn_blocking(move || splitter.split(&batch))
			})
			.buffer_unordered(self.limits.cpu_bound);
		while let Some(result) = splits.next().await {
			let outcome = result.context("split task failed")??;
			stats.record_split(&outcome);
			progress.inc(1);
		}
		progress.finish();

		log::info!("level {level}: {stats}");
		Ok(stats)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{area::AreaOfInterest, render::DebugRenderer};
	use assert_fs::TempDir;
	use tilewriter_core::TileScheme;

	fn config(dir: &TempDir) -> PipelineConfig {
		PipelineConfig {
			start_z: 2,
			end_z: 3,
			step: 2,
			border: 1,
			output_path: dir.path().to_path_buf(),
			area_of_interest: Some(AreaOfInterest::from("-10,-10,10,10")),
			tile_format: TileScheme::Google,
			workers: Some(2),
			..PipelineConfig::default()
		}
	}

	#[tokio::test]
	async fn runs_all_levels() -> Result<()> {
		let dir = TempDir::new()?;
		let pipeline = Pipeline::new(config(&dir).arc(), Box::new(DebugRenderer))?;

		// one batch of 2 x 2 tiles per level: [1,1,2,2] at z2 and [3,3,4,4] at z3
		let stats = pipeline.run().await?;
		assert_eq!(stats.rendered(), 2);
		assert_eq!(stats.tiles_written(), 8);
		assert!(dir.path().join("2/1/1.png").is_file());
		assert!(dir.path().join("3/4/4.png").is_file());
		assert!(dir.path().join("3_3_3_s2_b1.png").is_file());
		Ok(())
	}

	#[tokio::test]
	async fn second_run_reports_every_batch_as_skipped() -> Result<()> {
		let dir = TempDir::new()?;
		let pipeline = Pipeline::new(config(&dir).arc(), Box::new(DebugRenderer))?;
		pipeline.run().await?;

		let stats = pipeline.run().await?;
		assert_eq!(stats.rendered(), 0);
		assert_eq!(stats.render_skipped(), 2);
		assert_eq!(stats.batches_rendered_or_skipped(), 2);
		assert_eq!(stats.tiles_skipped(), 8);
		Ok(())
	}

	#[tokio::test]
	async fn configuration_errors_come_first() {
		let dir = TempDir::new().unwrap();
		let mut config = config(&dir);
		config.area_of_interest = Some(AreaOfInterest::from("10,10,10,20"));
		assert!(Pipeline::new(config.arc(), Box::new(DebugRenderer)).is_err());
		assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
	}
}
