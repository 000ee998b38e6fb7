use super::Selection;
use anyhow::{Context, Result};
use std::{fmt::Write, sync::Arc};
use tilewriter::{
	config::PipelineConfig,
	pipeline::{Planner, TileLayout, probe_batches},
};

#[derive(clap::Args, Debug)]
#[command(disable_version_flag = true)]
pub struct Subcommand {
	#[command(flatten)]
	selection: Selection,
}

#[tokio::main]
pub async fn run(arguments: &Subcommand) -> Result<()> {
	let config = arguments.selection.to_config()?;
	print!("{}", report(&config).await?);
	Ok(())
}

/// Lists every batch of every level with its file name, render rectangle and state on disk.
async fn report(config: &PipelineConfig) -> Result<String> {
	let area = config
		.area_of_interest
		.as_ref()
		.context("no area of interest configured")?
		.load()?;
	let planner = Planner::new(config.step, config.border)?;
	let layout = Arc::new(TileLayout::new(&config.output_path, config.tile_format));

	let mut text = String::new();
	writeln!(text, "area of interest: {area:?}")?;
	for level in config.levels() {
		let plan = planner.plan(&area, level)?;
		let status = probe_batches(layout.clone(), &plan.batches, config.limits().io_bound).await?;

		writeln!(text, "level {level}: tiles {} ({})", plan.tile_bbox, plan.describe())?;
		for (batch, status) in plan.batches.iter().zip(status) {
			let state = if status.is_complete(batch) {
				"done"
			} else if status.regional_exists {
				"rendered"
			} else {
				"pending"
			};
			writeln!(
				text,
				"  {}  tiles {}  {}px  {:?}  {state}",
				TileLayout::regional_name(batch),
				batch.tiles(),
				batch.image_size(),
				batch.render_bbox()
			)?;
		}
	}
	Ok(text)
}
