use super::Selection;
use anyhow::Result;
use std::io::IsTerminal;
use tilewriter::{pipeline::Pipeline, render::build_renderer};

#[derive(clap::Args, Debug)]
#[command(disable_version_flag = true)]
pub struct Subcommand {
	#[command(flatten)]
	selection: Selection,
}

#[tokio::main]
pub async fn run(arguments: &Subcommand) -> Result<()> {
	let config = arguments.selection.to_config()?.arc();
	eprintln!("render tiles into {:?}", config.output_path);

	let renderer = build_renderer(&config.render)?;
	let pipeline = Pipeline::new(config, renderer)?.with_progress(std::io::stderr().is_terminal());
	let stats = pipeline.run().await?;

	eprintln!("finished: {stats}");
	Ok(())
}
