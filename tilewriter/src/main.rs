mod tools;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};

/// Renders a geographic area of interest into a slippy map tile pyramid.
#[derive(Parser, Debug)]
#[command(
	author,
	version,
	about,
	long_about = None,
	propagate_version = true,
	disable_help_subcommand = true,
)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	#[command(flatten)]
	verbose: Verbosity<InfoLevel>,
}

#[derive(Subcommand, Debug)]
enum Commands {
	/// Render regional images and split them into tiles
	Render(tools::render::Subcommand),

	/// Show the regional batches of every zoom level without rendering
	Plan(tools::plan::Subcommand),
}

fn main() -> Result<()> {
	let cli = Cli::parse();

	env_logger::Builder::new()
		.filter_level(cli.verbose.log_level_filter())
		.format_timestamp(None)
		.init();

	run(cli)
}

fn run(cli: Cli) -> Result<()> {
	match &cli.command {
		Commands::Render(arguments) => tools::render::run(arguments),
		Commands::Plan(arguments) => tools::plan::run(arguments),
	}
}

#[cfg(test)]
mod tests {
	use crate::{Cli, run};
	use anyhow::Result;
	use clap::Parser;

	pub fn run_command(arg_vec: Vec<&str>) -> Result<String> {
		let cli = Cli::try_parse_from(arg_vec)?;
		let msg = format!("{cli:?}");
		run(cli)?;
		Ok(msg)
	}

	#[test]
	fn help() {
		let err = run_command(vec!["tilewriter"]).unwrap_err().to_string();
		assert!(err.starts_with("Renders a geographic area of interest into a slippy map tile pyramid."));
		assert!(err.contains("\nUsage: tilewriter [OPTIONS] <COMMAND>"));
	}

	#[test]
	fn version() {
		let err = run_command(vec!["tilewriter", "-V"]).unwrap_err().to_string();
		assert!(err.starts_with("tilewriter "));
	}

	#[test]
	fn render_without_area() {
		let err = run_command(vec!["tilewriter", "render"]).unwrap_err();
		assert!(format!("{err:?}").contains("no area of interest configured"));
	}

	#[test]
	fn plan_rejects_bad_tile_format() {
		let err = run_command(vec!["tilewriter", "plan", "--tile-format", "quadkey"]).unwrap_err();
		assert!(err.to_string().contains("invalid value 'quadkey'"));
	}
}
