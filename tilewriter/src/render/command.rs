//! A renderer that delegates to an external program.
//!
//! The program gets the render rectangle and image size through argument templates and writes a
//! PNG to the path given by `{output}`.

use super::{MapRenderer, RenderRequest};
use crate::config::CommandConfig;
use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use image::RgbaImage;
use std::path::{Path, PathBuf};
use tilewriter_image::format::png;
use tokio::process::Command;

#[derive(Debug)]
pub struct CommandRenderer {
	program: String,
	args: Vec<String>,
	temp_dir: PathBuf,
}

impl CommandRenderer {
	pub fn new(config: &CommandConfig) -> CommandRenderer {
		CommandRenderer {
			program: config.program.clone(),
			args: config.args.clone(),
			temp_dir: std::env::temp_dir(),
		}
	}

	/// Writes the program's output images to `dir` instead of the system temp directory.
	pub fn with_temp_dir(mut self, dir: &Path) -> Self {
		self.temp_dir = dir.to_path_buf();
		self
	}

	fn expand_args(&self, request: &RenderRequest<'_>, output: &Path) -> Vec<String> {
		let bbox = &request.bbox;
		let values = [
			("{x_min}", bbox.x_min.to_string()),
			("{y_min}", bbox.y_min.to_string()),
			("{x_max}", bbox.x_max.to_string()),
			("{y_max}", bbox.y_max.to_string()),
			("{width}", request.width.to_string()),
			("{height}", request.height.to_string()),
			("{dpi}", request.options.dpi.to_string()),
			("{layers}", request.options.layers.to_string()),
			("{output}", output.to_string_lossy().into_owned()),
		];
		self.args
			.iter()
			.map(|arg| {
				values
					.iter()
					.fold(arg.clone(), |arg, (key, value)| arg.replace(key, value))
			})
			.collect()
	}
}

#[async_trait]
impl MapRenderer for CommandRenderer {
	fn name(&self) -> &str {
		&self.program
	}

	async fn render(&self, request: &RenderRequest<'_>) -> Result<RgbaImage> {
		let output = self
			.temp_dir
			.join(format!("tilewriter-{}.png", uuid::Uuid::new_v4().simple()));
		let args = self.expand_args(request, &output);
		log::debug!("running {} {}", self.program, args.join(" "));

		let result = run(&self.program, &args, &output).await;
		let _ = tokio::fs::remove_file(&output).await;
		result
	}
}

async fn run(program: &str, args: &[String], output: &Path) -> Result<RgbaImage> {
	let out = Command::new(program)
		.args(args)
		.kill_on_drop(true)
		.output()
		.await
		.with_context(|| format!("failed to start {program:?}"))?;

	if !out.status.success() {
		bail!(
			"{program:?} failed with {}: {}",
			out.status,
			String::from_utf8_lossy(&out.stderr).trim()
		);
	}

	let data = tokio::fs::read(output)
		.await
		.with_context(|| format!("{program:?} did not write {output:?}"))?;
	png::decompress(&data)
}
