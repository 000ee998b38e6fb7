use crate::render::{LayerSet, RenderOptions};
use anyhow::{Result, ensure};
use image::Rgba;
use serde::Deserialize;

/// The rendering engines that can produce regional images.
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
	/// Draws the tile grid and a position marker per tile; needs no layers.
	#[default]
	Debug,
	/// Runs an external program that writes the regional image.
	Command,
}

/// An external renderer program and its argument templates.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CommandConfig {
	pub program: String,

	/// Arguments; the placeholders `{x_min}`, `{y_min}`, `{x_max}`, `{y_max}`, `{width}`,
	/// `{height}`, `{dpi}`, `{layers}` and `{output}` are replaced per render.
	#[serde(default)]
	pub args: Vec<String>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct RenderConfig {
	pub engine: EngineKind,

	/// Named map layers passed to the engine, in drawing order.
	pub layers: LayerSet,

	pub dpi: f64,

	/// Background colour as `[r, g, b, a]`.
	pub background: [u8; 4],

	pub command: Option<CommandConfig>,
}

impl Default for RenderConfig {
	fn default() -> Self {
		RenderConfig {
			engine: EngineKind::Debug,
			layers: LayerSet::default(),
			dpi: 95.0,
			background: [127, 127, 127, 0],
			command: None,
		}
	}
}

impl RenderConfig {
	pub fn validate(&self) -> Result<()> {
		ensure!(self.dpi.is_finite() && self.dpi > 0.0, "dpi ({}) must be positive", self.dpi);
		if self.engine == EngineKind::Command {
			ensure!(
				self.command.is_some(),
				"the command engine needs a `render.command` section"
			);
			ensure!(!self.layers.is_empty(), "the command engine needs at least one layer");
		}
		Ok(())
	}

	pub fn options(&self) -> RenderOptions {
		RenderOptions {
			layers: self.layers.clone(),
			dpi: self.dpi,
			background: Rgba(self.background),
		}
	}
}
