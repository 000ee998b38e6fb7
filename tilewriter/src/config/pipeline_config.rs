use super::RenderConfig;
use crate::{area::AreaOfInterest, pipeline::check_batch_size};
use anyhow::{Context, Result, ensure};
use serde::Deserialize;
use std::{
	fs::File,
	io::{BufReader, Read},
	ops::RangeInclusive,
	path::{Path, PathBuf},
	sync::Arc,
};
use tilewriter_core::{ConcurrencyLimits, TileScheme, mercator};
use tilewriter_derive::context;

/// Everything a tiling run needs to know, built once before the first render.
///
/// ```yaml
/// start_z: 10
/// end_z: 15
/// step: 16
/// border: 2
/// output_path: tiles
/// area_of_interest: border.shp   # or "lon_min,lat_min,lon_max,lat_max"
/// tile_format: tms               # or google
/// render:
///   engine: command
///   layers: [water, roads]
///   command:
///     program: render-map
///     args: ["{x_min}", "{y_min}", "{x_max}", "{y_max}", "{width}", "{height}", "{output}"]
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct PipelineConfig {
	/// First zoom level (inclusive).
	pub start_z: u8,

	/// Last zoom level (inclusive).
	pub end_z: u8,

	/// Tiles per edge of a regional batch.
	pub step: u32,

	/// Padding tiles rendered around each batch and discarded after splitting.
	/// `0` is allowed but produces seams at batch boundaries.
	pub border: u32,

	/// Directory for the regional images and the `{z}/{x}/{y}.png` tree.
	pub output_path: PathBuf,

	pub area_of_interest: Option<AreaOfInterest>,

	/// Row numbering of the written tiles.
	pub tile_format: TileScheme,

	/// Number of concurrent split workers, defaults to the number of CPUs.
	pub workers: Option<usize>,

	pub render: RenderConfig,
}

impl Default for PipelineConfig {
	fn default() -> Self {
		PipelineConfig {
			start_z: 10,
			end_z: 15,
			step: 16,
			border: 2,
			output_path: PathBuf::from("."),
			area_of_interest: None,
			tile_format: TileScheme::Tms,
			workers: None,
			render: RenderConfig::default(),
		}
	}
}

impl PipelineConfig {
	pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
		Ok(serde_yaml_ng::from_reader(reader)?)
	}

	pub fn from_string(text: &str) -> Result<Self> {
		Ok(serde_yaml_ng::from_str(text)?)
	}

	/// Parses a YAML file. Relative paths inside it are resolved against the file's directory.
	#[context("Failed to read config file {path:?}")]
	pub fn from_path(path: &Path) -> Result<Self> {
		let file = File::open(path).context("opening file")?;
		let mut config = PipelineConfig::from_reader(BufReader::new(file))?;
		if let Some(base) = path.parent() {
			config.resolve_paths(base);
		}
		Ok(config)
	}

	pub fn resolve_paths(&mut self, base: &Path) {
		if self.output_path.is_relative() {
			self.output_path = base.join(&self.output_path);
		}
		if let Some(AreaOfInterest::Shapefile(path)) = &mut self.area_of_interest
			&& path.is_relative()
		{
			*path = base.join(&*path);
		}
	}

	/// Checks the configuration; all errors found here are reported before any rendering.
	#[context("Invalid configuration")]
	pub fn validate(&self) -> Result<()> {
		ensure!(
			self.start_z <= self.end_z,
			"start_z ({}) must be <= end_z ({})",
			self.start_z,
			self.end_z
		);
		ensure!(
			self.end_z <= mercator::MAX_LEVEL,
			"end_z ({}) must be <= {}",
			self.end_z,
			mercator::MAX_LEVEL
		);
		check_batch_size(self.step, self.border)?;

		ensure!(self.workers != Some(0), "workers must be at least 1");
		ensure!(self.area_of_interest.is_some(), "no area of interest configured");
		self.render.validate()
	}

	pub fn levels(&self) -> RangeInclusive<u8> {
		self.start_z..=self.end_z
	}

	pub fn limits(&self) -> ConcurrencyLimits {
		self.workers.map_or_else(ConcurrencyLimits::default, ConcurrencyLimits::with_workers)
	}

	pub fn arc(self) -> Arc<Self> {
		Arc::new(self)
	}
}
