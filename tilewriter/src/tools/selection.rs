use anyhow::Result;
use std::path::PathBuf;
use tilewriter::{
	area::AreaOfInterest,
	config::{EngineKind, PipelineConfig},
};
use tilewriter_core::TileScheme;

/// Options shared by `render` and `plan`. Flags override the values of the config file.
#[derive(clap::Args, Debug)]
pub struct Selection {
	/// YAML config file
	#[arg(long, short, value_name = "FILE", display_order = 0)]
	config: Option<PathBuf>,

	/// area of interest: a shapefile (*.shp) or a bounding box "lon_min,lat_min,lon_max,lat_max"
	#[arg(long, short, value_name = "AREA", allow_hyphen_values = true, display_order = 1)]
	area: Option<String>,

	/// minimum zoom level [default: 10]
	#[arg(long, value_name = "int", display_order = 1)]
	min_zoom: Option<u8>,

	/// maximum zoom level [default: 15]
	#[arg(long, value_name = "int", display_order = 1)]
	max_zoom: Option<u8>,

	/// tiles per edge of a regional image [default: 16]
	#[arg(long, value_name = "int", display_order = 2)]
	step: Option<u32>,

	/// padding tiles rendered around each regional image [default: 2]
	#[arg(long, value_name = "int", display_order = 2)]
	border: Option<u32>,

	/// output directory [default: .]
	#[arg(long, short, value_name = "DIR", display_order = 3)]
	output: Option<PathBuf>,

	/// row numbering of the tile files [default: tms]
	#[arg(long, value_enum, display_order = 3)]
	tile_format: Option<TileScheme>,

	/// rendering engine [default: debug]
	#[arg(long, value_enum, display_order = 4)]
	engine: Option<EngineKind>,

	/// comma separated list of map layers
	#[arg(long, value_name = "a,b,...", display_order = 4)]
	layers: Option<String>,

	/// number of concurrent split workers [default: number of CPUs]
	#[arg(long, value_name = "int", display_order = 4)]
	workers: Option<usize>,
}

impl Selection {
	/// Defaults, then the config file, then the flags; the result is validated.
	pub fn to_config(&self) -> Result<PipelineConfig> {
		let mut config = match &self.config {
			Some(path) => PipelineConfig::from_path(path)?,
			None => PipelineConfig::default(),
		};

		if let Some(area) = &self.area {
			log::trace!("parsing area argument: {area:?}");
			config.area_of_interest = Some(AreaOfInterest::try_from(area.clone())?);
		}
		if let Some(z) = self.min_zoom {
			config.start_z = z;
		}
		if let Some(z) = self.max_zoom {
			config.end_z = z;
		}
		if let Some(step) = self.step {
			config.step = step;
		}
		if let Some(border) = self.border {
			config.border = border;
		}
		if let Some(output) = &self.output {
			config.output_path.clone_from(output);
		}
		if let Some(scheme) = self.tile_format {
			config.tile_format = scheme;
		}
		if let Some(engine) = self.engine {
			config.render.engine = engine;
		}
		if let Some(layers) = &self.layers {
			config.render.layers = layers.parse()?;
		}
		if self.workers.is_some() {
			config.workers = self.workers;
		}

		config.validate()?;
		Ok(config)
	}
}
