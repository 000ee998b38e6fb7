//! Sources of the region to tile. Only the extent of the area is used; the tile rectangle is
//! not clipped to its shape.

mod prj;
mod shapefile;

pub use prj::Crs;
pub use shapefile::read_shapefile_extent;

use anyhow::{Result, ensure};
use serde::Deserialize;
use std::{fmt, path::PathBuf};
use tilewriter_core::GeoBBox;
use tilewriter_derive::context;

/// Where the area of interest comes from.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(try_from = "String")]
pub enum AreaOfInterest {
	/// A literal WGS84 box.
	BBox(GeoBBox),
	/// The extent of an ESRI shapefile (`.shp`), in the CRS given by its `.prj` sibling.
	Shapefile(PathBuf),
}

impl AreaOfInterest {
	/// Returns the WGS84 extent, clamped to the Web Mercator latitude range.
	///
	/// # Errors
	/// Fails if the shapefile cannot be read, its CRS is unsupported or the extent is empty.
	#[context("Failed to load area of interest {}", self)]
	pub fn load(&self) -> Result<GeoBBox> {
		let mut bbox = match self {
			AreaOfInterest::BBox(bbox) => *bbox,
			AreaOfInterest::Shapefile(path) => read_shapefile_extent(path)?,
		};
		bbox.limit_to_mercator();
		ensure!(!bbox.is_empty(), "the extent {bbox:?} is empty");

		log::info!("area of interest: {bbox:?}");
		log::info!("width: {}°, height: {}°", bbox.width(), bbox.height());
		Ok(bbox)
	}
}

impl From<&str> for AreaOfInterest {
	/// A text that parses as `lon_min,lat_min,lon_max,lat_max` is a box, anything else a path.
	fn from(text: &str) -> Self {
		match text.parse::<GeoBBox>() {
			Ok(bbox) => AreaOfInterest::BBox(bbox),
			Err(_) => AreaOfInterest::Shapefile(PathBuf::from(text)),
		}
	}
}

impl TryFrom<String> for AreaOfInterest {
	type Error = anyhow::Error;

	fn try_from(text: String) -> Result<Self> {
		ensure!(!text.trim().is_empty(), "area_of_interest must not be empty");
		Ok(AreaOfInterest::from(text.trim()))
	}
}

impl fmt::Display for AreaOfInterest {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			AreaOfInterest::BBox(bbox) => write!(f, "[{}]", bbox.as_string_list()),
			AreaOfInterest::Shapefile(path) => write!(f, "{path:?}"),
		}
	}
}
