use anyhow::Result;
use image::Rgba;
use serde::Deserialize;
use std::{fmt, str::FromStr};

/// An ordered set of named map layers, passed to the renderer with every request.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct LayerSet(Vec<String>);

impl LayerSet {
	pub fn new<S: Into<String>>(names: impl IntoIterator<Item = S>) -> LayerSet {
		LayerSet(names.into_iter().map(Into::into).collect())
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(String::as_str)
	}
}

impl FromStr for LayerSet {
	type Err = anyhow::Error;

	/// Parses a comma separated list, ignoring blanks.
	fn from_str(text: &str) -> Result<Self> {
		Ok(LayerSet::new(text.split(',').map(str::trim).filter(|s| !s.is_empty())))
	}
}

impl fmt::Display for LayerSet {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0.join(","))
	}
}

/// Everything about a render that does not depend on the batch.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderOptions {
	pub layers: LayerSet,
	pub dpi: f64,
	pub background: Rgba<u8>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parse_and_display() -> Result<()> {
		let layers: LayerSet = " water, roads ,,labels".parse()?;
		assert_eq!(layers.iter().collect::<Vec<_>>(), vec!["water", "roads", "labels"]);
		assert_eq!(layers.to_string(), "water,roads,labels");
		assert!("".parse::<LayerSet>()?.is_empty());
		Ok(())
	}
}
