use crate::{GeoPoint, MercatorBBox, mercator};
use anyhow::{Result, ensure};
use std::{fmt::Debug, str::FromStr};
use tilewriter_derive::context;

/// A geographical bounding box (`GeoBBox`) represents a rectangular area on a map
/// defined by its minimum and maximum longitude (x) and latitude (y) coordinates in WGS84 degrees.
///
/// - `x_min` (west): Minimum longitude.
/// - `y_min` (south): Minimum latitude.
/// - `x_max` (east): Maximum longitude.
/// - `y_max` (north): Maximum latitude.
///
/// Boxes built with [`GeoBBox::new`] are validated. Boxes derived from padded tile ranges
/// (see [`mercator::tile_lat_lon_bounds`]) may extend beyond ±180°.
///
/// # Examples
/// ```
/// use tilewriter_core::GeoBBox;
///
/// let bbox = GeoBBox::new(-10.0, -5.0, 10.0, 5.0).unwrap();
/// assert_eq!(bbox.as_tuple(), (-10.0, -5.0, 10.0, 5.0));
///
/// let parsed: GeoBBox = "13.38,52.46,13.43,52.49".parse().unwrap();
/// assert_eq!(parsed.x_max, 13.43);
/// ```
#[derive(Clone, Copy, PartialEq)]
pub struct GeoBBox {
	pub x_min: f64,
	pub y_min: f64,
	pub x_max: f64,
	pub y_max: f64,
}

impl GeoBBox {
	/// Creates a new `GeoBBox` from `west, south, east, north`.
	///
	/// # Errors
	/// Returns an error if a value is not finite, lies outside the WGS84 range, or if a minimum
	/// exceeds its maximum.
	pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Result<GeoBBox> {
		GeoBBox {
			x_min,
			y_min,
			x_max,
			y_max,
		}
		.checked()
	}

	/// Clamps the latitudes *in place* to the limits of the Web Mercator projection
	/// (`±85.05112877980659°`) and the longitudes to `±180°`.
	///
	/// ```
	/// use tilewriter_core::GeoBBox;
	///
	/// let mut bbox = GeoBBox::new(-180.0, -90.0, 180.0, 90.0).unwrap();
	/// bbox.limit_to_mercator();
	/// assert_eq!(
	///     bbox.as_tuple(),
	///     (-180.0, -85.05112877980659, 180.0, 85.05112877980659)
	/// );
	/// ```
	pub fn limit_to_mercator(&mut self) {
		let lat = mercator::MAX_LATITUDE;
		self.x_min = self.x_min.clamp(-180.0, 180.0); // west
		self.y_min = self.y_min.clamp(-lat, lat); // south
		self.x_max = self.x_max.clamp(-180.0, 180.0); // east
		self.y_max = self.y_max.clamp(-lat, lat); // north
	}

	/// Width in degrees of longitude.
	#[must_use]
	pub fn width(&self) -> f64 {
		self.x_max - self.x_min
	}

	/// Height in degrees of latitude.
	#[must_use]
	pub fn height(&self) -> f64 {
		self.y_max - self.y_min
	}

	/// A box is empty when it has no area.
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.width() <= 0.0 || self.height() <= 0.0
	}

	/// The four corners, counter-clockwise starting in the south-west.
	#[must_use]
	pub fn corners(&self) -> [GeoPoint; 4] {
		[
			GeoPoint::new(self.y_min, self.x_min),
			GeoPoint::new(self.y_min, self.x_max),
			GeoPoint::new(self.y_max, self.x_max),
			GeoPoint::new(self.y_max, self.x_min),
		]
	}

	/// Returns the bounding box as `[west, south, east, north]`.
	#[must_use]
	pub fn as_array(&self) -> [f64; 4] {
		[self.x_min, self.y_min, self.x_max, self.y_max]
	}

	/// Returns the bounding box as a tuple `(x_min, y_min, x_max, y_max)`.
	#[must_use]
	pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
		(self.x_min, self.y_min, self.x_max, self.y_max)
	}

	/// Returns the bounding box as a string in the form `x_min,y_min,x_max,y_max`.
	///
	/// ```
	/// use tilewriter_core::GeoBBox;
	///
	/// let bbox = GeoBBox::new(-10.0, -5.0, 10.0, 5.5).unwrap();
	/// assert_eq!(bbox.as_string_list(), "-10,-5,10,5.5");
	/// ```
	#[must_use]
	pub fn as_string_list(&self) -> String {
		format!("{},{},{},{}", self.x_min, self.y_min, self.x_max, self.y_max)
	}

	/// Projects the corners onto the Web Mercator plane.
	///
	/// Latitudes are clamped to the valid Mercator range first.
	#[must_use]
	pub fn to_mercator(&self) -> MercatorBBox {
		let mut bbox = *self;
		bbox.limit_to_mercator();
		let sw = mercator::lat_lon_to_meters(bbox.y_min, bbox.x_min);
		let ne = mercator::lat_lon_to_meters(bbox.y_max, bbox.x_max);
		MercatorBBox::new(sw.mx, sw.my, ne.mx, ne.my)
	}

	fn checked(self) -> Result<Self> {
		ensure!(
			self.as_array().iter().all(|v| v.is_finite()),
			"all values of {self:?} must be finite"
		);
		ensure!(self.x_min >= -180., "x_min ({}) must be >= -180", self.x_min);
		ensure!(self.y_min >= -90., "y_min ({}) must be >= -90", self.y_min);
		ensure!(self.x_max <= 180., "x_max ({}) must be <= 180", self.x_max);
		ensure!(self.y_max <= 90., "y_max ({}) must be <= 90", self.y_max);
		ensure!(
			self.x_min <= self.x_max,
			"x_min ({}) must be <= x_max ({})",
			self.x_min,
			self.x_max
		);
		ensure!(
			self.y_min <= self.y_max,
			"y_min ({}) must be <= y_max ({})",
			self.y_min,
			self.y_max
		);
		Ok(self)
	}
}

impl Debug for GeoBBox {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"GeoBBox({}, {}, {}, {})",
			self.x_min, self.y_min, self.x_max, self.y_max
		)
	}
}

impl TryFrom<Vec<f64>> for GeoBBox {
	type Error = anyhow::Error;

	/// Builds a `GeoBBox` from exactly four values `[west, south, east, north]`.
	#[context("Failed to convert {input:?} to GeoBBox")]
	fn try_from(input: Vec<f64>) -> Result<Self> {
		ensure!(
			input.len() == 4,
			"GeoBBox must have 4 elements (x_min, y_min, x_max, y_max)"
		);
		GeoBBox::new(input[0], input[1], input[2], input[3])
	}
}

impl FromStr for GeoBBox {
	type Err = anyhow::Error;

	/// Parses `lon_min,lat_min,lon_max,lat_max`; commas, semicolons and spaces are all accepted
	/// as separators.
	#[context("Failed to parse bounding box {text:?}")]
	fn from_str(text: &str) -> Result<Self> {
		let values = text
			.split(&[' ', ',', ';'])
			.filter(|s| !s.is_empty())
			.map(|s| s.parse::<f64>().map_err(|e| anyhow::anyhow!("{s:?} is not a number: {e}")))
			.collect::<Result<Vec<f64>>>()?;
		GeoBBox::try_from(values)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use approx::assert_abs_diff_eq;
	use rstest::rstest;

	#[test]
	fn new_and_accessors() -> Result<()> {
		let bbox = GeoBBox::new(-10.0, -5.0, 10.0, 5.0)?;
		assert_eq!(bbox.width(), 20.0);
		assert_eq!(bbox.height(), 10.0);
		assert!(!bbox.is_empty());
		assert_eq!(format!("{bbox:?}"), "GeoBBox(-10, -5, 10, 5)");
		Ok(())
	}

	#[rstest]
	#[case([-181.0, 0.0, 0.0, 1.0], "x_min (-181) must be >= -180")]
	#[case([0.0, -91.0, 1.0, 1.0], "y_min (-91) must be >= -90")]
	#[case([0.0, 0.0, 181.0, 1.0], "x_max (181) must be <= 180")]
	#[case([0.0, 0.0, 1.0, 91.0], "y_max (91) must be <= 90")]
	#[case([2.0, 0.0, 1.0, 1.0], "x_min (2) must be <= x_max (1)")]
	#[case([0.0, 2.0, 1.0, 1.0], "y_min (2) must be <= y_max (1)")]
	#[case([f64::NAN, 0.0, 1.0, 1.0], "must be finite")]
	fn invalid_boxes(#[case] v: [f64; 4], #[case] message: &str) {
		let err = GeoBBox::new(v[0], v[1], v[2], v[3]).unwrap_err();
		assert!(err.to_string().contains(message), "{err}");
	}

	#[test]
	fn zero_area_is_empty() {
		assert!(GeoBBox::new(1.0, 1.0, 1.0, 2.0).unwrap().is_empty());
	}

	#[rstest]
	#[case("13.38,52.46,13.43,52.49", [13.38, 52.46, 13.43, 52.49])]
	#[case("-10 -5 10 5", [-10.0, -5.0, 10.0, 5.0])]
	#[case("-10;-5;10;5", [-10.0, -5.0, 10.0, 5.0])]
	fn parse_ok(#[case] text: &str, #[case] expected: [f64; 4]) {
		assert_eq!(text.parse::<GeoBBox>().unwrap().as_array(), expected);
	}

	#[rstest]
	#[case("1,2,3")]
	#[case("1,2,3,x")]
	#[case("")]
	fn parse_err(#[case] text: &str) {
		assert!(text.parse::<GeoBBox>().is_err());
	}

	#[test]
	fn corners_and_mercator() -> Result<()> {
		let bbox = GeoBBox::new(-180.0, -90.0, 180.0, 90.0)?;
		let corners = bbox.corners();
		assert_eq!(corners[0], GeoPoint::new(-90.0, -180.0));
		assert_eq!(corners[2], GeoPoint::new(90.0, 180.0));

		let m = bbox.to_mercator();
		assert_abs_diff_eq!(m.x_min, -mercator::ORIGIN_SHIFT, epsilon = 1e-6);
		assert_abs_diff_eq!(m.y_max, mercator::ORIGIN_SHIFT, epsilon = 1e-3);
		Ok(())
	}
}
