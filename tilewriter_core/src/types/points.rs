/// A WGS84 position in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoPoint {
	/// Latitude in degrees, `-90..=90`.
	pub lat: f64,
	/// Longitude in degrees, `-180..=180`.
	pub lon: f64,
}

impl GeoPoint {
	pub fn new(lat: f64, lon: f64) -> GeoPoint {
		GeoPoint { lat, lon }
	}
}

/// A position on the Web Mercator plane (EPSG:3857) in meters, origin at the map center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MetersPoint {
	pub mx: f64,
	pub my: f64,
}

impl MetersPoint {
	pub fn new(mx: f64, my: f64) -> MetersPoint {
		MetersPoint { mx, my }
	}
}
