//! Spherical Web Mercator math for a 256 px tile grid.
//!
//! Converts between WGS84 degrees, projected meters (EPSG:3857) and tile indices.
//! Tile indices use XYZ numbering: tile `(0, 0)` is the north-west corner of the map and
//! `y` grows southwards. Use [`TileScheme`](crate::TileScheme) to convert to TMS.
//!
//! All functions are pure. Invalid input (a zoom level above 31, NaN or infinite coordinates)
//! is a programming error and panics.
//!
//! ```
//! use tilewriter_core::mercator;
//!
//! let meters = mercator::lat_lon_to_meters(52.52, 13.405);
//! let tile = mercator::meters_to_tile(meters.mx, meters.my, 10);
//! assert_eq!((tile.x, tile.y), (550, 335));
//! ```

use crate::{GeoBBox, GeoPoint, MercatorBBox, MetersPoint, TileCoord};
use std::f64::consts::PI;

/// Edge length of a tile in pixels.
pub const TILE_SIZE: u32 = 256;

/// WGS84 semi-major axis, used as the sphere radius.
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Half the circumference of the projection sphere, i.e. the extent of the plane in each direction.
pub const ORIGIN_SHIFT: f64 = PI * EARTH_RADIUS;

/// Latitude at which the projected plane becomes square.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Highest supported zoom level.
pub const MAX_LEVEL: u8 = 31;

fn assert_level(level: u8) {
	assert!(level <= MAX_LEVEL, "level ({level}) must be <= {MAX_LEVEL}");
}

fn assert_finite(a: f64, b: f64) {
	assert!(a.is_finite() && b.is_finite(), "coordinates ({a}, {b}) must be finite");
}

/// Number of tiles along one axis at `level`.
pub fn tile_count(level: u8) -> u64 {
	assert_level(level);
	1u64 << level
}

/// Edge length of one tile in meters at `level`.
pub fn tile_size_meters(level: u8) -> f64 {
	2.0 * ORIGIN_SHIFT / tile_count(level) as f64
}

/// Meters per pixel at `level`.
pub fn resolution(level: u8) -> f64 {
	tile_size_meters(level) / f64::from(TILE_SIZE)
}

/// Projects WGS84 degrees onto the Web Mercator plane.
pub fn lat_lon_to_meters(lat: f64, lon: f64) -> MetersPoint {
	assert_finite(lat, lon);
	let mx = lon * ORIGIN_SHIFT / 180.0;
	let my = ((90.0 + lat) * PI / 360.0).tan().ln() / (PI / 180.0);
	MetersPoint::new(mx, my * ORIGIN_SHIFT / 180.0)
}

/// Inverse of [`lat_lon_to_meters`].
pub fn meters_to_lat_lon(mx: f64, my: f64) -> GeoPoint {
	assert_finite(mx, my);
	let lon = mx / ORIGIN_SHIFT * 180.0;
	let lat = my / ORIGIN_SHIFT * 180.0;
	let lat = 180.0 / PI * (2.0 * (lat * PI / 180.0).exp().atan() - PI / 2.0);
	GeoPoint::new(lat, lon)
}

/// Returns the tile containing the projected point at `level`.
///
/// Indices are floored. Points on or beyond the edge of the plane (longitude 180°,
/// latitudes beyond ±85.0511°) are clamped into the grid.
pub fn meters_to_tile(mx: f64, my: f64, level: u8) -> TileCoord {
	assert_finite(mx, my);
	let size = tile_size_meters(level);
	let max = (tile_count(level) - 1) as f64;
	let x = ((mx + ORIGIN_SHIFT) / size).floor().clamp(0.0, max);
	let y = ((ORIGIN_SHIFT - my) / size).floor().clamp(0.0, max);
	TileCoord {
		level,
		x: x as u32,
		y: y as u32,
	}
}

/// Returns the tile containing the WGS84 position at `level`.
pub fn lat_lon_to_tile(lat: f64, lon: f64, level: u8) -> TileCoord {
	let m = lat_lon_to_meters(lat, lon);
	meters_to_tile(m.mx, m.my, level)
}

/// Projected bounds of tile `(x, y)` at `level`.
///
/// The indices may lie outside the grid (for example in the padding around a batch at the edge
/// of the map); the bounds are then extrapolated linearly.
pub fn tile_bounds(x: i64, y: i64, level: u8) -> MercatorBBox {
	let size = tile_size_meters(level);
	let x_min = -ORIGIN_SHIFT + x as f64 * size;
	let y_max = ORIGIN_SHIFT - y as f64 * size;
	MercatorBBox::new(x_min, y_max - size, x_min + size, y_max)
}

/// Geographic bounds of tile `(x, y)` at `level`, extrapolated like [`tile_bounds`].
pub fn tile_lat_lon_bounds(x: i64, y: i64, level: u8) -> GeoBBox {
	tile_bounds(x, y, level).to_geo()
}

#[cfg(test)]
mod tests {
	use super::*;
	use approx::assert_abs_diff_eq;
	use rstest::rstest;

	#[test]
	fn constants() {
		assert_abs_diff_eq!(ORIGIN_SHIFT, 20_037_508.342_789_244, epsilon = 1e-6);
		assert_abs_diff_eq!(resolution(0), 156_543.033_928_041, epsilon = 1e-6);
		assert_abs_diff_eq!(lat_lon_to_meters(MAX_LATITUDE, 180.0).my, ORIGIN_SHIFT, epsilon = 1e-3);
	}

	#[rstest]
	#[case(0.0, 0.0)]
	#[case(52.52, 13.405)]
	#[case(-33.8688, 151.2093)]
	#[case(40.7128, -74.006)]
	#[case(85.0, -180.0)]
	#[case(-85.0, 180.0)]
	#[case(1e-9, -1e-9)]
	fn projection_round_trip(#[case] lat: f64, #[case] lon: f64) {
		let m = lat_lon_to_meters(lat, lon);
		let p = meters_to_lat_lon(m.mx, m.my);
		assert_abs_diff_eq!(p.lat, lat, epsilon = 1e-9);
		assert_abs_diff_eq!(p.lon, lon, epsilon = 1e-9);
	}

	#[test]
	fn projection_round_trip_grid() {
		for lat in (-85..=85).step_by(5) {
			for lon in (-180..=180).step_by(15) {
				let (lat, lon) = (f64::from(lat), f64::from(lon));
				let m = lat_lon_to_meters(lat, lon);
				let p = meters_to_lat_lon(m.mx, m.my);
				assert_abs_diff_eq!(p.lat, lat, epsilon = 1e-9);
				assert_abs_diff_eq!(p.lon, lon, epsilon = 1e-9);
			}
		}
	}

	#[rstest]
	#[case(0, 0.0, 0.0, 0, 0)]
	#[case(1, 10.0, 10.0, 1, 0)]
	#[case(1, -10.0, -10.0, 0, 1)]
	#[case(10, 52.52, 13.405, 550, 335)]
	#[case(16, 40.7128, -74.006, 19295, 24640)]
	#[case(3, 90.0, -180.0, 0, 0)]
	#[case(3, -90.0, 180.0, 7, 7)]
	fn tile_of_position(#[case] level: u8, #[case] lat: f64, #[case] lon: f64, #[case] x: u32, #[case] y: u32) {
		let tile = lat_lon_to_tile(lat.clamp(-MAX_LATITUDE, MAX_LATITUDE), lon, level);
		assert_eq!(tile, TileCoord::new(level, x, y).unwrap());
	}

	#[test]
	fn north_west_corner_is_origin() {
		let bounds = tile_bounds(0, 0, 4);
		assert_abs_diff_eq!(bounds.x_min, -ORIGIN_SHIFT, epsilon = 1e-6);
		assert_abs_diff_eq!(bounds.y_max, ORIGIN_SHIFT, epsilon = 1e-6);
		let geo = tile_lat_lon_bounds(0, 0, 4);
		assert_abs_diff_eq!(geo.x_min, -180.0, epsilon = 1e-9);
		assert_abs_diff_eq!(geo.y_max, MAX_LATITUDE, epsilon = 1e-9);
	}

	#[test]
	fn tile_contains_its_center() {
		for level in [0u8, 1, 5, 10, 17] {
			let max = tile_count(level) as i64 - 1;
			for (x, y) in [(0, 0), (max, max), (max / 2, max / 3), (max / 7, max)] {
				let geo = tile_lat_lon_bounds(x, y, level);
				let sw = lat_lon_to_meters(geo.y_min, geo.x_min);
				let ne = lat_lon_to_meters(geo.y_max, geo.x_max);
				let center = MetersPoint::new((sw.mx + ne.mx) / 2.0, (sw.my + ne.my) / 2.0);
				let bounds = tile_bounds(x, y, level);
				assert!(bounds.contains(&center), "center of tile {x},{y} at {level}");
				let tile = meters_to_tile(center.mx, center.my, level);
				assert_eq!((i64::from(tile.x), i64::from(tile.y)), (x, y));
			}
		}
	}

	#[test]
	fn bounds_extrapolate_beyond_grid() {
		let inside = tile_bounds(0, 0, 2);
		let outside = tile_bounds(-1, -1, 2);
		let size = tile_size_meters(2);
		assert_abs_diff_eq!(outside.x_min, inside.x_min - size, epsilon = 1e-6);
		assert_abs_diff_eq!(outside.y_max, inside.y_max + size, epsilon = 1e-6);

		let geo = tile_lat_lon_bounds(4, 0, 2);
		assert_abs_diff_eq!(geo.x_min, 180.0, epsilon = 1e-9);
		assert_abs_diff_eq!(geo.x_max, 270.0, epsilon = 1e-9);
	}

	#[test]
	fn neighbouring_tiles_share_edges() {
		let a = tile_bounds(5, 9, 6);
		let b = tile_bounds(6, 10, 6);
		assert_abs_diff_eq!(a.x_max, b.x_min, epsilon = 1e-6);
		assert_abs_diff_eq!(a.y_min, b.y_max, epsilon = 1e-6);
	}

	#[test]
	#[should_panic(expected = "must be finite")]
	fn nan_is_rejected() {
		let _ = lat_lon_to_meters(f64::NAN, 0.0);
	}

	#[test]
	#[should_panic(expected = "must be <= 31")]
	fn level_is_limited() {
		let _ = tile_bounds(0, 0, 32);
	}
}
