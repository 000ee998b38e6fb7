use crate::{GeoBBox, MetersPoint, mercator};
use std::fmt::{self, Debug};

/// A rectangle on the Web Mercator plane (EPSG:3857) in meters.
///
/// Unlike [`GeoBBox`] this box is not limited to the valid extent of the projection: the render
/// rectangle of a batch at the edge of the map extends past it.
#[derive(Clone, Copy, PartialEq)]
pub struct MercatorBBox {
	pub x_min: f64,
	pub y_min: f64,
	pub x_max: f64,
	pub y_max: f64,
}

impl MercatorBBox {
	pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> MercatorBBox {
		MercatorBBox {
			x_min,
			y_min,
			x_max,
			y_max,
		}
	}

	#[must_use]
	pub fn width(&self) -> f64 {
		self.x_max - self.x_min
	}

	#[must_use]
	pub fn height(&self) -> f64 {
		self.y_max - self.y_min
	}

	/// Returns `true` if the point lies inside the box or on its edge.
	#[must_use]
	pub fn contains(&self, point: &MetersPoint) -> bool {
		(self.x_min..=self.x_max).contains(&point.mx) && (self.y_min..=self.y_max).contains(&point.my)
	}

	/// Returns the smallest box covering both `self` and `other`.
	#[must_use]
	pub fn union(&self, other: &MercatorBBox) -> MercatorBBox {
		MercatorBBox::new(
			self.x_min.min(other.x_min),
			self.y_min.min(other.y_min),
			self.x_max.max(other.x_max),
			self.y_max.max(other.y_max),
		)
	}

	/// Converts the corners back to WGS84 degrees without clamping.
	#[must_use]
	pub fn to_geo(&self) -> GeoBBox {
		let sw = mercator::meters_to_lat_lon(self.x_min, self.y_min);
		let ne = mercator::meters_to_lat_lon(self.x_max, self.y_max);
		GeoBBox {
			x_min: sw.lon,
			y_min: sw.lat,
			x_max: ne.lon,
			y_max: ne.lat,
		}
	}

	#[must_use]
	pub fn as_array(&self) -> [f64; 4] {
		[self.x_min, self.y_min, self.x_max, self.y_max]
	}
}

impl Debug for MercatorBBox {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"MercatorBBox({:.2}, {:.2}, {:.2}, {:.2})",
			self.x_min, self.y_min, self.x_max, self.y_max
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use approx::assert_abs_diff_eq;

	#[test]
	fn size_and_contains() {
		let bbox = MercatorBBox::new(-10.0, -20.0, 30.0, 40.0);
		assert_eq!(bbox.width(), 40.0);
		assert_eq!(bbox.height(), 60.0);
		assert!(bbox.contains(&MetersPoint::new(0.0, 0.0)));
		assert!(bbox.contains(&MetersPoint::new(30.0, 40.0)));
		assert!(!bbox.contains(&MetersPoint::new(30.1, 0.0)));
	}

	#[test]
	fn union_covers_both() {
		let a = MercatorBBox::new(0.0, 0.0, 1.0, 1.0);
		let b = MercatorBBox::new(-1.0, 0.5, 0.5, 3.0);
		assert_eq!(a.union(&b).as_array(), [-1.0, 0.0, 1.0, 3.0]);
	}

	#[test]
	fn full_plane_to_geo() {
		let os = mercator::ORIGIN_SHIFT;
		let geo = MercatorBBox::new(-os, -os, os, os).to_geo();
		assert_abs_diff_eq!(geo.x_min, -180.0, epsilon = 1e-9);
		assert_abs_diff_eq!(geo.y_min, -mercator::MAX_LATITUDE, epsilon = 1e-9);
		assert_abs_diff_eq!(geo.x_max, 180.0, epsilon = 1e-9);
		assert_abs_diff_eq!(geo.y_max, mercator::MAX_LATITUDE, epsilon = 1e-9);
	}

	#[test]
	fn debug_format() {
		let bbox = MercatorBBox::new(1.0, 2.0, 3.5, 4.25);
		assert_eq!(format!("{bbox:?}"), "MercatorBBox(1.00, 2.00, 3.50, 4.25)");
	}
}
