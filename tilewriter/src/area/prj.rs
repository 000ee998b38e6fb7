use anyhow::{Result, bail};

/// The coordinate reference systems a shapefile extent can be given in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Crs {
	/// Geographic WGS84 degrees (EPSG:4326).
	Wgs84,
	/// Spherical Web Mercator meters (EPSG:3857).
	WebMercator,
}

const WEB_MERCATOR_MARKERS: [&str; 6] = [
	"PSEUDO-MERCATOR",
	"PSEUDO_MERCATOR",
	"WEB_MERCATOR",
	"POPULAR VISUALISATION",
	"MERCATOR_AUXILIARY_SPHERE",
	"AUTHORITY[\"EPSG\",\"3857\"]",
];

impl Crs {
	/// Detects the CRS from the well-known text of a `.prj` file.
	///
	/// A top level `GEOGCS` is accepted only with a WGS84 datum. A `PROJCS` is accepted only if
	/// it is the spherical Web Mercator projection.
	pub fn from_wkt(wkt: &str) -> Result<Crs> {
		let wkt = wkt.trim();
		let upper = wkt.to_uppercase();

		if upper.is_empty() {
			return Ok(Crs::Wgs84);
		}

		if upper.starts_with("GEOGCS") {
			let datum = quoted_after(wkt, "DATUM[\"")
				.or_else(|| quoted_after(wkt, "GEOGCS[\""))
				.unwrap_or(wkt);
			if !is_wgs84(datum) {
				bail!("unsupported datum {datum}");
			}
			return Ok(Crs::Wgs84);
		}

		if upper.starts_with("PROJCS") {
			let compact: String = upper.chars().filter(|c| !c.is_whitespace()).collect();
			if WEB_MERCATOR_MARKERS
				.iter()
				.any(|marker| upper.contains(marker) || compact.contains(marker))
			{
				return Ok(Crs::WebMercator);
			}
			bail!("unsupported projection {}", projcs_name(wkt));
		}

		bail!("unrecognised CRS definition {:?}", wkt.chars().take(40).collect::<String>())
	}
}

fn projcs_name(wkt: &str) -> &str {
	quoted_after(wkt, "PROJECTION[\"").unwrap_or(wkt)
}

/// The quoted name following `key`, e.g. `DATUM["` in `DATUM["WGS_1984",…]`.
fn quoted_after<'a>(wkt: &'a str, key: &str) -> Option<&'a str> {
	let start = wkt.find(key)? + key.len();
	wkt[start..].split('"').next()
}

fn is_wgs84(name: &str) -> bool {
	let compact: String = name
		.chars()
		.filter(char::is_ascii_alphanumeric)
		.collect::<String>()
		.to_uppercase();
	compact.contains("WGS1984") || compact.contains("WGS84")
}
