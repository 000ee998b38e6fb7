use super::Crs;
use anyhow::{Context, Result, ensure};
use byteorder::{BigEndian, LittleEndian, ReadBytesExt};
use std::{
	fs::{self, File},
	io::{BufReader, Seek, SeekFrom},
	path::Path,
};
use tilewriter_core::{GeoBBox, MercatorBBox, mercator};
use tilewriter_derive::context;

const FILE_CODE: i32 = 9994;
const HEADER_LENGTH: u64 = 100;

/// Reads the extent from the header of a `.shp` file and converts it to WGS84.
///
/// The CRS is read from the `.prj` file next to it; without one the extent is taken as WGS84.
#[context("Failed to read shapefile {path:?}")]
pub fn read_shapefile_extent(path: &Path) -> Result<GeoBBox> {
	let [x_min, y_min, x_max, y_max] = read_header_extent(path)?;
	ensure!(
		[x_min, y_min, x_max, y_max].iter().all(|v| v.is_finite()),
		"the extent in the header is not finite"
	);
	ensure!(x_min <= x_max && y_min <= y_max, "the extent in the header is inverted");

	let prj = path.with_extension("prj");
	let crs = if prj.exists() {
		let wkt = fs::read_to_string(&prj).with_context(|| format!("reading {prj:?}"))?;
		Crs::from_wkt(&wkt).with_context(|| format!("parsing {prj:?}"))?
	} else {
		log::debug!("no {prj:?}, assuming WGS84");
		Crs::Wgs84
	};
	log::debug!("shapefile extent {:?} in {crs:?}", [x_min, y_min, x_max, y_max]);

	Ok(match crs {
		Crs::Wgs84 => GeoBBox {
			x_min,
			y_min,
			x_max,
			y_max,
		},
		Crs::WebMercator => {
			let limit = |v: f64| v.clamp(-mercator::ORIGIN_SHIFT, mercator::ORIGIN_SHIFT);
			MercatorBBox::new(limit(x_min), limit(y_min), limit(x_max), limit(y_max)).to_geo()
		}
	})
}

fn read_header_extent(path: &Path) -> Result<[f64; 4]> {
	let file = File::open(path).context("opening file")?;
	let length = file.metadata()?.len();
	ensure!(
		length >= HEADER_LENGTH,
		"file is {length} bytes long, a shapefile header needs {HEADER_LENGTH}"
	);

	let mut reader = BufReader::new(file);
	let file_code = reader.read_i32::<BigEndian>()?;
	ensure!(
		file_code == FILE_CODE,
		"file code is {file_code}, expected {FILE_CODE}"
	);

	reader.seek(SeekFrom::Start(36))?;
	let mut extent = [0.0; 4];
	reader.read_f64_into::<LittleEndian>(&mut extent)?;
	Ok(extent)
}

/// Writes the 100 byte header of an empty shapefile with the given extent.
#[cfg(test)]
pub(crate) fn write_test_shapefile(path: &Path, extent: [f64; 4]) -> Result<()> {
	use byteorder::WriteBytesExt;

	let mut header: Vec<u8> = Vec::with_capacity(HEADER_LENGTH as usize);
	header.write_i32::<BigEndian>(FILE_CODE)?;
	header.extend_from_slice(&[0; 20]);
	header.write_i32::<BigEndian>(50)?; // length in 16 bit words
	header.write_i32::<LittleEndian>(1000)?; // version
	header.write_i32::<LittleEndian>(5)?; // polygon
	for v in extent {
		header.write_f64::<LittleEndian>(v)?;
	}
	header.extend_from_slice(&[0; 32]);
	assert_eq!(header.len() as u64, HEADER_LENGTH);
	fs::write(path, header)?;
	Ok(())
}
