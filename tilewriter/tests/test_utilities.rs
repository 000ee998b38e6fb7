#![allow(unused)]

use assert_cmd::{Command, cargo};
use byteorder::{BigEndian, LittleEndian, WriteBytesExt};
use std::path::{Path, PathBuf};
use tilewriter_core::{GeoBBox, MercatorBBox, TileBBox, mercator};

#[cfg(windows)]
pub const BINARY_NAME: &str = "tilewriter.exe";
#[cfg(not(windows))]
pub const BINARY_NAME: &str = "tilewriter";

/// Helper to create a Command for the tilewriter binary.
pub fn tilewriter_cmd() -> Command {
	Command::new(cargo::cargo_bin!())
}

/// A WGS84 box strictly inside the tile range `[x0, y0, x1, y1]` at `level`.
pub fn area_for_tiles(level: u8, x0: u32, y0: u32, x1: u32, y1: u32) -> GeoBBox {
	let m = TileBBox::from_min_and_max(level, x0, y0, x1, y1)
		.unwrap()
		.to_mercator_bbox();
	let inset = mercator::tile_size_meters(level) / 100.0;
	MercatorBBox::new(m.x_min + inset, m.y_min + inset, m.x_max - inset, m.y_max - inset).to_geo()
}

/// Writes the header of an empty polygon shapefile with the given extent.
pub fn write_shapefile(path: &Path, extent: [f64; 4]) {
	let mut header: Vec<u8> = Vec::new();
	header.write_i32::<BigEndian>(9994).unwrap();
	header.extend_from_slice(&[0; 20]);
	header.write_i32::<BigEndian>(50).unwrap();
	header.write_i32::<LittleEndian>(1000).unwrap();
	header.write_i32::<LittleEndian>(5).unwrap();
	for v in extent {
		header.write_f64::<LittleEndian>(v).unwrap();
	}
	header.extend_from_slice(&[0; 32]);
	std::fs::write(path, header).unwrap();
}

/// All files below `dir`, relative and sorted.
pub fn list_files(dir: &Path) -> Vec<String> {
	fn walk(base: &Path, dir: &Path, files: &mut Vec<String>) {
		for entry in std::fs::read_dir(dir).unwrap() {
			let path = entry.unwrap().path();
			if path.is_dir() {
				walk(base, &path, files);
			} else {
				files.push(path.strip_prefix(base).unwrap().to_string_lossy().replace('\\', "/"));
			}
		}
	}
	let mut files = Vec::new();
	walk(dir, dir, &mut files);
	files.sort();
	files
}
