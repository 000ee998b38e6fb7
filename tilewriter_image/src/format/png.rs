use anyhow::{Context, Result, anyhow, bail};
use image::{
	ImageEncoder, ImageFormat, RgbaImage,
	codecs::png::{CompressionType, FilterType, PngEncoder},
	load_from_memory_with_format,
};
use std::{fs, path::Path};
use tilewriter_core::io::write_atomic;
use tilewriter_derive::context;

/// Encodes an RGBA image as PNG.
///
/// `speed` ranges from 0 (smallest file) to 100 (fastest), default 10.
pub fn compress(image: &RgbaImage, speed: Option<u8>) -> Result<Vec<u8>> {
	if image.width() == 0 || image.height() == 0 {
		bail!("cannot encode an empty {}x{} image", image.width(), image.height());
	}

	let (compression_type, filter_type) = match speed.unwrap_or(10).clamp(0, 100) {
		0..20 => (CompressionType::Best, FilterType::Adaptive),
		20..60 => (CompressionType::Default, FilterType::Adaptive),
		60..90 => (CompressionType::Fast, FilterType::Avg),
		_ => (CompressionType::Fast, FilterType::NoFilter),
	};

	let mut buffer: Vec<u8> = Vec::new();
	PngEncoder::new_with_quality(&mut buffer, compression_type, filter_type).write_image(
		image.as_raw(),
		image.width(),
		image.height(),
		image::ExtendedColorType::Rgba8,
	)?;

	Ok(buffer)
}

/// Decodes PNG bytes into an RGBA image, converting other color types.
pub fn decompress(data: &[u8]) -> Result<RgbaImage> {
	load_from_memory_with_format(data, ImageFormat::Png)
		.map(|image| image.into_rgba8())
		.map_err(|e| anyhow!("Failed to decode PNG image: {e}"))
}

/// Reads and decodes a PNG file.
#[context("Failed to read PNG {path:?}")]
pub fn load(path: &Path) -> Result<RgbaImage> {
	let data = fs::read(path).context("reading file")?;
	decompress(&data)
}

/// Encodes `image` with the given `speed` (see [`compress`]) and writes it atomically to `path`.
#[context("Failed to save PNG {path:?}")]
pub fn save(path: &Path, image: &RgbaImage, speed: Option<u8>) -> Result<()> {
	write_atomic(path, &compress(image, speed)?)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::TestImage;
	use assert_fs::TempDir;
	use image::Rgba;
	use rstest::rstest;

	#[rstest]
	#[case::gradient(RgbaImage::new_test_gradient(256, 256))]
	#[case::transparent(RgbaImage::from_pixel(64, 32, Rgba([127, 127, 127, 0])))]
	#[case::tall(RgbaImage::new_test_gradient(3, 700))]
	fn png_is_lossless(#[case] img: RgbaImage) -> Result<()> {
		for speed in [Some(0), None, Some(100)] {
			let decoded = decompress(&compress(&img, speed)?)?;
			assert_eq!(decoded.dimensions(), img.dimensions());
			assert!(decoded.as_raw() == img.as_raw());
		}
		Ok(())
	}

	#[test]
	fn starts_with_png_signature() -> Result<()> {
		let data = compress(&RgbaImage::new_test_gradient(8, 8), None)?;
		assert_eq!(&data[..8], b"\x89PNG\r\n\x1a\n");
		Ok(())
	}

	#[test]
	fn empty_image_is_rejected() {
		assert!(compress(&RgbaImage::new(0, 10), None).is_err());
	}

	#[test]
	fn garbage_is_rejected() {
		let err = decompress(b"not a png").unwrap_err();
		assert!(err.to_string().starts_with("Failed to decode PNG image"));
	}

	#[test]
	fn save_and_load() -> Result<()> {
		let dir = TempDir::new()?;
		let path = dir.path().join("10/5/7.png");
		let img = RgbaImage::new_test_gradient(256, 256);
		save(&path, &img, None)?;
		assert!(load(&path)?.as_raw() == img.as_raw());
		assert!(load(&dir.path().join("missing.png")).is_err());
		Ok(())
	}
}
