use anyhow::{Result, ensure};
use image::{RgbaImage, imageops};
use tilewriter_core::mercator::TILE_SIZE;

/// Copies the `TILE_SIZE` square with its top-left corner at pixel `(x, y)` out of `image`.
///
/// # Errors
/// Returns an error if the square does not lie completely inside the image.
pub fn crop_tile(image: &RgbaImage, x: u32, y: u32) -> Result<RgbaImage> {
	let (width, height) = image.dimensions();
	ensure!(
		u64::from(x) + u64::from(TILE_SIZE) <= u64::from(width) && u64::from(y) + u64::from(TILE_SIZE) <= u64::from(height),
		"tile at pixel ({x}, {y}) exceeds the {width}x{height} image"
	);
	Ok(imageops::crop_imm(image, x, y, TILE_SIZE, TILE_SIZE).to_image())
}
