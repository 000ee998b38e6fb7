use super::RenderOptions;
use anyhow::Result;
use async_trait::async_trait;
use image::RgbaImage;
use tilewriter_core::MercatorBBox;

/// One call into a renderer: the projected rectangle and the size of the image to produce.
#[derive(Clone, Debug)]
pub struct RenderRequest<'a> {
	/// Rectangle in EPSG:3857 meters; may extend past the edge of the map.
	pub bbox: MercatorBBox,
	pub width: u32,
	pub height: u32,
	pub options: &'a RenderOptions,
}

/// A map rendering engine.
///
/// Implementations are not assumed to be reentrant; see [`RenderGate`](super::RenderGate).
#[async_trait]
pub trait MapRenderer: Send + Sync {
	fn name(&self) -> &str;

	/// Renders the request into an RGBA image of exactly `width × height` pixels.
	async fn render(&self, request: &RenderRequest<'_>) -> Result<RgbaImage>;
}
