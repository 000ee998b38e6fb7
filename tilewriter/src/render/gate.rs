use super::{MapRenderer, RenderRequest};
use anyhow::{Result, ensure};
use image::RgbaImage;
use tokio::sync::Mutex;

/// Serializes calls into a renderer: at most one render is in flight at any time.
pub struct RenderGate {
	renderer: Box<dyn MapRenderer>,
	lock: Mutex<()>,
}

impl RenderGate {
	pub fn new(renderer: Box<dyn MapRenderer>) -> RenderGate {
		RenderGate {
			renderer,
			lock: Mutex::new(()),
		}
	}

	pub fn name(&self) -> &str {
		self.renderer.name()
	}

	/// Waits for the gate, renders and checks the size of the returned image.
	pub async fn render(&self, request: &RenderRequest<'_>) -> Result<RgbaImage> {
		let image = {
			let _guard = self.lock.lock().await;
			self.renderer.render(request).await?
		};
		ensure!(
			image.dimensions() == (request.width, request.height),
			"renderer {:?} returned a {}x{} image, expected {}x{}",
			self.renderer.name(),
			image.width(),
			image.height(),
			request.width,
			request.height
		);
		Ok(image)
	}
}
