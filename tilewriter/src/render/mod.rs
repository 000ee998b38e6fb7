//! The rendering collaborator: given a projected rectangle and a pixel size, produce an image.

mod command;
mod debug;
mod gate;
mod options;
mod traits;

pub use command::CommandRenderer;
pub use debug::{DebugRenderer, MARKER_OFFSET, MARKER_SIZE, marker_color};
pub use gate::RenderGate;
pub use options::{LayerSet, RenderOptions};
pub use traits::{MapRenderer, RenderRequest};

use crate::config::{EngineKind, RenderConfig};
use anyhow::{Result, anyhow};

/// Creates the engine selected in the configuration.
pub fn build_renderer(config: &RenderConfig) -> Result<Box<dyn MapRenderer>> {
	Ok(match config.engine {
		EngineKind::Debug => Box::new(DebugRenderer),
		EngineKind::Command => {
			let command = config
				.command
				.as_ref()
				.ok_or_else(|| anyhow!("the command engine needs a `render.command` section"))?;
			Box::new(CommandRenderer::new(command))
		}
	})
}
