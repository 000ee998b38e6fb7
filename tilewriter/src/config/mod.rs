//! The immutable run configuration: defaults, YAML file and command line overrides.

mod pipeline_config;
mod render_config;

pub use pipeline_config::*;
pub use render_config::*;
