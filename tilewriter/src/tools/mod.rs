pub mod plan;
pub mod render;
mod selection;

pub use selection::Selection;
