//! The tiling pipeline: plan batches, render regional images, split them into tiles.
//!
//! Every stage skips work whose output file exists, so an interrupted run is resumed by running
//! it again.

mod driver;
mod layout;
mod orchestrator;
mod planner;
mod probe;
mod splitter;
mod stats;

pub use driver::RenderDriver;
pub use layout::TileLayout;
pub use orchestrator::Pipeline;
pub use planner::{Planner, RegionalBatch, ZoomPlan, check_batch_size};
pub use probe::{BatchStatus, probe_batches};
pub use splitter::TileSplitter;
pub use stats::{PipelineStats, RenderOutcome, SplitOutcome};
