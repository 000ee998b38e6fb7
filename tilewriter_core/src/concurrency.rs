//! Worker counts for the two kinds of work in a tiling run.
//!
//! Splitting a regional image is CPU-bound (PNG decoding, cropping, encoding), while checking
//! which tiles already exist on disk is I/O-bound.
//!
//! ```
//! use tilewriter_core::ConcurrencyLimits;
//!
//! let limits = ConcurrencyLimits::default();
//! assert!(limits.io_bound >= limits.cpu_bound);
//!
//! let single = ConcurrencyLimits::new(0, 0);
//! assert_eq!((single.io_bound, single.cpu_bound), (1, 1));
//! ```

/// Upper bounds for concurrently running tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConcurrencyLimits {
	/// Concurrent file system probes, 3x CPU count by default.
	pub io_bound: usize,

	/// Concurrent image splits, 1x CPU count by default.
	pub cpu_bound: usize,
}

impl ConcurrencyLimits {
	/// Creates limits with custom values, each at least 1.
	pub fn new(io_bound: usize, cpu_bound: usize) -> Self {
		Self {
			io_bound: io_bound.max(1),
			cpu_bound: cpu_bound.max(1),
		}
	}

	/// Limits derived from an explicit worker count, as given on the command line.
	pub fn with_workers(workers: usize) -> Self {
		Self::new(workers * 3, workers)
	}
}

impl Default for ConcurrencyLimits {
	fn default() -> Self {
		Self::with_workers(num_cpus::get())
	}
}
