//! Progress reporting for long running stages.
//!
//! ```
//! use tilewriter_core::progress::*;
//!
//! let progress = get_progress_bar("rendering level 10", 100, false);
//! progress.inc(10);
//! progress.finish();
//! ```

mod progress_bar;

pub use progress_bar::ProgressBar;

/// Creates a progress bar drawn to stderr, or a hidden one if `quiet` is set.
#[must_use]
pub fn get_progress_bar(message: &str, max_value: u64, quiet: bool) -> ProgressBar {
	if quiet {
		ProgressBar::new_hidden(max_value)
	} else {
		ProgressBar::new(message, max_value)
	}
}
