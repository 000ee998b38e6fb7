//! Terminal progress bar drawn to stderr.
//!
//! The line shows a message, a bar with sub-character precision, `pos/len`, the percentage,
//! the speed and the estimated remaining time.

use std::env;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

struct Inner {
	message: String,
	len: u64,
	pos: u64,
	start: Instant,
	hidden: bool,
}

impl Inner {
	fn redraw(&self) {
		if self.hidden {
			return;
		}
		let line = self.render_line(terminal_width());
		let mut stderr = io::stderr();
		let _ = write!(stderr, "\r\x1b[2K{line}");
		let _ = stderr.flush();
	}

	fn render_line(&self, total_width: usize) -> String {
		let len = self.len.max(1);
		let pos = self.pos.min(len);
		let elapsed = self.start.elapsed().as_secs_f64();
		let per_sec = if elapsed > 0.0 { pos as f64 / elapsed } else { 0.0 };
		let eta_secs = if per_sec > 0.0 {
			(len - pos) as f64 / per_sec
		} else {
			0.0
		};

		let percent = (pos as f64 * 100.0 / len as f64).floor() as u64;
		let right = format!(
			"▏{}/{} ({:>3}%) {:>5} {:>5}",
			self.pos,
			self.len,
			percent,
			format_rate(per_sec),
			format_eta(Duration::from_secs_f64(eta_secs))
		);

		let taken = self.message.chars().count() + right.chars().count() + 1;
		let bar_width = total_width.saturating_sub(taken).max(10);

		format!("{}▕{}{}", self.message, make_bar(pos, len, bar_width), right)
	}
}

/// A cloneable, thread-safe progress handle.
///
/// A hidden bar counts like a visible one but never draws.
#[derive(Clone)]
pub struct ProgressBar {
	inner: Arc<Mutex<Inner>>,
}

impl ProgressBar {
	/// Creates a bar with a message and a maximum value and draws it.
	pub fn new(message: &str, max_value: u64) -> ProgressBar {
		let progress = Self::build(message, max_value, false);
		progress.lock().redraw();
		progress
	}

	/// Creates a bar that never draws.
	pub fn new_hidden(max_value: u64) -> ProgressBar {
		Self::build("", max_value, true)
	}

	fn build(message: &str, len: u64, hidden: bool) -> ProgressBar {
		ProgressBar {
			inner: Arc::new(Mutex::new(Inner {
				message: message.to_string(),
				len,
				pos: 0,
				start: Instant::now(),
				hidden,
			})),
		}
	}

	fn lock(&self) -> MutexGuard<'_, Inner> {
		self.inner.lock().unwrap_or_else(PoisonError::into_inner)
	}

	/// Sets the absolute position, capped at the maximum.
	pub fn set_position(&self, value: u64) {
		let mut inner = self.lock();
		inner.pos = value.min(inner.len);
		inner.redraw();
	}

	/// Increments the position by `value`, capped at the maximum.
	pub fn inc(&self, value: u64) {
		let mut inner = self.lock();
		inner.pos = inner.pos.saturating_add(value).min(inner.len);
		inner.redraw();
	}

	pub fn position(&self) -> u64 {
		self.lock().pos
	}

	/// Sets the position to the maximum and ends the line.
	pub fn finish(&self) {
		let mut inner = self.lock();
		inner.pos = inner.len;
		inner.redraw();
		if !inner.hidden {
			let mut stderr = io::stderr();
			let _ = stderr.write_all(b"\n");
			let _ = stderr.flush();
		}
	}
}

fn terminal_width() -> usize {
	if let Ok(cols) = env::var("COLUMNS")
		&& let Ok(v) = cols.parse::<usize>()
	{
		return v.max(10);
	}
	80
}

fn make_bar(pos: u64, len: u64, width: usize) -> String {
	const PARTIALS: [char; 8] = [' ', '▏', '▎', '▍', '▌', '▋', '▊', '▉'];

	let exact = (pos as f64 / len.max(1) as f64).clamp(0.0, 1.0) * width as f64;
	let whole = (exact.floor() as usize).min(width);

	let mut bar = "█".repeat(whole);
	if whole < width {
		bar.push(PARTIALS[((exact - whole as f64) * 8.0).floor() as usize % 8]);
		bar.push_str(&" ".repeat(width - whole - 1));
	}
	bar
}

fn format_rate(per_sec: f64) -> String {
	if !per_sec.is_finite() {
		return "--/s".to_string();
	}
	let (value, unit) = match per_sec.abs() {
		v if v >= 1e9 => (per_sec / 1e9, "G"),
		v if v >= 1e6 => (per_sec / 1e6, "M"),
		v if v >= 1e3 => (per_sec / 1e3, "k"),
		_ => return format!("{per_sec:.0}/s"),
	};
	format!("{value:.1}{unit}/s")
}

fn format_eta(d: Duration) -> String {
	let total = d.as_secs();
	let (h, m, s) = (total / 3600, (total % 3600) / 60, total % 60);
	if h > 0 {
		format!("{h:02}:{m:02}:{s:02}")
	} else {
		format!("{m:02}:{s:02}")
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[test]
	fn bar_init() {
		let progress = ProgressBar::new("Test", 100);
		let inner = progress.lock();
		assert_eq!(inner.len, 100);
		assert_eq!(inner.message, "Test");
		assert!(!inner.hidden);
	}

	#[test]
	fn position_is_capped() {
		let progress = ProgressBar::new_hidden(100);
		progress.set_position(10);
		progress.inc(20);
		assert_eq!(progress.position(), 30);
		progress.inc(200);
		assert_eq!(progress.position(), 100);
	}

	#[test]
	fn clones_share_state() {
		let progress = ProgressBar::new_hidden(10);
		let clone = progress.clone();
		clone.inc(4);
		assert_eq!(progress.position(), 4);
		progress.finish();
		assert_eq!(clone.position(), 10);
	}

	#[test]
	fn line_layout() {
		let progress = ProgressBar::new_hidden(4);
		progress.set_position(2);
		let line = progress.lock().render_line(60);
		assert!(line.starts_with('▕'));
		assert!(line.contains("2/4 ( 50%)"));
	}

	#[rstest]
	#[case(0, 4, 4, "    ")]
	#[case(2, 4, 4, "██  ")]
	#[case(4, 4, 4, "████")]
	#[case(1, 16, 2, "▏ ")]
	fn bar_cells(#[case] pos: u64, #[case] len: u64, #[case] width: usize, #[case] expected: &str) {
		assert_eq!(make_bar(pos, len, width), expected);
	}

	#[rstest]
	#[case(0.0, "0/s")]
	#[case(999.0, "999/s")]
	#[case(1500.0, "1.5k/s")]
	#[case(2_500_000.0, "2.5M/s")]
	#[case(f64::INFINITY, "--/s")]
	fn rates(#[case] per_sec: f64, #[case] expected: &str) {
		assert_eq!(format_rate(per_sec), expected);
	}

	#[rstest]
	#[case(0, "00:00")]
	#[case(61, "01:01")]
	#[case(3725, "01:02:05")]
	fn etas(#[case] secs: u64, #[case] expected: &str) {
		assert_eq!(format_eta(Duration::from_secs(secs)), expected);
	}
}
