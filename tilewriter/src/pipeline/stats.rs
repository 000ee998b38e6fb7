use std::{
	fmt,
	sync::atomic::{AtomicU64, Ordering},
};

/// Counters of a run, safe to update from concurrent tasks.
#[derive(Debug, Default)]
pub struct PipelineStats {
	rendered: AtomicU64,
	render_skipped: AtomicU64,
	tiles_written: AtomicU64,
	tiles_skipped: AtomicU64,
	regional_missing: AtomicU64,
}

/// What happened to one regional batch in the render stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderOutcome {
	Rendered,
	/// The regional image already existed.
	Skipped,
}

/// What happened to one regional batch in the split stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SplitOutcome {
	pub written: u64,
	pub skipped: u64,
	/// The regional image was needed but not found.
	pub missing: bool,
}

impl PipelineStats {
	pub fn record_render(&self, outcome: RenderOutcome) {
		match outcome {
			RenderOutcome::Rendered => self.rendered.fetch_add(1, Ordering::Relaxed),
			RenderOutcome::Skipped => self.render_skipped.fetch_add(1, Ordering::Relaxed),
		};
	}

	pub fn record_split(&self, outcome: &SplitOutcome) {
		self.tiles_written.fetch_add(outcome.written, Ordering::Relaxed);
		self.tiles_skipped.fetch_add(outcome.skipped, Ordering::Relaxed);
		if outcome.missing {
			self.regional_missing.fetch_add(1, Ordering::Relaxed);
		}
	}

	/// Adds the counters of `other` to `self`.
	pub fn merge(&self, other: &PipelineStats) {
		let pairs = [
			(&self.rendered, &other.rendered),
			(&self.render_skipped, &other.render_skipped),
			(&self.tiles_written, &other.tiles_written),
			(&self.tiles_skipped, &other.tiles_skipped),
			(&self.regional_missing, &other.regional_missing),
		];
		for (target, source) in pairs {
			target.fetch_add(source.load(Ordering::Relaxed), Ordering::Relaxed);
		}
	}

	/// Regional images rendered.
	pub fn rendered(&self) -> u64 {
		self.rendered.load(Ordering::Relaxed)
	}

	/// Regional images that already existed.
	pub fn render_skipped(&self) -> u64 {
		self.render_skipped.load(Ordering::Relaxed)
	}

	/// Batches that went through the render stage, rendered or skipped.
	pub fn batches_rendered_or_skipped(&self) -> u64 {
		self.rendered() + self.render_skipped()
	}

	pub fn tiles_written(&self) -> u64 {
		self.tiles_written.load(Ordering::Relaxed)
	}

	/// Tiles that already existed.
	pub fn tiles_skipped(&self) -> u64 {
		self.tiles_skipped.load(Ordering::Relaxed)
	}

	/// Regional images that were missing when their tiles were split.
	pub fn regional_missing(&self) -> u64 {
		self.regional_missing.load(Ordering::Relaxed)
	}
}

impl fmt::Display for RenderOutcome {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			RenderOutcome::Rendered => "rendered",
			RenderOutcome::Skipped => "exists, skipped",
		})
	}
}

impl fmt::Display for PipelineStats {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"regional images: {} rendered, {} skipped; tiles: {} written, {} skipped",
			self.rendered(),
			self.render_skipped(),
			self.tiles_written(),
			self.tiles_skipped()
		)?;
		if self.regional_missing() > 0 {
			write!(f, "; {} regional images missing", self.regional_missing())?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn record_and_merge() {
		let level = PipelineStats::default();
		level.record_render(RenderOutcome::Rendered);
		level.record_render(RenderOutcome::Skipped);
		level.record_render(RenderOutcome::Rendered);
		level.record_split(&SplitOutcome {
			written: 12,
			skipped: 4,
			missing: false,
		});
		level.record_split(&SplitOutcome {
			missing: true,
			..SplitOutcome::default()
		});

		let total = PipelineStats::default();
		total.merge(&level);
		total.merge(&level);

		assert_eq!(total.rendered(), 4);
		assert_eq!(total.render_skipped(), 2);
		assert_eq!(total.tiles_written(), 24);
		assert_eq!(total.tiles_skipped(), 8);
		assert_eq!(total.regional_missing(), 2);
		assert_eq!(
			level.to_string(),
			"regional images: 2 rendered, 1 skipped; tiles: 12 written, 4 skipped; 1 regional images missing"
		);
	}

	#[test]
	fn render_outcomes_per_batch() {
		let stats = PipelineStats::default();
		assert_eq!(stats.batches_rendered_or_skipped(), 0);
		for outcome in [RenderOutcome::Skipped, RenderOutcome::Rendered, RenderOutcome::Skipped] {
			stats.record_render(outcome);
		}
		assert_eq!(stats.batches_rendered_or_skipped(), 3);
		assert_eq!(RenderOutcome::Rendered.to_string(), "rendered");
		assert_eq!(RenderOutcome::Skipped.to_string(), "exists, skipped");
	}
}
