use crate::symbol::MAX_MERGES;
use std::f64::consts::FRAC_1_SQRT_2;

/// Knobs for a training run.
///
/// Defaults match the reference configuration: at most 65000 merges, a
/// checkpoint every 1000 steps, compaction once live pairs fall below
/// 1/√2 of the allocated slots, and a progress line every 100 steps.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainerConfig {
    /// Upper bound on merge steps. Clamped to the 16-bit symbol space.
    pub max_merges: usize,
    /// Steps between periodic checkpoints; 0 keeps only the final one.
    pub checkpoint_interval: usize,
    /// Compact when live pairs drop below this fraction of capacity.
    pub compaction_ratio: f64,
    /// Steps between progress log lines; 0 disables them.
    pub progress_interval: usize,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            max_merges: 65_000,
            checkpoint_interval: 1_000,
            compaction_ratio: FRAC_1_SQRT_2,
            progress_interval: 100,
        }
    }
}

impl TrainerConfig {
    pub fn with_max_merges(mut self, max_merges: usize) -> Self {
        self.max_merges = max_merges;
        self
    }

    pub fn with_checkpoint_interval(mut self, interval: usize) -> Self {
        self.checkpoint_interval = interval;
        self
    }

    pub fn with_compaction_ratio(mut self, ratio: f64) -> Self {
        self.compaction_ratio = ratio;
        self
    }

    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Merge bound actually enforced, after clamping to the symbol space.
    pub fn effective_max_merges(&self) -> usize {
        self.max_merges.min(MAX_MERGES)
    }
}
