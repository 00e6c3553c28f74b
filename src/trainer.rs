use crate::config::TrainerConfig;
use crate::histogram::{PairHistogram, Selection};
use crate::merge::replace_pair;
use crate::sequence::Sequence;
use crate::symbol::{Pair, Symbol, MAX_MERGES};
use crate::thesaurus::Thesaurus;
use log::{debug, info, warn};
use std::convert::Infallible;

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// No pair occurs more than once.
    Converged,
    /// The merge bound was reached while pairs still repeat.
    Bounded,
}

/// One completed merge step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeRecord {
    /// 1-based step number.
    pub step: usize,
    pub pair: Pair,
    pub symbol: Symbol,
    /// Histogram count of `pair` when it was selected.
    pub count: usize,
    /// Occurrences actually rewritten.
    pub replaced: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Merged(MergeRecord),
    Stopped(Termination),
}

/// Drives BPE training over one corpus.
///
/// Owns the sequence, the pair histogram and the vocabulary for the whole
/// run. The histogram is built once here and only patched afterwards.
///
/// # Example
///
/// ```
/// use bytepair_rs::{Termination, Trainer, TrainerConfig};
///
/// let mut trainer = Trainer::new(b"aaa", TrainerConfig::default());
/// let stats = trainer.train();
///
/// assert_eq!(stats.termination, Some(Termination::Converged));
/// assert_eq!(trainer.sequence().tokens().collect::<Vec<_>>(), vec![256, 97]);
/// assert_eq!(trainer.thesaurus().expand(256), Some(&b"aa"[..]));
/// ```
#[derive(Debug, Clone)]
pub struct Trainer {
    sequence: Sequence,
    histogram: PairHistogram,
    thesaurus: Thesaurus,
    config: TrainerConfig,
    max_merges: usize,
    steps: usize,
    compactions: usize,
    input_length: usize,
    termination: Option<Termination>,
}

impl Trainer {
    /// Loads `corpus` into a fresh sequence and counts its pairs.
    pub fn new(corpus: &[u8], config: TrainerConfig) -> Self {
        let max_merges = config.effective_max_merges();
        if max_merges < config.max_merges {
            warn!(
                "max_merges {} exceeds the symbol space, using {}",
                config.max_merges, MAX_MERGES
            );
        }

        let sequence = Sequence::from_bytes(corpus);
        let histogram = PairHistogram::build(&sequence);
        info!(
            "Counted {} distinct pairs over {} symbols",
            histogram.len(),
            sequence.live_len()
        );

        Self {
            sequence,
            histogram,
            thesaurus: Thesaurus::new(),
            config,
            max_merges,
            steps: 0,
            compactions: 0,
            input_length: corpus.len(),
            termination: None,
        }
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    pub fn histogram(&self) -> &PairHistogram {
        &self.histogram
    }

    pub fn thesaurus(&self) -> &Thesaurus {
        &self.thesaurus
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Completed merge steps.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Id the next merge will allocate.
    pub fn next_symbol(&self) -> Symbol {
        self.thesaurus.next_symbol()
    }

    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }

    /// Performs one merge, or reports why no further merge happens.
    ///
    /// Once stopped, every further call returns the same outcome.
    pub fn step(&mut self) -> StepOutcome {
        if let Some(termination) = self.termination {
            return StepOutcome::Stopped(termination);
        }
        if self.steps >= self.max_merges {
            return self.stop(Termination::Bounded);
        }

        let selection = match self.histogram.select() {
            Some(selection) if selection.count > 1 => selection,
            _ => return self.stop(Termination::Converged),
        };

        self.maybe_compact(selection.total);

        let step = self.steps + 1;
        let symbol = self.thesaurus.next_symbol();
        if self.config.progress_interval > 0 && step % self.config.progress_interval == 0 {
            info!(
                "Step {}: n={} {} -> {}",
                step, selection.count, selection.pair, symbol
            );
        }

        let Selection { pair, count, .. } = selection;
        let replaced = replace_pair(&mut self.sequence, &mut self.histogram, pair, symbol);
        let defined = self.thesaurus.define(pair);
        debug_assert_eq!(defined, symbol);
        self.steps = step;

        StepOutcome::Merged(MergeRecord {
            step,
            pair,
            symbol,
            count,
            replaced,
        })
    }

    fn stop(&mut self, termination: Termination) -> StepOutcome {
        self.termination = Some(termination);
        StepOutcome::Stopped(termination)
    }

    /// Squeezes holes out once live pairs fall below the configured share of capacity.
    fn maybe_compact(&mut self, live_pairs: usize) {
        let capacity = self.sequence.capacity();
        if (live_pairs as f64) >= capacity as f64 * self.config.compaction_ratio {
            return;
        }

        let reclaimed = self.sequence.compact();
        let evicted = self.histogram.evict_zeros();
        self.compactions += 1;
        debug!(
            "Compacted {} -> {} slots, evicted {} spent pairs",
            capacity,
            self.sequence.capacity(),
            evicted
        );
        debug_assert_eq!(capacity - reclaimed, self.sequence.capacity());
    }

    /// Merges until convergence or the merge bound.
    ///
    /// `checkpoint` runs after every `checkpoint_interval`-th merge and once
    /// more after the loop ends. Its first error aborts the run.
    pub fn run<E, F>(&mut self, mut checkpoint: F) -> Result<TrainStats, E>
    where
        F: FnMut(&Sequence) -> Result<(), E>,
    {
        let interval = self.config.checkpoint_interval;

        let termination = loop {
            match self.step() {
                StepOutcome::Merged(record) => {
                    if interval > 0 && record.step % interval == 0 {
                        checkpoint(&self.sequence)?;
                    }
                }
                StepOutcome::Stopped(termination) => break termination,
            }
        };

        checkpoint(&self.sequence)?;

        let stats = self.stats();
        info!(
            "{:?} after {} merges: {} bytes -> {} tokens ({:.2}%)",
            termination,
            stats.merges,
            stats.input_length,
            stats.live_tokens,
            stats.compression_ratio()
        );
        Ok(stats)
    }

    /// Runs to completion without checkpoints.
    pub fn train(&mut self) -> TrainStats {
        match self.run(|_| Ok::<(), Infallible>(())) {
            Ok(stats) => stats,
            Err(never) => match never {},
        }
    }

    pub fn stats(&self) -> TrainStats {
        TrainStats {
            input_length: self.input_length,
            live_tokens: self.sequence.live_len(),
            merges: self.steps,
            vocabulary_size: self.thesaurus.len(),
            compactions: self.compactions,
            termination: self.termination,
        }
    }
}

/// Statistics about a training run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainStats {
    /// Corpus bytes loaded
    pub input_length: usize,
    /// Tokens in the current stream
    pub live_tokens: usize,
    /// Merge steps performed
    pub merges: usize,
    /// Defined symbols, literal bytes included
    pub vocabulary_size: usize,
    /// Times the sequence was compacted
    pub compactions: usize,
    /// Why the run stopped, if it has
    pub termination: Option<Termination>,
}

impl TrainStats {
    /// Returns the token count as a percentage of the input length.
    ///
    /// Lower is better. 100% means no compression.
    pub fn compression_ratio(&self) -> f64 {
        if self.input_length == 0 {
            0.0
        } else {
            (self.live_tokens as f64 / self.input_length as f64) * 100.0
        }
    }
}
