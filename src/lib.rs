//! # bytepair - Byte-Pair Encoding Vocabulary Training
//!
//! Trains a BPE vocabulary over a raw byte corpus by repeatedly replacing
//! the most frequent adjacent symbol pair with a newly minted symbol.
//!
//! The engine keeps three structures:
//! 1. **Sequence**: one 16-bit slot per corpus byte; merged-away slots
//!    become holes and are reclaimed by periodic compaction
//! 2. **Pair histogram**: counted once, then patched around each rewrite
//! 3. **Thesaurus**: append-only map from symbol id to its byte expansion
//!
//! ## Example
//!
//! ```
//! use bytepair_rs::{Trainer, TrainerConfig};
//!
//! let corpus = b"abcabcabcabc";
//! let mut trainer = Trainer::new(corpus, TrainerConfig::default());
//! let stats = trainer.train();
//!
//! // Expanding the token stream reproduces the corpus
//! let tokens: Vec<u16> = trainer.sequence().tokens().collect();
//! assert_eq!(trainer.thesaurus().decode(tokens).unwrap(), corpus);
//!
//! println!("{} merges, {} tokens", stats.merges, stats.live_tokens);
//! ```
//!
//! ## Performance
//!
//! - Histogram updates are O(1) per replaced occurrence
//! - Each merge step walks the sequence once; compaction keeps holes below
//!   roughly 30% of the allocated slots

pub mod checkpoint;
mod config;
mod corpus;
mod error;
mod histogram;
mod iter;
mod merge;
mod sequence;
mod symbol;
mod thesaurus;
mod trainer;


pub use checkpoint::Checkpointer;
pub use config::TrainerConfig;
pub use corpus::load_corpus;
pub use error::{Error, Result};
pub use histogram::{PairHistogram, Selection};
pub use iter::{Neighbors, PairWalker, Tokens, Walk};
pub use merge::replace_pair;
pub use sequence::Sequence;
pub use symbol::{Pair, Slot, Symbol, FIRST_MERGED, MAX_MERGES};
pub use thesaurus::Thesaurus;
pub use trainer::{MergeRecord, StepOutcome, Termination, TrainStats, Trainer};
