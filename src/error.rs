//! Error types for corpus loading and artifact I/O.
//!
//! The merge engine itself cannot fail; every variant here names the I/O
//! operation that did.

use crate::symbol::Symbol;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot open corpus {}: {source}", path.display())]
    CorpusOpen { path: PathBuf, source: io::Error },

    #[error("cannot stat corpus {}: {source}", path.display())]
    CorpusStat { path: PathBuf, source: io::Error },

    #[error("cannot read corpus {}: {source}", path.display())]
    CorpusRead { path: PathBuf, source: io::Error },

    #[error("cannot create checkpoint {}: {source}", path.display())]
    CheckpointCreate { path: PathBuf, source: io::Error },

    #[error("cannot write checkpoint {}: {source}", path.display())]
    CheckpointWrite { path: PathBuf, source: io::Error },

    #[error("cannot read token stream {}: {source}", path.display())]
    TokensRead { path: PathBuf, source: io::Error },

    #[error("cannot write vocabulary {}: {source}", path.display())]
    VocabularyWrite { path: PathBuf, source: io::Error },

    #[error("cannot read vocabulary {}: {source}", path.display())]
    VocabularyRead { path: PathBuf, source: io::Error },

    /// A merge list refers to a symbol that is not yet defined at its position.
    #[error("merge defining symbol {id} refers to undefined symbol {symbol}")]
    UndefinedSymbol { id: Symbol, symbol: Symbol },

    /// A merge list is longer than the 16-bit symbol space allows.
    #[error("merge list has {0} entries, more than the symbol space holds")]
    TooManyMerges(usize),
}
