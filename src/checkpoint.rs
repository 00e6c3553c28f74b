//! On-disk artifacts of a training run.
//!
//! The token stream (`<input>.gtok`) is a flat run of little-endian `u16`
//! values, one per live token. The optional vocabulary file
//! (`<input>.gvoc`) uses the same encoding for the merge list, two values
//! (first, second) per merged symbol in id order.

use crate::error::{Error, Result};
use crate::sequence::Sequence;
use crate::symbol::{Pair, Symbol};
use crate::thesaurus::Thesaurus;
use log::debug;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Tokens buffered before each write.
const CHUNK_TOKENS: usize = 1_000_000;

pub const TOKEN_EXTENSION: &str = "gtok";
pub const VOCAB_EXTENSION: &str = "gvoc";
const STAGING_EXTENSION: &str = "tmp";

fn with_suffix(input: &Path, extension: &str) -> PathBuf {
    let mut name = OsString::from(input.as_os_str());
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}

/// Token stream path for a corpus: the input name plus `.gtok`.
pub fn token_path(input: &Path) -> PathBuf {
    with_suffix(input, TOKEN_EXTENSION)
}

/// Vocabulary path for a corpus: the input name plus `.gvoc`.
pub fn vocab_path(input: &Path) -> PathBuf {
    with_suffix(input, VOCAB_EXTENSION)
}

/// Writes `tokens` as little-endian `u16` values. Returns the token count.
pub fn write_tokens<W, I>(writer: &mut W, tokens: I) -> io::Result<usize>
where
    W: Write,
    I: IntoIterator<Item = Symbol>,
{
    let mut buffer = Vec::with_capacity(CHUNK_TOKENS * 2);
    let mut written = 0;

    for token in tokens {
        buffer.extend_from_slice(&token.to_le_bytes());
        written += 1;
        if buffer.len() >= CHUNK_TOKENS * 2 {
            writer.write_all(&buffer)?;
            buffer.clear();
        }
    }

    if !buffer.is_empty() {
        writer.write_all(&buffer)?;
    }
    Ok(written)
}

/// Reads a stream written by [`write_tokens`].
pub fn read_tokens<R: Read>(reader: &mut R) -> io::Result<Vec<Symbol>> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    if bytes.len() % 2 != 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{} bytes is not a whole number of 16-bit tokens", bytes.len()),
        ));
    }
    Ok(bytes
        .chunks_exact(2)
        .map(|word| Symbol::from_le_bytes([word[0], word[1]]))
        .collect())
}

/// Overwrites a single token stream file with the live tokens of a sequence.
#[derive(Debug, Clone)]
pub struct Checkpointer {
    path: PathBuf,
}

impl Checkpointer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Checkpointer writing next to `input` as `<input>.gtok`.
    pub fn for_input(input: &Path) -> Self {
        Self::new(token_path(input))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces the file with the current live tokens.
    ///
    /// Tokens go to `<path>.tmp` first and are renamed over the target once
    /// fully written, so a failed save leaves the previous checkpoint intact.
    /// Returns the number of tokens written.
    pub fn save(&self, seq: &Sequence) -> Result<usize> {
        let staging = with_suffix(&self.path, STAGING_EXTENSION);
        let file = File::create(&staging).map_err(|source| Error::CheckpointCreate {
            path: staging.clone(),
            source,
        })?;

        let mut writer = BufWriter::new(file);
        let written = write_tokens(&mut writer, seq.tokens())
            .and_then(|written| {
                writer
                    .into_inner()
                    .map_err(|err| err.into_error())
                    .map(|_| written)
            })
            .and_then(|written| fs::rename(&staging, &self.path).map(|()| written))
            .map_err(|source| {
                let _ = fs::remove_file(&staging);
                Error::CheckpointWrite {
                    path: self.path.clone(),
                    source,
                }
            })?;

        debug!("Checkpointed {} tokens to {}", written, self.path.display());
        Ok(written)
    }
}

/// Reads a token stream file.
pub fn load_tokens(path: &Path) -> Result<Vec<Symbol>> {
    File::open(path)
        .and_then(|file| read_tokens(&mut BufReader::new(file)))
        .map_err(|source| Error::TokensRead {
            path: path.to_path_buf(),
            source,
        })
}

/// Writes the merge list of `thesaurus`.
pub fn save_merges(path: &Path, thesaurus: &Thesaurus) -> Result<()> {
    let values = thesaurus
        .merges()
        .iter()
        .flat_map(|pair| [pair.first, pair.second]);

    File::create(path)
        .and_then(|file| {
            let mut writer = BufWriter::new(file);
            write_tokens(&mut writer, values)?;
            writer.flush()
        })
        .map_err(|source| Error::VocabularyWrite {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(
        "Saved {} merges to {}",
        thesaurus.merges().len(),
        path.display()
    );
    Ok(())
}

/// Reads a merge list written by [`save_merges`].
pub fn load_merges(path: &Path) -> Result<Vec<Pair>> {
    let read_error = |source| Error::VocabularyRead {
        path: path.to_path_buf(),
        source,
    };

    let values = File::open(path)
        .and_then(|file| read_tokens(&mut BufReader::new(file)))
        .map_err(read_error)?;

    if values.len() % 2 != 0 {
        return Err(read_error(io::Error::new(
            io::ErrorKind::InvalidData,
            "merge list ends with half a pair",
        )));
    }

    Ok(values
        .chunks_exact(2)
        .map(|pair| Pair::new(pair[0], pair[1]))
        .collect())
}
