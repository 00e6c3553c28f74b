use crate::error::{Error, Result};
use crate::symbol::{Pair, Symbol, FIRST_MERGED, MAX_MERGES};

/// Append-only table from symbol id to the corpus bytes it stands for.
///
/// Starts with the 256 literal bytes. Each merge appends exactly one entry,
/// the concatenation of its two halves, and nothing is rewritten afterwards.
#[derive(Debug, Clone)]
pub struct Thesaurus {
    expansions: Vec<Vec<u8>>,
    merges: Vec<Pair>,
}

impl Thesaurus {
    /// Creates a table holding only the literal byte symbols.
    pub fn new() -> Self {
        Self {
            expansions: (0..=u8::MAX).map(|b| vec![b]).collect(),
            merges: Vec::new(),
        }
    }

    /// Rebuilds a table by replaying a merge list in id order.
    pub fn from_merges(merges: &[Pair]) -> Result<Self> {
        if merges.len() > MAX_MERGES {
            return Err(Error::TooManyMerges(merges.len()));
        }

        let mut thesaurus = Self::new();
        for &pair in merges {
            let id = thesaurus.next_symbol();
            for symbol in [pair.first, pair.second] {
                if thesaurus.expand(symbol).is_none() {
                    return Err(Error::UndefinedSymbol { id, symbol });
                }
            }
            thesaurus.define(pair);
        }
        Ok(thesaurus)
    }

    /// Number of defined symbols, literal bytes included.
    pub fn len(&self) -> usize {
        self.expansions.len()
    }

    /// Always false; the literal bytes are present from the start.
    pub fn is_empty(&self) -> bool {
        self.expansions.is_empty()
    }

    /// Id the next call to [`define`](Self::define) will hand out.
    ///
    /// Meaningless once [`is_full`](Self::is_full) returns true.
    pub fn next_symbol(&self) -> Symbol {
        (FIRST_MERGED as usize + self.merges.len()) as Symbol
    }

    /// Whether the 16-bit symbol space is used up.
    pub fn is_full(&self) -> bool {
        self.merges.len() >= MAX_MERGES
    }

    /// Byte expansion of `symbol`, or `None` if it has not been defined.
    pub fn expand(&self, symbol: Symbol) -> Option<&[u8]> {
        self.expansions.get(symbol as usize).map(Vec::as_slice)
    }

    /// Merge pairs in the order their symbols were defined.
    pub fn merges(&self) -> &[Pair] {
        &self.merges
    }

    /// Appends a symbol for `pair` and returns its id.
    ///
    /// Both halves must already be defined.
    pub fn define(&mut self, pair: Pair) -> Symbol {
        assert!(!self.is_full(), "Symbol space exhausted");

        let id = self.next_symbol();
        let mut expansion = self.expansions[pair.first as usize].clone();
        expansion.extend_from_slice(&self.expansions[pair.second as usize]);
        self.expansions.push(expansion);
        self.merges.push(pair);
        id
    }

    /// Concatenates the expansions of `tokens`.
    ///
    /// Returns `None` if any token is undefined.
    pub fn decode<I: IntoIterator<Item = Symbol>>(&self, tokens: I) -> Option<Vec<u8>> {
        let mut bytes = Vec::new();
        for token in tokens {
            bytes.extend_from_slice(self.expand(token)?);
        }
        Some(bytes)
    }
}

impl Default for Thesaurus {
    fn default() -> Self {
        Self::new()
    }
}
