use std::cmp::Ordering;
use std::fmt;

/// A token identifier.
///
/// Values below [`FIRST_MERGED`] are literal bytes; everything above is a
/// merged symbol whose expansion lives in the [`Thesaurus`](crate::Thesaurus).
pub type Symbol = u16;

/// Id handed out by the first merge step.
pub const FIRST_MERGED: Symbol = 256;

/// Number of merge steps the 16-bit symbol space can hold.
pub const MAX_MERGES: usize = (Symbol::MAX as usize + 1) - FIRST_MERGED as usize;

/// One position of the [`Sequence`](crate::Sequence).
///
/// A hole marks a position whose content was absorbed into the nearest live
/// slot on its left. Byte 0 is an ordinary `Live(0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Live(Symbol),
    Hole,
}

impl Slot {
    pub fn symbol(self) -> Option<Symbol> {
        match self {
            Slot::Live(s) => Some(s),
            Slot::Hole => None,
        }
    }

    pub fn is_live(self) -> bool {
        matches!(self, Slot::Live(_))
    }
}

/// An ordered pair of adjacent symbols.
///
/// Ordering is lexicographic (first, then second) and drives the
/// tie-break when several pairs share the maximum count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pair {
    pub first: Symbol,
    pub second: Symbol,
}

impl Pair {
    pub fn new(first: Symbol, second: Symbol) -> Self {
        Self { first, second }
    }
}

impl Ord for Pair {
    fn cmp(&self, other: &Self) -> Ordering {
        self.first
            .cmp(&other.first)
            .then(self.second.cmp(&other.second))
    }
}

impl PartialOrd for Pair {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.first, self.second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_ordering() {
        assert!(Pair::new(1, 9) < Pair::new(2, 0));
        assert!(Pair::new(2, 0) < Pair::new(2, 1));
        assert_eq!(Pair::new(3, 3).cmp(&Pair::new(3, 3)), Ordering::Equal);
    }

    #[test]
    fn test_slot_zero_is_live() {
        assert!(Slot::Live(0).is_live());
        assert_eq!(Slot::Live(0).symbol(), Some(0));
        assert_eq!(Slot::Hole.symbol(), None);
    }

    #[test]
    fn test_symbol_space() {
        assert_eq!(MAX_MERGES, 65280);
        assert_eq!(FIRST_MERGED as usize + MAX_MERGES - 1, Symbol::MAX as usize);
    }
}
