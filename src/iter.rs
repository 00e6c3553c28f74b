use crate::sequence::Sequence;
use crate::symbol::Symbol;

/// A position cursor over the live slots of a [`Sequence`].
///
/// Does not borrow the sequence, so the owner may mutate slots it has
/// already passed between calls to [`advance`](Self::advance).
#[derive(Debug, Clone)]
pub(crate) struct WalkCursor {
    pos: usize,
}

impl WalkCursor {
    pub(crate) fn new(seq: &Sequence) -> Self {
        let mut cursor = Self { pos: 0 };
        cursor.skip_holes(seq);
        cursor
    }

    fn skip_holes(&mut self, seq: &Sequence) {
        while self.pos < seq.capacity() && !seq.slot(self.pos).is_live() {
            self.pos += 1;
        }
    }

    /// Returns the current live position and moves to the next one.
    pub(crate) fn advance(&mut self, seq: &Sequence) -> Option<usize> {
        if self.pos >= seq.capacity() {
            return None;
        }
        let current = self.pos;
        self.pos += 1;
        self.skip_holes(seq);
        Some(current)
    }
}

/// Iterator over live positions in ascending order.
///
/// Cost of a full pass is proportional to [`Sequence::capacity`], holes
/// included.
pub struct Walk<'a> {
    seq: &'a Sequence,
    cursor: WalkCursor,
}

impl<'a> Walk<'a> {
    pub(crate) fn new(seq: &'a Sequence) -> Self {
        Self {
            seq,
            cursor: WalkCursor::new(seq),
        }
    }
}

impl Iterator for Walk<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        self.cursor.advance(self.seq)
    }
}

/// Iterator over the live token stream.
pub struct Tokens<'a> {
    walk: Walk<'a>,
}

impl Iterator for Tokens<'_> {
    type Item = Symbol;

    fn next(&mut self) -> Option<Symbol> {
        let pos = self.walk.next()?;
        self.walk.seq.get(pos)
    }
}

/// Live neighbours around a freshly merged position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbors {
    /// Nearest live position left of the rewritten slot.
    pub left: Option<usize>,
    /// Next live position right of the consumed pair.
    pub right: Option<usize>,
}

/// Walks consecutive live pairs `(left, right)` in ascending order.
///
/// After the caller rewrites the left slot of the last returned pair and
/// holes the right one, [`resync`](Self::resync) skips past the consumed
/// pair so neither half can take part in another match during the sweep.
#[derive(Debug)]
pub struct PairWalker {
    cursor: WalkCursor,
    left: Option<usize>,
    right: Option<usize>,
}

impl PairWalker {
    pub fn new(seq: &Sequence) -> Self {
        let mut cursor = WalkCursor::new(seq);
        let left = cursor.advance(seq);
        let right = cursor.advance(seq);
        Self {
            cursor,
            left,
            right,
        }
    }

    /// Returns the next pair of live positions.
    pub fn next(&mut self, seq: &Sequence) -> Option<(usize, usize)> {
        let (Some(left), Some(right)) = (self.left, self.right) else {
            return None;
        };
        self.left = self.right;
        self.right = self.cursor.advance(seq);
        Some((left, right))
    }

    /// Steps over the pair just merged at `rewritten` and reports its live neighbours.
    pub fn resync(&mut self, rewritten: usize, seq: &Sequence) -> Neighbors {
        self.left = self.right;
        self.right = self.cursor.advance(seq);
        Neighbors {
            left: seq.live_before(rewritten),
            right: self.left,
        }
    }
}

impl Sequence {
    /// Returns an iterator over live positions.
    pub fn walk(&self) -> Walk<'_> {
        Walk::new(self)
    }

    /// Returns an iterator over live symbols in order.
    pub fn tokens(&self) -> Tokens<'_> {
        Tokens { walk: self.walk() }
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = Symbol;
    type IntoIter = Tokens<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holed(bytes: &[u8], holes: &[usize]) -> Sequence {
        let mut seq = Sequence::from_bytes(bytes);
        for &pos in holes {
            seq.punch_hole(pos);
        }
        seq
    }

    #[test]
    fn test_walk_empty() {
        let seq = Sequence::from_bytes(&[]);
        assert_eq!(seq.walk().count(), 0);
    }

    #[test]
    fn test_walk_skips_holes() {
        let seq = holed(&[1, 2, 3, 4, 5], &[0, 2, 3]);
        let positions: Vec<usize> = seq.walk().collect();
        assert_eq!(positions, vec![1, 4]);
    }

    #[test]
    fn test_tokens_keep_zero_bytes() {
        let seq = holed(&[0, 0, 7, 0], &[1]);
        let tokens: Vec<Symbol> = seq.tokens().collect();
        assert_eq!(tokens, vec![0, 7, 0]);
    }

    #[test]
    fn test_into_iterator() {
        let seq = Sequence::from_bytes(b"ab");
        let tokens: Vec<Symbol> = (&seq).into_iter().collect();
        assert_eq!(tokens, vec![97, 98]);
    }

    #[test]
    fn test_pair_walker_pairs() {
        let seq = holed(&[1, 2, 3, 4], &[1]);
        let mut pairs = PairWalker::new(&seq);
        assert_eq!(pairs.next(&seq), Some((0, 2)));
        assert_eq!(pairs.next(&seq), Some((2, 3)));
        assert_eq!(pairs.next(&seq), None);
        assert_eq!(pairs.next(&seq), None);
    }

    #[test]
    fn test_pair_walker_single_slot() {
        let seq = Sequence::from_bytes(&[9]);
        let mut pairs = PairWalker::new(&seq);
        assert_eq!(pairs.next(&seq), None);
    }

    #[test]
    fn test_resync_reports_neighbors() {
        let mut seq = Sequence::from_bytes(&[1, 2, 3, 4, 5]);
        let mut pairs = PairWalker::new(&seq);
        assert_eq!(pairs.next(&seq), Some((0, 1)));
        assert_eq!(pairs.next(&seq), Some((1, 2)));

        seq.rewrite(1, 300);
        seq.punch_hole(2);
        let neighbors = pairs.resync(1, &seq);
        assert_eq!(
            neighbors,
            Neighbors {
                left: Some(0),
                right: Some(3)
            }
        );

        // The consumed pair is never revisited
        assert_eq!(pairs.next(&seq), Some((3, 4)));
        assert_eq!(pairs.next(&seq), None);
    }

    #[test]
    fn test_resync_at_edges() {
        let mut seq = Sequence::from_bytes(&[1, 2]);
        let mut pairs = PairWalker::new(&seq);
        assert_eq!(pairs.next(&seq), Some((0, 1)));

        seq.rewrite(0, 256);
        seq.punch_hole(1);
        let neighbors = pairs.resync(0, &seq);
        assert_eq!(neighbors.left, None);
        assert_eq!(neighbors.right, None);
        assert_eq!(pairs.next(&seq), None);
    }
}
