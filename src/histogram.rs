use crate::iter::PairWalker;
use crate::sequence::Sequence;
use crate::symbol::Pair;
use ahash::AHashMap as HashMap;

/// Live-occurrence counts for every adjacent symbol pair.
///
/// Built once from the initial sequence and patched by the merge operator
/// afterwards. Right after [`build`](Self::build) the counts sum to
/// `live_len - 1` (or 0 for fewer than two live symbols).
#[derive(Debug, Clone, Default)]
pub struct PairHistogram {
    counts: HashMap<Pair, usize>,
}

/// Result of scanning the histogram for the next merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Most frequent pair, lexicographically smallest among ties.
    pub pair: Pair,
    /// Count of `pair`.
    pub count: usize,
    /// Sum of all counts, i.e. live pair occurrences.
    pub total: usize,
}

impl PairHistogram {
    /// Counts every live adjacent pair in one pass.
    pub fn build(seq: &Sequence) -> Self {
        let mut hist = Self::default();
        let mut pairs = PairWalker::new(seq);
        while let Some((left, right)) = pairs.next(seq) {
            if let (Some(first), Some(second)) = (seq.get(left), seq.get(right)) {
                hist.increment(Pair::new(first, second));
            }
        }
        hist
    }

    /// Returns the count for `pair`, 0 if it was never seen.
    pub fn get(&self, pair: Pair) -> usize {
        self.counts.get(&pair).copied().unwrap_or(0)
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Number of tracked entries, zero-count entries included.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Pair, usize)> + '_ {
        self.counts.iter().map(|(&pair, &count)| (pair, count))
    }

    /// Picks the entry with the highest count.
    ///
    /// Ties go to the smallest pair, so the result depends only on the
    /// counts and never on hash iteration order. Returns `None` when no
    /// entry has a positive count.
    pub fn select(&self) -> Option<Selection> {
        let mut best: Option<(Pair, usize)> = None;
        let mut total = 0;

        for (&pair, &count) in &self.counts {
            total += count;
            if count == 0 {
                continue;
            }
            best = match best {
                Some((top, max)) if max > count || (max == count && top < pair) => {
                    Some((top, max))
                }
                _ => Some((pair, count)),
            };
        }

        best.map(|(pair, count)| Selection { pair, count, total })
    }

    pub(crate) fn increment(&mut self, pair: Pair) {
        *self.counts.entry(pair).or_insert(0) += 1;
    }

    /// Lowers the count of `pair`, never below zero.
    ///
    /// An untracked pair is left untracked.
    pub(crate) fn decrement(&mut self, pair: Pair) {
        if let Some(count) = self.counts.get_mut(&pair) {
            *count = count.saturating_sub(1);
        }
    }

    /// Forces the count of a fully consumed pair to zero.
    pub(crate) fn clear(&mut self, pair: Pair) {
        if let Some(count) = self.counts.get_mut(&pair) {
            *count = 0;
        }
    }

    /// Drops zero-count entries. Returns how many were removed.
    pub fn evict_zeros(&mut self) -> usize {
        let before = self.counts.len();
        self.counts.retain(|_, count| *count > 0);
        before - self.counts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_no_repeats() {
        let seq = Sequence::from_bytes(b"aabb");
        let hist = PairHistogram::build(&seq);
        assert_eq!(hist.len(), 3);
        assert_eq!(hist.get(Pair::new(97, 97)), 1);
        assert_eq!(hist.get(Pair::new(97, 98)), 1);
        assert_eq!(hist.get(Pair::new(98, 98)), 1);
        assert_eq!(hist.total(), 3);
    }

    #[test]
    fn test_build_short_sequences() {
        assert!(PairHistogram::build(&Sequence::from_bytes(&[])).is_empty());
        assert!(PairHistogram::build(&Sequence::from_bytes(&[1])).is_empty());
    }

    #[test]
    fn test_build_skips_holes() {
        let mut seq = Sequence::from_bytes(&[1, 2, 3]);
        seq.punch_hole(1);
        let hist = PairHistogram::build(&seq);
        assert_eq!(hist.len(), 1);
        assert_eq!(hist.get(Pair::new(1, 3)), 1);
    }

    #[test]
    fn test_build_counts_zero_bytes() {
        let seq = Sequence::from_bytes(&[0, 0, 0, 0]);
        let hist = PairHistogram::build(&seq);
        assert_eq!(hist.get(Pair::new(0, 0)), 3);
    }

    #[test]
    fn test_select_max() {
        let seq = Sequence::from_bytes(b"ababx");
        let hist = PairHistogram::build(&seq);
        let selection = hist.select().unwrap();
        assert_eq!(selection.pair, Pair::new(97, 98));
        assert_eq!(selection.count, 2);
        assert_eq!(selection.total, 4);
    }

    #[test]
    fn test_select_tie_break() {
        let seq = Sequence::from_bytes(b"zzyyzzyy");
        let hist = PairHistogram::build(&seq);
        // (y,y), (z,y) and (z,z) each occur twice
        let selection = hist.select().unwrap();
        assert_eq!(selection.count, 2);
        assert_eq!(selection.pair, Pair::new(b'y' as u16, b'y' as u16));
    }

    #[test]
    fn test_select_empty() {
        assert_eq!(PairHistogram::default().select(), None);
    }

    #[test]
    fn test_select_ignores_zero_entries() {
        let mut hist = PairHistogram::default();
        hist.increment(Pair::new(5, 5));
        hist.clear(Pair::new(5, 5));
        hist.increment(Pair::new(9, 9));
        let selection = hist.select().unwrap();
        assert_eq!(selection.pair, Pair::new(9, 9));
        assert_eq!(selection.total, 1);
    }

    #[test]
    fn test_select_is_deterministic() {
        let seq = Sequence::from_bytes(b"the cat sat on the mat with the hat");
        let hist = PairHistogram::build(&seq);
        let first = hist.select();
        for _ in 0..10 {
            assert_eq!(hist.clone().select(), first);
        }
    }

    #[test]
    fn test_decrement_saturates() {
        let mut hist = PairHistogram::default();
        hist.increment(Pair::new(1, 2));
        hist.decrement(Pair::new(1, 2));
        hist.decrement(Pair::new(1, 2));
        assert_eq!(hist.get(Pair::new(1, 2)), 0);

        // Unknown pairs are ignored rather than inserted
        hist.decrement(Pair::new(7, 7));
        assert_eq!(hist.len(), 1);
        assert_eq!(hist.total(), 0);
    }

    #[test]
    fn test_evict_zeros() {
        let mut hist = PairHistogram::default();
        hist.increment(Pair::new(1, 2));
        hist.increment(Pair::new(3, 4));
        hist.decrement(Pair::new(1, 2));
        assert_eq!(hist.len(), 2);
        assert_eq!(hist.evict_zeros(), 1);
        assert_eq!(hist.len(), 1);
        assert_eq!(hist.get(Pair::new(3, 4)), 1);
    }
}
