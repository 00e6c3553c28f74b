use crate::histogram::PairHistogram;
use crate::iter::PairWalker;
use crate::sequence::Sequence;
use crate::symbol::{Pair, Symbol};

/// Rewrites every occurrence of `pair` into `new` in a single left-to-right sweep.
///
/// The left slot of each match takes `new` and the right slot becomes a
/// hole. Only the two histogram entries touching each match are patched.
/// Overlapping candidates such as runs of `(a, a)` are merged greedily from
/// the left: a slot consumed by one match never takes part in another.
///
/// The entry for `pair` is zero afterwards. Returns the number of
/// occurrences replaced.
pub fn replace_pair(
    seq: &mut Sequence,
    hist: &mut PairHistogram,
    pair: Pair,
    new: Symbol,
) -> usize {
    let mut replaced = 0;
    let mut pairs = PairWalker::new(seq);

    while let Some((left, right)) = pairs.next(seq) {
        if seq.get(left) != Some(pair.first) || seq.get(right) != Some(pair.second) {
            continue;
        }

        seq.rewrite(left, new);
        seq.punch_hole(right);
        let neighbors = pairs.resync(left, seq);

        if let Some(prev) = neighbors.left.and_then(|pos| seq.get(pos)) {
            hist.decrement(Pair::new(prev, pair.first));
            hist.increment(Pair::new(prev, new));
        }
        if let Some(next) = neighbors.right.and_then(|pos| seq.get(pos)) {
            hist.decrement(Pair::new(pair.second, next));
            hist.increment(Pair::new(new, next));
        }

        replaced += 1;
    }

    hist.clear(pair);
    replaced
}
