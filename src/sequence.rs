use crate::symbol::{Slot, Symbol};

/// The mutable token array the merge engine works on.
///
/// Created once with one slot per corpus byte. Merges overwrite the left
/// slot of a pair and turn the right slot into a [`Slot::Hole`], so
/// positions never move until [`compact`](Self::compact) squeezes the holes
/// out.
#[derive(Debug, Clone)]
pub struct Sequence {
    slots: Vec<Slot>,
    live: usize,
}

impl Sequence {
    /// Builds a sequence with every byte zero-extended to a literal symbol.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let slots: Vec<Slot> = bytes.iter().map(|&b| Slot::Live(b as Symbol)).collect();
        Self {
            live: slots.len(),
            slots,
        }
    }

    /// Number of allocated slots, holes included.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of live (non-hole) slots.
    pub fn live_len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Number of holes currently waiting for compaction.
    pub fn holes(&self) -> usize {
        self.slots.len() - self.live
    }

    /// Returns the symbol at `pos`, or `None` for a hole or an out of range index.
    pub fn get(&self, pos: usize) -> Option<Symbol> {
        self.slots.get(pos).and_then(|slot| slot.symbol())
    }

    pub(crate) fn slot(&self, pos: usize) -> Slot {
        self.slots[pos]
    }

    /// Overwrites a live slot with a new symbol.
    pub(crate) fn rewrite(&mut self, pos: usize, symbol: Symbol) {
        debug_assert!(self.slots[pos].is_live(), "Cannot rewrite a hole");
        self.slots[pos] = Slot::Live(symbol);
    }

    /// Marks a live slot as absorbed into its left neighbour.
    pub(crate) fn punch_hole(&mut self, pos: usize) {
        debug_assert!(self.slots[pos].is_live(), "Slot is already a hole");
        self.slots[pos] = Slot::Hole;
        self.live -= 1;
    }

    /// Nearest live position strictly left of `pos`.
    pub(crate) fn live_before(&self, pos: usize) -> Option<usize> {
        self.slots[..pos].iter().rposition(|slot| slot.is_live())
    }

    /// Removes every hole and shrinks the allocation to the live count.
    ///
    /// Adjacency among live symbols is unchanged. Returns the number of
    /// holes reclaimed.
    pub fn compact(&mut self) -> usize {
        let reclaimed = self.holes();
        if reclaimed > 0 {
            self.slots.retain(|slot| slot.is_live());
            self.slots.shrink_to_fit();
        }
        debug_assert_eq!(self.slots.len(), self.live);
        reclaimed
    }
}
