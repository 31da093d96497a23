//! Transposition table: a cache from Zobrist hash to previously computed
//! search results, reused when the same position recurs through a different
//! move order.
//!
//! The table is bounded by an entry ceiling. Eviction is coarse: when a
//! store would push the table past its ceiling, the whole table is
//! cleared. Entries are otherwise overwritten in place on every completed
//! node evaluation and never individually removed.

use std::collections::HashMap;

use log::debug;

use crate::board::Move;

/// How a stored score relates to the true value of the node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    /// The score is the exact value.
    Exact,
    /// The node failed high: the true value is at least the score.
    Lower,
    /// The node failed low: the true value is at most the score.
    Upper,
}

/// One cached node result. Scores are centipawns from White's perspective,
/// matching the search convention.
#[derive(Clone, Copy, Debug)]
pub struct TtEntry {
    pub depth: u32,
    pub score: i32,
    pub bound: Bound,
    pub best_move: Option<Move>,
}

pub struct TranspositionTable {
    entries: HashMap<u64, TtEntry>,
    max_entries: usize,
}

impl TranspositionTable {
    #[must_use]
    pub fn new(max_entries: usize) -> Self {
        TranspositionTable {
            entries: HashMap::with_capacity(max_entries.min(1 << 16)),
            max_entries: max_entries.max(1),
        }
    }

    #[must_use]
    pub fn probe(&self, hash: u64) -> Option<TtEntry> {
        self.entries.get(&hash).copied()
    }

    /// Insert or overwrite the entry for `hash`. Clears the whole table
    /// first when the ceiling would be exceeded.
    pub fn store(&mut self, hash: u64, depth: u32, score: i32, bound: Bound, best_move: Option<Move>) {
        if self.entries.len() >= self.max_entries && !self.entries.contains_key(&hash) {
            debug!(
                "transposition table reached {} entries, clearing",
                self.entries.len()
            );
            self.entries.clear();
        }
        self.entries.insert(
            hash,
            TtEntry {
                depth,
                score,
                bound,
                best_move,
            },
        );
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_and_probe() {
        let mut tt = TranspositionTable::new(16);
        tt.store(0x1234, 5, 42, Bound::Exact, None);

        let entry = tt.probe(0x1234).expect("entry should be present");
        assert_eq!(entry.depth, 5);
        assert_eq!(entry.score, 42);
        assert_eq!(entry.bound, Bound::Exact);
        assert!(entry.best_move.is_none());
    }

    #[test]
    fn probe_misses_other_hashes() {
        let mut tt = TranspositionTable::new(16);
        tt.store(0x1234, 5, 42, Bound::Exact, None);
        assert!(tt.probe(0x5678).is_none());
    }

    #[test]
    fn store_overwrites_same_hash() {
        let mut tt = TranspositionTable::new(16);
        tt.store(1, 3, 10, Bound::Lower, None);
        tt.store(1, 7, -25, Bound::Upper, None);

        let entry = tt.probe(1).expect("entry should be present");
        assert_eq!(entry.depth, 7);
        assert_eq!(entry.score, -25);
        assert_eq!(entry.bound, Bound::Upper);
        assert_eq!(tt.len(), 1);
    }

    #[test]
    fn overflow_clears_whole_table() {
        let mut tt = TranspositionTable::new(4);
        for hash in 0..4u64 {
            tt.store(hash, 1, 0, Bound::Exact, None);
        }
        assert_eq!(tt.len(), 4);

        // The fifth distinct key trips the ceiling: wholesale clear, then
        // the new entry goes in alone.
        tt.store(99, 1, 0, Bound::Exact, None);
        assert_eq!(tt.len(), 1);
        assert!(tt.probe(99).is_some());
        assert!(tt.probe(0).is_none());
    }

    #[test]
    fn overwrite_at_ceiling_does_not_clear() {
        let mut tt = TranspositionTable::new(4);
        for hash in 0..4u64 {
            tt.store(hash, 1, 0, Bound::Exact, None);
        }
        tt.store(2, 9, 5, Bound::Exact, None);
        assert_eq!(tt.len(), 4);
        assert_eq!(tt.probe(2).map(|e| e.depth), Some(9));
    }
}
