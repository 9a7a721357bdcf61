//! Fixed-size, direct-mapped transposition table.
//!
//! Slot = `hash % size`, replacement is always-replace. Aliased slots are
//! rejected on lookup by comparing the full 64-bit hash, so a collision only
//! ever costs a recomputation, never a wrong result.

use chess_logic::{Score, Turn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    /// The stored score is the true negamax value.
    Exact,
    /// A beta cutoff stopped the search; the true value is at least this.
    Lower,
    /// No move beat the initial alpha; the true value is at most this.
    Upper,
}

#[derive(Clone, Copy, Debug)]
pub struct TableEntry {
    pub hash: u64,
    /// Plies of search below the stored position.
    pub depth: usize,
    pub score: Score,
    pub turn: Turn,
    pub bound: Bound,
}

#[derive(Clone, Debug)]
pub struct TranspositionTable {
    entries: Vec<Option<TableEntry>>,
}

/// Default capacity, about a million entries. A power of two lets the
/// compiler fold the slot modulo into a mask.
pub const DEFAULT_TABLE_SIZE: usize = 1 << 20;

impl TranspositionTable {
    pub fn new(size: usize) -> Self {
        TranspositionTable {
            entries: vec![None; size.max(1)],
        }
    }

    pub fn size(&self) -> usize {
        self.entries.len()
    }

    /// Entry stored for exactly this hash, if any.
    pub fn lookup(&self, hash: u64) -> Option<TableEntry> {
        let slot = (hash % self.entries.len() as u64) as usize;
        self.entries[slot].filter(|entry| entry.hash == hash)
    }

    /// Store the entry, displacing whatever occupied the slot.
    pub fn maybe_update(&mut self, entry: TableEntry) {
        let slot = (entry.hash % self.entries.len() as u64) as usize;
        self.entries[slot] = Some(entry);
    }

    pub fn clear(&mut self) {
        self.entries.fill(None);
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new(DEFAULT_TABLE_SIZE)
    }
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod table_tests;
