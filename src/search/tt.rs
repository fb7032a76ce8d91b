//! Transposition table for caching search results
//!
//! A direct-mapped table keyed by Zobrist hash. Entries record how deep the
//! position was searched, a bound flag, the score, and the best move found.
//! Entries are advisory: a probe miss or an evicted entry only costs time,
//! never correctness.

use crate::board::Pos;

/// How a stored score bounds the true value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryFlag {
    /// The search completed inside the window
    Exact,
    /// The move loop failed high: true score >= stored score
    LowerBound,
    /// The search failed low: true score <= stored score
    UpperBound,
}

/// Transposition table entry
#[derive(Debug, Clone, Copy)]
struct TTEntry {
    hash: u64,
    depth: i32,
    score: i32,
    flag: EntryFlag,
    best_move: Option<Pos>,
}

/// Result of a successful probe. `score` is set only when the entry is deep
/// enough and its bound applies to the caller's window; `best_move` is
/// always returned for move ordering.
#[derive(Debug, Clone, Copy)]
pub struct TTHit {
    pub score: Option<i32>,
    pub best_move: Option<Pos>,
}

/// Direct-mapped transposition table with depth-preferred replacement.
pub struct TranspositionTable {
    entries: Vec<Option<TTEntry>>,
    size: usize,
}

impl TranspositionTable {
    /// Create a table of roughly `size_mb` megabytes.
    #[must_use]
    pub fn new(size_mb: usize) -> Self {
        let entry_size = std::mem::size_of::<Option<TTEntry>>();
        let size = ((size_mb * 1024 * 1024) / entry_size).max(1024);
        Self {
            entries: vec![None; size],
            size,
        }
    }

    /// Probe for a position. Returns `None` when the slot is empty or holds
    /// a different position. The stored score is usable only if the entry
    /// was searched at least `depth` deep and its flag cuts the `(alpha,
    /// beta)` window; the stored best move is a hint either way.
    #[must_use]
    pub fn probe(&self, hash: u64, depth: i32, alpha: i32, beta: i32) -> Option<TTHit> {
        let entry = self.entries[hash as usize % self.size]?;
        if entry.hash != hash {
            return None;
        }

        let score = if entry.depth >= depth {
            match entry.flag {
                EntryFlag::Exact => Some(entry.score),
                EntryFlag::LowerBound if entry.score >= beta => Some(entry.score),
                EntryFlag::UpperBound if entry.score <= alpha => Some(entry.score),
                _ => None,
            }
        } else {
            None
        };

        Some(TTHit {
            score,
            best_move: entry.best_move,
        })
    }

    /// Best move stored for a position, for root move ordering.
    #[must_use]
    pub fn best_move(&self, hash: u64) -> Option<Pos> {
        self.entries[hash as usize % self.size]
            .filter(|e| e.hash == hash)
            .and_then(|e| e.best_move)
    }

    /// Store a search result. Replaces when the slot is empty, holds the
    /// same position, or holds a shallower search.
    pub fn store(&mut self, hash: u64, depth: i32, score: i32, flag: EntryFlag, best_move: Option<Pos>) {
        let idx = hash as usize % self.size;
        let replace = match &self.entries[idx] {
            None => true,
            Some(e) => e.hash == hash || e.depth <= depth,
        };
        if replace {
            self.entries[idx] = Some(TTEntry {
                hash,
                depth,
                score,
                flag,
                best_move,
            });
        }
    }

    /// Drop all entries. Called at the start of every move selection; the
    /// table never carries information between moves.
    pub fn clear(&mut self) {
        self.entries.fill(None);
    }
}
