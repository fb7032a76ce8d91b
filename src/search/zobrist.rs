//! Zobrist hashing for position identification
//!
//! Each (cell, color) pair gets a fixed 64-bit random value, plus one value
//! XORed in whenever White is to move. Placing or removing a stone XORs the
//! same values, so the search maintains the key incrementally in O(1);
//! [`ZobristTable::hash`] recomputes it from scratch at the root.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::{GameState, Pos, Stone, BOARD_SIZE};

/// Fixed seed so keys are stable across runs; tests and replays depend on it.
const ZOBRIST_SEED: u64 = 42;

/// Zobrist key table, filled deterministically at construction.
pub struct ZobristTable {
    /// keys[row][col][side]: side 0 = Black, 1 = White
    keys: [[[u64; 2]; BOARD_SIZE]; BOARD_SIZE],
    /// XORed into the key when it is White's turn
    side: u64,
}

impl ZobristTable {
    #[must_use]
    pub fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);
        let mut keys = [[[0u64; 2]; BOARD_SIZE]; BOARD_SIZE];
        for row in keys.iter_mut() {
            for cell in row.iter_mut() {
                for key in cell.iter_mut() {
                    *key = rng.gen();
                }
            }
        }
        Self {
            keys,
            side: rng.gen(),
        }
    }

    #[inline]
    fn stone_key(&self, pos: Pos, stone: Stone) -> u64 {
        let side = match stone {
            Stone::Black => 0,
            Stone::White => 1,
            Stone::Empty => unreachable!("no key for empty cells"),
        };
        self.keys[pos.row as usize][pos.col as usize][side]
    }

    /// Compute the full key for a position from scratch.
    /// Used once at the search root; the move loop updates incrementally.
    #[must_use]
    pub fn hash(&self, state: &GameState) -> u64 {
        let mut h = 0u64;
        for mv in state.moves() {
            h ^= self.stone_key(mv.pos, mv.stone);
        }
        if state.current() == Stone::White {
            h ^= self.side;
        }
        h
    }

    /// Incremental update for placing `stone` at `pos`: XOR the stone key
    /// and flip the side-to-move component. XOR is self-inverse, so the
    /// same call undoes the update.
    #[inline]
    #[must_use]
    pub fn toggle(&self, hash: u64, pos: Pos, stone: Stone) -> u64 {
        hash ^ self.stone_key(pos, stone) ^ self.side
    }
}

impl Default for ZobristTable {
    fn default() -> Self {
        Self::new()
    }
}
