//! Game-tree search: candidate generation, move ordering, and the
//! iteratively-deepened principal-variation alpha-beta driver

pub mod alphabeta;
pub mod candidates;
pub mod ordering;
pub mod tt;
pub mod zobrist;

// Re-exports
pub use alphabeta::{SearchOutcome, Searcher, DEFAULT_DEPTH};
pub use candidates::{generate_candidates, is_winning_placement};
pub use ordering::move_heuristic;
pub use tt::{EntryFlag, TranspositionTable};
pub use zobrist::ZobristTable;

/// Sentinel bound for alpha-beta windows. All real evaluations are bounded
/// by the terminal score of +-1_000_000, safely inside this.
pub const INF: i32 = 10_000_000;
