//! Static position evaluation

pub mod heuristic;
pub mod patterns;

pub use heuristic::evaluate;
pub use patterns::{pattern_score, PatternScore};
