//! The full search engine behind the [`Agent`] interface

use log::info;

use crate::board::{format_point, GameState, Pos};
use crate::search::{SearchOutcome, Searcher, DEFAULT_DEPTH};

use super::Agent;

/// Iteratively-deepened PVS engine at a configurable nominal depth.
///
/// ```
/// use gomoku::agent::{AdvancedAgent, Agent};
/// use gomoku::board::GameState;
///
/// let mut agent = AdvancedAgent::with_depth(2);
/// let mut state = GameState::new();
/// let pos = agent.select_move(&mut state);
/// state.apply_move(pos);
/// ```
pub struct AdvancedAgent {
    searcher: Searcher,
    /// Last completed search, for UI statistics
    last_outcome: Option<SearchOutcome>,
}

impl AdvancedAgent {
    /// Engine at the default depth of 6.
    #[must_use]
    pub fn new() -> Self {
        Self::with_depth(DEFAULT_DEPTH)
    }

    /// Engine at a custom iterative-deepening depth (must be >= 1).
    #[must_use]
    pub fn with_depth(depth: u32) -> Self {
        Self {
            searcher: Searcher::new(depth),
            last_outcome: None,
        }
    }

    #[must_use]
    pub fn depth(&self) -> u32 {
        self.searcher.max_depth()
    }

    /// Statistics from the most recent `select_move`, if any.
    #[must_use]
    pub fn last_outcome(&self) -> Option<&SearchOutcome> {
        self.last_outcome.as_ref()
    }
}

impl Agent for AdvancedAgent {
    fn select_move(&mut self, state: &mut GameState) -> Pos {
        let outcome = self.searcher.search(state);
        info!(
            "{} plays {} (score {}, depth {}, {} nodes)",
            self.name(),
            format_point(outcome.best_move),
            outcome.score,
            outcome.depth,
            outcome.nodes
        );
        self.last_outcome = Some(outcome);
        outcome.best_move
    }

    fn name(&self) -> String {
        format!("AdvancedAgent(d={})", self.depth())
    }
}

impl Default for AdvancedAgent {
    fn default() -> Self {
        Self::new()
    }
}
