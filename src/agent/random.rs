//! Uniformly random legal play, the weakest reference opponent

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::board::{GameState, Pos};

use super::Agent;

/// Picks a uniformly random empty intersection.
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    /// Seeded from entropy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Fixed seed, for reproducible matches in tests.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn select_move(&mut self, state: &mut GameState) -> Pos {
        let moves = state.legal_moves();
        assert!(!moves.is_empty(), "no legal moves available");
        *moves.choose(&mut self.rng).expect("non-empty move list")
    }

    fn name(&self) -> String {
        "RandomAgent".to_string()
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Stone;

    #[test]
    fn test_selects_legal_moves() {
        let mut agent = RandomAgent::with_seed(7);
        let mut state = GameState::new();

        for _ in 0..20 {
            let pos = agent.select_move(&mut state);
            assert!(state.board().is_empty(pos));
            state.apply_move(pos);
            if state.is_over() {
                break;
            }
        }
    }

    #[test]
    fn test_seeded_agents_repeat() {
        let mut a = RandomAgent::with_seed(42);
        let mut b = RandomAgent::with_seed(42);
        let mut state = GameState::new();
        state.apply_move(Pos::new(7, 7));
        assert_eq!(state.current(), Stone::White);

        assert_eq!(a.select_move(&mut state), b.select_move(&mut state));
    }
}
