//! Playing agents: the search engine and the random reference opponent

pub mod advanced;
pub mod random;

pub use advanced::AdvancedAgent;
pub use random::RandomAgent;

use crate::board::{GameState, Pos};

/// A move-selecting player.
///
/// `select_move` receives the state mutably because the engine explores by
/// paired apply/undo calls; the position is restored exactly before the
/// method returns. Precondition: the game is not over and at least one
/// intersection is empty.
pub trait Agent {
    fn select_move(&mut self, state: &mut GameState) -> Pos;

    fn name(&self) -> String;
}
