//! Agent-vs-agent matches and round-robin tournaments
//!
//! Each game is a self-contained, single-threaded engine run; a tournament
//! schedule fans the games out with rayon and folds the results into
//! standings.

use rayon::prelude::*;

use crate::agent::Agent;
use crate::board::{GameState, Stone};

/// Drive two agents to a terminal position, Black moving first.
/// Returns the finished game, win or draw.
pub fn play_game(black: &mut dyn Agent, white: &mut dyn Agent) -> GameState {
    let mut state = GameState::new();
    while !state.is_over() {
        let pos = match state.current() {
            Stone::Black => black.select_move(&mut state),
            Stone::White => white.select_move(&mut state),
            Stone::Empty => unreachable!("side to move is never Empty"),
        };
        state.apply_move(pos);
    }
    state
}

/// One player's tournament tally. Two points per win, one per draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standing {
    pub name: String,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
}

impl Standing {
    #[must_use]
    pub fn points(&self) -> u32 {
        2 * self.wins + self.draws
    }

    #[must_use]
    pub fn games(&self) -> u32 {
        self.wins + self.draws + self.losses
    }
}

/// Play every ordered pairing `games_per_pair` times, so each pair meets
/// with colors alternating, and return standings sorted by points.
///
/// Games run in parallel; each one constructs its agents from the player's
/// factory so no engine state is shared between games.
pub fn round_robin<F>(players: &[(String, F)], games_per_pair: usize) -> Vec<Standing>
where
    F: Fn() -> Box<dyn Agent> + Sync,
{
    let mut schedule = Vec::new();
    for black in 0..players.len() {
        for white in 0..players.len() {
            if black != white {
                for _ in 0..games_per_pair {
                    schedule.push((black, white));
                }
            }
        }
    }

    let results: Vec<(usize, usize, Option<Stone>)> = schedule
        .par_iter()
        .map(|&(black, white)| {
            let mut black_agent = (players[black].1)();
            let mut white_agent = (players[white].1)();
            let state = play_game(black_agent.as_mut(), white_agent.as_mut());
            (black, white, state.winner())
        })
        .collect();

    let mut standings: Vec<Standing> = players
        .iter()
        .map(|(name, _)| Standing {
            name: name.clone(),
            wins: 0,
            draws: 0,
            losses: 0,
        })
        .collect();

    for (black, white, winner) in results {
        match winner {
            Some(Stone::Black) => {
                standings[black].wins += 1;
                standings[white].losses += 1;
            }
            Some(Stone::White) => {
                standings[white].wins += 1;
                standings[black].losses += 1;
            }
            _ => {
                standings[black].draws += 1;
                standings[white].draws += 1;
            }
        }
    }

    standings.sort_by(|a, b| b.points().cmp(&a.points()).then(a.name.cmp(&b.name)));
    standings
}
