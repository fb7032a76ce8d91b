//! Full game state: stones, side to move, history, terminal status

use crate::rules::is_winning_move;

use super::{format_point, Board, Pos, Stone};

/// One applied move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub pos: Pos,
    pub stone: Stone,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.stone, format_point(self.pos))
    }
}

/// Game state for freestyle Gomoku: 15x15, five or more in a row wins,
/// the board filling up without a five is a draw.
///
/// The state is mutated only through paired [`apply_move`](Self::apply_move) /
/// [`undo_move`](Self::undo_move) calls; undo restores the previous position
/// exactly, including the terminal flag, winner, and side to move.
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    current: Stone,
    moves: Vec<Move>,
    winner: Option<Stone>,
    over: bool,
}

impl GameState {
    /// Create an empty game with Black to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current: Stone::Black,
            moves: Vec::with_capacity(64),
            winner: None,
            over: false,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Side to move
    #[inline]
    pub fn current(&self) -> Stone {
        self.current
    }

    /// Move history, oldest first
    #[inline]
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.over
    }

    /// The winning side, if a five was completed. `None` while the game is
    /// running and for draws.
    #[inline]
    pub fn winner(&self) -> Option<Stone> {
        self.winner
    }

    #[inline]
    pub fn is_draw(&self) -> bool {
        self.over && self.winner.is_none()
    }

    /// All empty intersections. Empty when the game is over.
    /// Only the random reference agent scans the full grid; the search
    /// works from its own candidate generator.
    pub fn legal_moves(&self) -> Vec<Pos> {
        if self.over {
            return Vec::new();
        }
        (0..super::TOTAL_CELLS)
            .map(Pos::from_index)
            .filter(|&p| self.board.is_empty(p))
            .collect()
    }

    /// Place a stone for the side to move and advance the turn.
    ///
    /// Updates the terminal flag and winner when the move completes a run of
    /// five or more, or fills the board.
    ///
    /// # Panics
    ///
    /// Panics if the game is over or the square is occupied. These are
    /// caller contract violations, never recoverable conditions.
    pub fn apply_move(&mut self, pos: Pos) {
        assert!(!self.over, "apply_move on a finished game");
        assert!(self.board.is_on_grid(pos), "{pos:?} is off the grid");
        assert!(
            self.board.is_empty(pos),
            "{} is occupied",
            format_point(pos)
        );

        let stone = self.current;
        self.board.place_stone(pos, stone);
        self.moves.push(Move { pos, stone });

        if is_winning_move(&self.board, pos, stone) {
            self.winner = Some(stone);
            self.over = true;
        } else if self.board.is_full() {
            self.over = true;
        }

        self.current = stone.opponent();
    }

    /// Undo the most recent move. Returns the undone move, or `None` if
    /// there is no history. Restores all derived state.
    pub fn undo_move(&mut self) -> Option<Move> {
        let mv = self.moves.pop()?;
        self.board.remove_stone(mv.pos);
        self.current = mv.stone;
        self.winner = None;
        self.over = false;
        Some(mv)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
