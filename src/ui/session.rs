//! Play-screen session: game state, mode, and the AI worker thread

use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use crate::agent::{AdvancedAgent, Agent};
use crate::board::{GameState, Pos, Stone};
use crate::record::{self, GameRecord};
use crate::rules::find_winning_line;
use crate::search::SearchOutcome;

/// Who is playing which color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Human against the engine
    HumanVsEngine { human: Stone },
    /// Hotseat: both sides by hand
    HumanVsHuman,
}

impl Default for GameMode {
    fn default() -> Self {
        GameMode::HumanVsEngine {
            human: Stone::Black,
        }
    }
}

/// AI computation state. The engine runs on a worker thread and is handed
/// back through the channel together with its chosen move.
enum AiState {
    Idle,
    Thinking {
        receiver: Receiver<(Pos, AdvancedAgent)>,
        started: Instant,
    },
}

/// One interactive game.
pub struct GameSession {
    pub state: GameState,
    pub mode: GameMode,
    pub message: Option<String>,
    pub last_search: Option<SearchOutcome>,
    pub last_search_time: Option<Duration>,
    depth: u32,
    engine: Option<AdvancedAgent>,
    ai_state: AiState,
}

impl GameSession {
    pub fn new(mode: GameMode, depth: u32) -> Self {
        Self {
            state: GameState::new(),
            mode,
            message: None,
            last_search: None,
            last_search_time: None,
            depth,
            engine: Some(AdvancedAgent::with_depth(depth)),
            ai_state: AiState::Idle,
        }
    }

    pub fn reset(&mut self, mode: GameMode) {
        *self = Self::new(mode, self.depth);
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Change the engine depth. Takes effect at the next engine move; a
    /// search already in flight is left to finish at the old depth.
    pub fn set_depth(&mut self, depth: u32) {
        if self.depth != depth {
            self.depth = depth;
            if !self.is_ai_thinking() {
                self.engine = Some(AdvancedAgent::with_depth(depth));
            }
        }
    }

    pub fn is_human_turn(&self) -> bool {
        match self.mode {
            GameMode::HumanVsEngine { human } => self.state.current() == human,
            GameMode::HumanVsHuman => true,
        }
    }

    pub fn is_ai_turn(&self) -> bool {
        !self.state.is_over() && !self.is_human_turn()
    }

    pub fn is_ai_thinking(&self) -> bool {
        matches!(self.ai_state, AiState::Thinking { .. })
    }

    pub fn thinking_elapsed(&self) -> Option<Duration> {
        match &self.ai_state {
            AiState::Thinking { started, .. } => Some(started.elapsed()),
            AiState::Idle => None,
        }
    }

    /// Five winning stones to highlight once the game is decided.
    pub fn winning_line(&self) -> Option<[Pos; 5]> {
        let winner = self.state.winner()?;
        let last = self.state.moves().last()?;
        find_winning_line(self.state.board(), last.pos, winner)
    }

    /// Place a human stone.
    pub fn try_place(&mut self, pos: Pos) -> Result<(), String> {
        if self.state.is_over() {
            return Err("Game is over".to_string());
        }
        if self.is_ai_thinking() {
            return Err("Engine is thinking".to_string());
        }
        if !self.is_human_turn() {
            return Err("Not your turn".to_string());
        }
        if !self.state.board().is_empty(pos) {
            return Err("Intersection is occupied".to_string());
        }

        self.state.apply_move(pos);
        self.message = None;
        Ok(())
    }

    /// Kick off the engine on a worker thread if it is the engine's move.
    pub fn start_ai_if_needed(&mut self) {
        if !self.is_ai_turn() || self.is_ai_thinking() {
            return;
        }

        let mut engine = self
            .engine
            .take()
            .unwrap_or_else(|| AdvancedAgent::with_depth(self.depth));
        let mut state = self.state.clone();
        let (tx, rx) = channel();

        thread::spawn(move || {
            let pos = engine.select_move(&mut state);
            let _ = tx.send((pos, engine));
        });

        self.ai_state = AiState::Thinking {
            receiver: rx,
            started: Instant::now(),
        };
    }

    /// Poll the worker thread; applies the engine's move when ready.
    pub fn poll_ai(&mut self) {
        let outcome = match &self.ai_state {
            AiState::Thinking { receiver, started } => match receiver.try_recv() {
                Ok((pos, engine)) => Some((pos, engine, started.elapsed())),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => {
                    self.ai_state = AiState::Idle;
                    self.message = Some("Engine thread failed".to_string());
                    return;
                }
            },
            AiState::Idle => None,
        };

        if let Some((pos, engine, elapsed)) = outcome {
            self.ai_state = AiState::Idle;
            self.last_search = engine.last_outcome().copied();
            self.last_search_time = Some(elapsed);
            self.engine = Some(engine);
            if !self.state.is_over() && self.state.board().is_empty(pos) {
                self.state.apply_move(pos);
            }
        }
    }

    /// Undo the last move; in engine games, the engine's reply and the
    /// human move come back together.
    pub fn undo(&mut self) {
        if self.is_ai_thinking() {
            return;
        }
        let count = match self.mode {
            GameMode::HumanVsEngine { .. } if self.state.moves().len() >= 2 => 2,
            _ => 1,
        };
        for _ in 0..count {
            self.state.undo_move();
        }
        self.message = None;
    }

    /// Save the current game under `saved_games/`.
    pub fn save(&mut self) -> Result<PathBuf, String> {
        let (black, white) = self.player_names();
        let record = GameRecord::from_state(&self.state, &black, &white);
        record::save_game(&record, &PathBuf::from(record::SAVED_GAMES_DIR))
            .map_err(|e| e.to_string())
    }

    fn player_names(&self) -> (String, String) {
        let engine_name = format!("AdvancedAgent d={}", self.depth);
        match self.mode {
            GameMode::HumanVsEngine {
                human: Stone::Black,
            } => ("Human".to_string(), engine_name),
            GameMode::HumanVsEngine { .. } => (engine_name, "Human".to_string()),
            GameMode::HumanVsHuman => ("Black".to_string(), "White".to_string()),
        }
    }
}
