//! Saved-game records
//!
//! Games persist as small JSON files: `date` (ISO 8601), the two player
//! names, a result string, and the moves as coordinate strings like `"H8"`.
//! Replaying a record rebuilds a [`GameState`] move by move.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::board::{format_point, parse_coordinate, GameState};

/// Default directory for saved games, relative to the working directory.
pub const SAVED_GAMES_DIR: &str = "saved_games";

/// One finished (or suspended) game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    pub date: String,
    pub black: String,
    pub white: String,
    pub result: String,
    pub moves: Vec<String>,
}

impl GameRecord {
    /// Snapshot a game. The result string is derived from the state unless
    /// the game is still running.
    #[must_use]
    pub fn from_state(state: &GameState, black: &str, white: &str) -> Self {
        let result = if state.is_over() {
            match state.winner() {
                Some(side) => format!("{side} wins"),
                None => "Draw".to_string(),
            }
        } else {
            "In progress".to_string()
        };

        Self {
            date: Local::now().to_rfc3339(),
            black: black.to_string(),
            white: white.to_string(),
            result,
            moves: state.moves().iter().map(|m| format_point(m.pos)).collect(),
        }
    }

    /// Rebuild the game with moves replayed up to `move_index` inclusive.
    /// `-1` yields the empty board. Unparseable move strings are skipped;
    /// replay stops early if the record somehow continues past a win.
    #[must_use]
    pub fn replay_to_move(&self, move_index: isize) -> GameState {
        let mut state = GameState::new();
        let upto = (move_index + 1).max(0) as usize;
        for text in self.moves.iter().take(upto.min(self.moves.len())) {
            if state.is_over() {
                break;
            }
            if let Some(pos) = parse_coordinate(text) {
                state.apply_move(pos);
            }
        }
        state
    }
}

/// Write a record into `dir` as `<timestamp>_<black>_vs_<white>.json`.
/// Creates the directory if needed; returns the file path.
pub fn save_game(record: &GameRecord, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("creating save directory {}", dir.display()))?;

    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    let filename = format!(
        "{stamp}_{}_vs_{}.json",
        sanitize(&record.black),
        sanitize(&record.white)
    );
    let path = dir.join(filename);

    let json = serde_json::to_string_pretty(record).context("serializing game record")?;
    fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

/// Load a record from a JSON file.
pub fn load_game(path: &Path) -> Result<GameRecord> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

/// Saved-game files in `dir`, newest first. An absent directory is just an
/// empty list.
pub fn list_saved_games(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    files.reverse();
    files
}

fn sanitize(name: &str) -> String {
    name.chars()
        .filter(|&c| c != '(' && c != ')')
        .map(|c| if c == ' ' { '_' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Pos, Stone};

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("gomoku_records_{}_{tag}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    fn finished_game() -> GameState {
        let mut state = GameState::new();
        for i in 0..4 {
            state.apply_move(Pos::new(7, 3 + i));
            state.apply_move(Pos::new(0, i));
        }
        state.apply_move(Pos::new(7, 7)); // Black wins
        state
    }

    #[test]
    fn test_record_from_state() {
        let state = finished_game();
        let record = GameRecord::from_state(&state, "Alice", "Bob");

        assert_eq!(record.black, "Alice");
        assert_eq!(record.white, "Bob");
        assert_eq!(record.result, "Black wins");
        assert_eq!(record.moves.len(), 9);
        assert_eq!(record.moves[0], "D8"); // (7,3)
        assert_eq!(record.moves[8], "H8"); // (7,7)
    }

    #[test]
    fn test_record_in_progress() {
        let mut state = GameState::new();
        state.apply_move(Pos::new(7, 7));
        let record = GameRecord::from_state(&state, "A", "B");
        assert_eq!(record.result, "In progress");
    }

    #[test]
    fn test_replay_to_move() {
        let state = finished_game();
        let record = GameRecord::from_state(&state, "A", "B");

        let empty = record.replay_to_move(-1);
        assert!(empty.moves().is_empty());

        let after_first = record.replay_to_move(0);
        assert_eq!(after_first.moves().len(), 1);
        assert_eq!(after_first.board().get(Pos::new(7, 3)), Stone::Black);

        let full = record.replay_to_move(record.moves.len() as isize - 1);
        assert!(full.is_over());
        assert_eq!(full.winner(), Some(Stone::Black));
    }

    #[test]
    fn test_replay_skips_bad_moves() {
        let record = GameRecord {
            date: String::new(),
            black: "A".into(),
            white: "B".into(),
            result: String::new(),
            moves: vec!["H8".into(), "??".into(), "I9".into()],
        };
        let state = record.replay_to_move(2);
        assert_eq!(state.moves().len(), 2);
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = temp_dir("round_trip");
        let state = finished_game();
        let record = GameRecord::from_state(&state, "Engine (d=6)", "Random Bot");

        let path = save_game(&record, &dir).unwrap();
        assert!(path.file_name().unwrap().to_str().unwrap().contains("Engine"));
        assert!(!path.to_str().unwrap().contains('('));

        let loaded = load_game(&path).unwrap();
        assert_eq!(loaded.moves, record.moves);
        assert_eq!(loaded.result, record.result);

        let listed = list_saved_games(&dir);
        assert_eq!(listed, vec![path]);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_missing_file_errors() {
        assert!(load_game(Path::new("/nonexistent/game.json")).is_err());
    }

    #[test]
    fn test_list_missing_dir_is_empty() {
        assert!(list_saved_games(Path::new("/nonexistent/dir")).is_empty());
    }
}
