//! Cross-module tests for the game state lifecycle

use super::{GameState, Pos, Stone, BOARD_SIZE, TOTAL_CELLS};

#[test]
fn test_new_game_is_empty() {
    let state = GameState::new();
    assert_eq!(state.current(), Stone::Black);
    assert!(!state.is_over());
    assert!(state.winner().is_none());
    assert!(state.moves().is_empty());
    assert_eq!(state.legal_moves().len(), TOTAL_CELLS);
}

#[test]
fn test_moves_alternate_sides() {
    let mut state = GameState::new();
    state.apply_move(Pos::new(7, 7));
    assert_eq!(state.current(), Stone::White);
    state.apply_move(Pos::new(7, 8));
    assert_eq!(state.current(), Stone::Black);

    assert_eq!(state.moves()[0].stone, Stone::Black);
    assert_eq!(state.moves()[1].stone, Stone::White);
}

#[test]
fn test_stone_count_parity() {
    // Black's stone count equals White's or exceeds it by exactly one,
    // determined by the parity of moves applied.
    let mut state = GameState::new();
    let moves = [
        Pos::new(7, 7),
        Pos::new(8, 8),
        Pos::new(7, 8),
        Pos::new(8, 7),
        Pos::new(7, 9),
    ];
    for (i, &pos) in moves.iter().enumerate() {
        state.apply_move(pos);
        let black = state.board().stones(Stone::Black).unwrap().count();
        let white = state.board().stones(Stone::White).unwrap().count();
        assert_eq!(black + white, i as u32 + 1);
        assert_eq!(black - white, (i as u32 + 1) % 2);
    }
}

#[test]
fn test_apply_undo_restores_state_exactly() {
    let mut state = GameState::new();
    state.apply_move(Pos::new(7, 7));
    state.apply_move(Pos::new(8, 8));

    let board_before = *state.board();
    let current_before = state.current();
    let move_count = state.moves().len();

    state.apply_move(Pos::new(9, 9));
    let undone = state.undo_move().unwrap();

    assert_eq!(undone.pos, Pos::new(9, 9));
    assert_eq!(undone.stone, Stone::Black);
    assert_eq!(*state.board(), board_before);
    assert_eq!(state.current(), current_before);
    assert_eq!(state.moves().len(), move_count);
    assert!(!state.is_over());
}

#[test]
fn test_undo_on_empty_history_returns_none() {
    let mut state = GameState::new();
    assert!(state.undo_move().is_none());
}

#[test]
fn test_win_sets_terminal_and_winner() {
    let mut state = GameState::new();
    // Black builds a horizontal five on row 7, White plays far away
    for i in 0..4 {
        state.apply_move(Pos::new(7, 3 + i));
        state.apply_move(Pos::new(0, i));
    }
    state.apply_move(Pos::new(7, 7));

    assert!(state.is_over());
    assert_eq!(state.winner(), Some(Stone::Black));
    assert!(!state.is_draw());
    assert!(state.legal_moves().is_empty());
}

#[test]
fn test_overline_is_a_win() {
    let mut state = GameState::new();
    // Black: _BBBB_B -> filling the gap makes six in a row
    for i in 0..4 {
        state.apply_move(Pos::new(7, 3 + i));
        state.apply_move(Pos::new(0, i));
    }
    state.apply_move(Pos::new(7, 8));
    state.apply_move(Pos::new(0, 4));
    state.apply_move(Pos::new(7, 7)); // completes six: cols 3..=8

    assert!(state.is_over());
    assert_eq!(state.winner(), Some(Stone::Black));
}

#[test]
fn test_undo_reopens_finished_game() {
    let mut state = GameState::new();
    for i in 0..4 {
        state.apply_move(Pos::new(7, 3 + i));
        state.apply_move(Pos::new(0, i));
    }
    state.apply_move(Pos::new(7, 7));
    assert!(state.is_over());

    state.undo_move();
    assert!(!state.is_over());
    assert!(state.winner().is_none());
    assert_eq!(state.current(), Stone::Black);
}

#[test]
#[should_panic(expected = "off the grid")]
fn test_apply_off_grid_panics() {
    let mut state = GameState::new();
    state.apply_move(Pos { row: 15, col: 7 });
}

#[test]
#[should_panic(expected = "occupied")]
fn test_apply_on_occupied_square_panics() {
    let mut state = GameState::new();
    state.apply_move(Pos::new(7, 7));
    state.apply_move(Pos::new(7, 7));
}

#[test]
#[should_panic(expected = "finished")]
fn test_apply_after_terminal_panics() {
    let mut state = GameState::new();
    for i in 0..4 {
        state.apply_move(Pos::new(7, 3 + i));
        state.apply_move(Pos::new(0, i));
    }
    state.apply_move(Pos::new(7, 7)); // Black wins
    state.apply_move(Pos::new(10, 10));
}

#[test]
fn test_full_board_without_five_is_a_draw() {
    // Tile the board so no axis ever carries five of a color: the color of
    // (r, c) follows ((2r + c) / 2) % 2, which caps every run at two.
    let mut blacks = Vec::new();
    let mut whites = Vec::new();
    for r in 0..BOARD_SIZE as u8 {
        for c in 0..BOARD_SIZE as u8 {
            if ((2 * r as usize + c as usize) / 2) % 2 == 0 {
                blacks.push(Pos::new(r, c));
            } else {
                whites.push(Pos::new(r, c));
            }
        }
    }
    assert_eq!(blacks.len(), whites.len() + 1);

    let mut state = GameState::new();
    for i in 0..TOTAL_CELLS {
        let pos = if i % 2 == 0 { blacks[i / 2] } else { whites[i / 2] };
        state.apply_move(pos);
    }

    assert!(state.is_over());
    assert!(state.is_draw());
    assert!(state.winner().is_none());
}
