//! Heuristic evaluation function for Gomoku board positions
//!
//! The evaluator is pure and reports from an absolute viewpoint: positive
//! scores favor Black (the first mover), negative scores favor White. The
//! search multiplies by the side-to-move color where it needs a relative
//! value.

use crate::board::{Board, GameState, Pos, Stone};
use crate::rules::DIRECTIONS;

use super::patterns::{pattern_score, PatternScore};

/// Evaluate the position statically.
///
/// Terminal positions short-circuit to `±PatternScore::WIN` (0 for a draw).
/// Otherwise every maximal same-color group along the four axes is scored
/// from the pattern table, fork bonuses reward double threats, and a window
/// scan adds the broken-four bonus for gapped win-in-1 shapes.
#[must_use]
pub fn evaluate(state: &GameState) -> i32 {
    if state.is_over() {
        return match state.winner() {
            Some(Stone::Black) => PatternScore::WIN,
            Some(Stone::White) => -PatternScore::WIN,
            Some(Stone::Empty) | None => 0,
        };
    }

    let board = state.board();

    let (black_score, black_open3, black_fours) = side_patterns(board, Stone::Black);
    let (white_score, white_open3, white_fours) = side_patterns(board, Stone::White);

    let mut score = black_score - white_score;

    // Fork bonuses: two threats of which only one can be answered
    if black_open3 >= 2 {
        score += PatternScore::FORK_BONUS;
    }
    if white_open3 >= 2 {
        score -= PatternScore::FORK_BONUS;
    }
    if black_fours >= 1 && black_open3 >= 1 {
        score += PatternScore::DOUBLE_THREAT_BONUS;
    }
    if white_fours >= 1 && white_open3 >= 1 {
        score -= PatternScore::DOUBLE_THREAT_BONUS;
    }

    score + broken_four_bonus(board)
}

/// Score all of one side's groups and count its open threes and fours.
///
/// A stone only starts a group when its predecessor along the axis is not
/// the same color, so each maximal group is counted exactly once per axis.
fn side_patterns(board: &Board, color: Stone) -> (i32, i32, i32) {
    let Some(stones) = board.stones(color) else {
        return (0, 0, 0);
    };

    let mut score = 0;
    let mut open_threes = 0;
    let mut fours = 0;

    for pos in stones.iter_ones() {
        for &(dr, dc) in &DIRECTIONS {
            let prev_r = i32::from(pos.row) - dr;
            let prev_c = i32::from(pos.col) - dc;
            if Pos::is_valid(prev_r, prev_c)
                && board.get(Pos::new(prev_r as u8, prev_c as u8)) == color
            {
                continue; // not the start of this group
            }

            // Count consecutive stones forward
            let mut count = 0;
            let mut r = i32::from(pos.row);
            let mut c = i32::from(pos.col);
            while Pos::is_valid(r, c) && board.get(Pos::new(r as u8, c as u8)) == color {
                count += 1;
                r += dr;
                c += dc;
            }

            let mut open_ends = 0;
            if Pos::is_valid(prev_r, prev_c)
                && board.get(Pos::new(prev_r as u8, prev_c as u8)) == Stone::Empty
            {
                open_ends += 1;
            }
            // (r, c) is one past the last stone
            if Pos::is_valid(r, c) && board.get(Pos::new(r as u8, c as u8)) == Stone::Empty {
                open_ends += 1;
            }

            score += pattern_score(count, open_ends);
            if count == 3 && open_ends == 2 {
                open_threes += 1;
            } else if count >= 4 {
                fours += 1;
            }
        }
    }

    (score, open_threes, fours)
}

/// Score broken-four patterns: four stones of one color in a five-cell
/// axial window with one empty cell and an interior gap, e.g. `XX_XX`.
///
/// Windows are only counted when they start at a stone of the scored color,
/// which keeps shifted duplicates out; contiguous fours are skipped because
/// the group scan already scored them.
fn broken_four_bonus(board: &Board) -> i32 {
    if board.occupied_count() < 4 {
        return 0;
    }

    let mut bonus = 0;

    for &(dr, dc) in &DIRECTIONS {
        for pos in board.occupied() {
            let mut cells = [Stone::Empty; 5];
            let mut valid = true;
            let mut r = i32::from(pos.row);
            let mut c = i32::from(pos.col);
            for cell in &mut cells {
                if !Pos::is_valid(r, c) {
                    valid = false;
                    break;
                }
                *cell = board.get(Pos::new(r as u8, c as u8));
                r += dr;
                c += dc;
            }
            if !valid {
                continue;
            }

            for color in [Stone::Black, Stone::White] {
                if cells[0] != color {
                    continue;
                }
                let mine = cells.iter().filter(|&&s| s == color).count();
                let theirs = cells
                    .iter()
                    .filter(|&&s| s != Stone::Empty && s != color)
                    .count();
                if mine != 4 || theirs > 0 {
                    continue;
                }

                // Contiguous fours span exactly 4 cells and are already
                // scored by the group scan; the span starts at index 0
                // because the window starts on a stone of this color
                let mut last = 0;
                for (i, &s) in cells.iter().enumerate() {
                    if s == color {
                        last = i;
                    }
                }
                if last + 1 == 4 {
                    continue;
                }

                let sign = if color == Stone::Black { 1 } else { -1 };
                bonus += sign * PatternScore::BROKEN_FOUR;
            }
        }
    }

    bonus
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::GameState;

    /// Apply alternating moves: Black stones from `blacks`, White from `whites`.
    fn build_state(blacks: &[Pos], whites: &[Pos]) -> GameState {
        let mut state = GameState::new();
        let mut b = blacks.iter();
        let mut w = whites.iter();
        loop {
            match (b.next(), w.next()) {
                (Some(&bp), Some(&wp)) => {
                    state.apply_move(bp);
                    state.apply_move(wp);
                }
                (Some(&bp), None) => state.apply_move(bp),
                (None, Some(&wp)) => state.apply_move(wp),
                (None, None) => break,
            }
        }
        state
    }

    #[test]
    fn test_empty_board_is_zero() {
        assert_eq!(evaluate(&GameState::new()), 0);
    }

    #[test]
    fn test_terminal_scores() {
        // Black completes a five
        let state = build_state(
            &[
                Pos::new(7, 3),
                Pos::new(7, 4),
                Pos::new(7, 5),
                Pos::new(7, 6),
                Pos::new(7, 7),
            ],
            &[Pos::new(0, 0), Pos::new(0, 2), Pos::new(0, 4), Pos::new(0, 6)],
        );
        assert!(state.is_over());
        assert_eq!(evaluate(&state), PatternScore::WIN);
    }

    #[test]
    fn test_white_win_is_negative() {
        let mut state = GameState::new();
        // Black scatters, White builds the five
        let blacks = [
            Pos::new(0, 0),
            Pos::new(0, 2),
            Pos::new(0, 4),
            Pos::new(0, 6),
            Pos::new(0, 8),
        ];
        let whites = [
            Pos::new(7, 3),
            Pos::new(7, 4),
            Pos::new(7, 5),
            Pos::new(7, 6),
            Pos::new(7, 7),
        ];
        for i in 0..5 {
            state.apply_move(blacks[i]);
            state.apply_move(whites[i]);
        }
        assert_eq!(state.winner(), Some(Stone::White));
        assert_eq!(evaluate(&state), -PatternScore::WIN);
    }

    #[test]
    fn test_color_swap_negates_score() {
        // Same shape, colors swapped, should negate exactly
        let shape_a = [Pos::new(7, 4), Pos::new(7, 5), Pos::new(7, 6)];
        let shape_b = [Pos::new(2, 2), Pos::new(4, 9), Pos::new(11, 3)];

        let as_black = build_state(&shape_a, &shape_b);
        let as_white = build_state(&shape_b, &shape_a);

        assert_eq!(evaluate(&as_black), -evaluate(&as_white));
        assert!(evaluate(&as_black) > 0);
    }

    #[test]
    fn test_open_three_outscores_closed_three() {
        let open = build_state(
            &[Pos::new(7, 4), Pos::new(7, 5), Pos::new(7, 6)],
            &[Pos::new(0, 0)],
        );
        // Same three with a White stone on one end
        let closed = build_state(
            &[Pos::new(7, 4), Pos::new(7, 5), Pos::new(7, 6)],
            &[Pos::new(7, 3)],
        );
        assert!(evaluate(&open) > evaluate(&closed));
    }

    #[test]
    fn test_group_counted_once_per_axis() {
        // A single horizontal open two scores exactly OPEN_TWO: the group
        // must not be re-counted from its second stone.
        let state = build_state(&[Pos::new(7, 6), Pos::new(7, 7)], &[]);
        assert_eq!(evaluate(&state), PatternScore::OPEN_TWO);
    }

    #[test]
    fn test_edge_group_has_one_open_end() {
        // Two Black stones flush against the left edge
        let state = build_state(&[Pos::new(7, 0), Pos::new(7, 1)], &[]);
        assert_eq!(evaluate(&state), PatternScore::CLOSED_TWO);
    }

    #[test]
    fn test_fork_bonus_double_open_three() {
        // Black: horizontal open three and vertical open three, sharing no
        // stones; White scattered far away with no adjacency.
        let state = build_state(
            &[
                Pos::new(5, 5),
                Pos::new(5, 6),
                Pos::new(5, 7),
                Pos::new(8, 2),
                Pos::new(9, 2),
                Pos::new(10, 2),
            ],
            &[
                Pos::new(14, 0),
                Pos::new(14, 2),
                Pos::new(14, 4),
                Pos::new(14, 6),
                Pos::new(14, 8),
                Pos::new(14, 10),
            ],
        );
        // White's isolated singles score nothing
        assert_eq!(
            evaluate(&state),
            2 * PatternScore::OPEN_THREE + PatternScore::FORK_BONUS
        );
    }

    #[test]
    fn test_double_threat_bonus_four_plus_three() {
        // Black has a closed four and an open three; bonus applies on top.
        let state = build_state(
            &[
                // four, blocked on the left by White below
                Pos::new(7, 4),
                Pos::new(7, 5),
                Pos::new(7, 6),
                Pos::new(7, 7),
                // separate open three
                Pos::new(10, 2),
                Pos::new(11, 2),
                Pos::new(12, 2),
            ],
            &[
                Pos::new(7, 3), // closes the four
                Pos::new(0, 0),
                Pos::new(0, 2),
                Pos::new(0, 4),
                Pos::new(0, 6),
                Pos::new(0, 8),
                Pos::new(0, 10),
            ],
        );
        assert_eq!(
            evaluate(&state),
            PatternScore::CLOSED_FOUR
                + PatternScore::OPEN_THREE
                + PatternScore::DOUBLE_THREAT_BONUS
        );
    }

    #[test]
    fn test_broken_four_bonus() {
        // White: XX_XX on row 8 -> the gap at (8,9) wins immediately
        let state = build_state(
            &[Pos::new(0, 0), Pos::new(0, 2), Pos::new(0, 4), Pos::new(0, 6)],
            &[Pos::new(8, 7), Pos::new(8, 8), Pos::new(8, 10), Pos::new(8, 11)],
        );
        // White's two pairs score as open twos, plus the broken-four bonus
        assert_eq!(
            evaluate(&state),
            -(2 * PatternScore::OPEN_TWO) - PatternScore::BROKEN_FOUR
        );
    }

    #[test]
    fn test_contiguous_four_not_double_counted_as_broken() {
        // A plain open four must not also receive the broken-four bonus
        let state = build_state(
            &[
                Pos::new(7, 4),
                Pos::new(7, 5),
                Pos::new(7, 6),
                Pos::new(7, 7),
            ],
            &[Pos::new(0, 0), Pos::new(0, 2), Pos::new(0, 4)],
        );
        assert_eq!(evaluate(&state), PatternScore::OPEN_FOUR);
    }
}
