//! Move ordering: per-move heuristic, tiered sort keys, and candidate caps

use crate::board::{Board, Pos, Stone, BOARD_SIZE};
use crate::eval::{pattern_score, PatternScore};
use crate::rules::DIRECTIONS;

/// Cutoff-weight accumulator per intersection, shared by both sides within
/// one move selection. Each beta cutoff adds `1 << depth` for the cutting
/// move; used as an ordering tiebreaker.
pub type HistoryTable = [[i32; BOARD_SIZE]; BOARD_SIZE];

#[inline]
fn history_at(history: &HistoryTable, pos: Pos) -> i32 {
    history[pos.row as usize][pos.col as usize]
}

/// Fast per-move heuristic: simulate the four axes through `pos` and sum the
/// pattern scores for **both** sides with equal weight. The symmetry keeps
/// blocking moves ranked on par with offensive ones.
#[must_use]
pub fn move_heuristic(board: &Board, pos: Pos, current: Stone) -> i32 {
    let mut score = 0;

    for &(dr, dc) in &DIRECTIONS {
        for color in [current, current.opponent()] {
            let mut count = 1;
            let mut open_ends = 0;

            let mut r = i32::from(pos.row) + dr;
            let mut c = i32::from(pos.col) + dc;
            while Pos::is_valid(r, c) && board.get(Pos::new(r as u8, c as u8)) == color {
                count += 1;
                r += dr;
                c += dc;
            }
            if Pos::is_valid(r, c) && board.get(Pos::new(r as u8, c as u8)) == Stone::Empty {
                open_ends += 1;
            }

            r = i32::from(pos.row) - dr;
            c = i32::from(pos.col) - dc;
            while Pos::is_valid(r, c) && board.get(Pos::new(r as u8, c as u8)) == color {
                count += 1;
                r -= dr;
                c -= dc;
            }
            if Pos::is_valid(r, c) && board.get(Pos::new(r as u8, c as u8)) == Stone::Empty {
                open_ends += 1;
            }

            score += pattern_score(count, open_ends);
        }
    }

    score
}

/// Tiered sort key, ascending: smaller keys are tried first. Heuristic and
/// history values are stored negated so the derived order ranks higher
/// scores earlier within a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    /// Best move from the transposition table
    Table,
    /// Creates or blocks a five
    Winning(i32),
    /// Open four, closed four, or open three
    Forcing(i32),
    /// Caused a beta cutoff at this depth in a sibling node
    Killer(i32),
    /// Everything else, by heuristic plus history
    Quiet(i32),
}

/// Compute the sort key for one candidate.
#[must_use]
pub fn sort_key(
    board: &Board,
    pos: Pos,
    current: Stone,
    tt_move: Option<Pos>,
    killers: &[Pos],
    history: &HistoryTable,
) -> SortKey {
    if tt_move == Some(pos) {
        return SortKey::Table;
    }
    let h = move_heuristic(board, pos, current);
    if h >= PatternScore::FIVE {
        return SortKey::Winning(-h);
    }
    if h >= PatternScore::OPEN_THREE {
        return SortKey::Forcing(-h);
    }
    if killers.contains(&pos) {
        return SortKey::Killer(-history_at(history, pos));
    }
    SortKey::Quiet(-(h + history_at(history, pos)))
}

/// Sort candidates best-first. The sort is stable, so equal keys keep the
/// generator's order and searches stay reproducible.
#[must_use]
pub fn order_moves(
    board: &Board,
    current: Stone,
    candidates: &[Pos],
    tt_move: Option<Pos>,
    killers: &[Pos],
    history: &HistoryTable,
) -> Vec<Pos> {
    let mut ordered = candidates.to_vec();
    // Cached: the heuristic walks four axes per move, once per candidate
    ordered.sort_by_cached_key(|&m| sort_key(board, m, current, tt_move, killers, history));
    ordered
}

/// Truncate an ordered candidate list to `cap` moves, always retaining
/// forcing moves (heuristic >= 12_000) even when they fall past the cap.
/// Forcing moves are prepended, then the capped prefix, deduplicated.
#[must_use]
pub fn cap_preserving_forcing(
    board: &Board,
    current: Stone,
    ordered: Vec<Pos>,
    cap: usize,
) -> Vec<Pos> {
    if ordered.len() <= cap {
        return ordered;
    }

    let mut result: Vec<Pos> = ordered
        .iter()
        .copied()
        .filter(|&m| move_heuristic(board, m, current) >= PatternScore::FORCING_THRESHOLD)
        .collect();
    for &m in &ordered[..cap] {
        if !result.contains(&m) {
            result.push(m);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::GameState;

    fn board_with(blacks: &[Pos], whites: &[Pos]) -> Board {
        let mut board = Board::new();
        for &p in blacks {
            board.place_stone(p, Stone::Black);
        }
        for &p in whites {
            board.place_stone(p, Stone::White);
        }
        board
    }

    #[test]
    fn test_heuristic_symmetric_between_sides() {
        // Completing our four and blocking their four rate identically
        let own_four = board_with(
            &[Pos::new(7, 3), Pos::new(7, 4), Pos::new(7, 5), Pos::new(7, 6)],
            &[],
        );
        let their_four = board_with(
            &[],
            &[Pos::new(7, 3), Pos::new(7, 4), Pos::new(7, 5), Pos::new(7, 6)],
        );
        let pos = Pos::new(7, 7);
        assert_eq!(
            move_heuristic(&own_four, pos, Stone::Black),
            move_heuristic(&their_four, pos, Stone::Black)
        );
    }

    #[test]
    fn test_heuristic_five_completion() {
        let board = board_with(
            &[Pos::new(7, 3), Pos::new(7, 4), Pos::new(7, 5), Pos::new(7, 6)],
            &[],
        );
        // (7,7) makes five in a row for Black
        assert!(move_heuristic(&board, Pos::new(7, 7), Stone::Black) >= PatternScore::FIVE);
    }

    #[test]
    fn test_heuristic_isolated_move_is_small() {
        let board = board_with(&[Pos::new(0, 0)], &[]);
        let h = move_heuristic(&board, Pos::new(10, 10), Stone::Black);
        assert!(h < PatternScore::OPEN_TWO);
    }

    #[test]
    fn test_sort_key_tier_order() {
        assert!(SortKey::Table < SortKey::Winning(-200_000));
        assert!(SortKey::Winning(-100_000) < SortKey::Forcing(-50_000));
        assert!(SortKey::Forcing(-6_000) < SortKey::Killer(0));
        assert!(SortKey::Killer(-10) < SortKey::Quiet(-1_000_000));
        // Within a tier, higher heuristic (more negative key) first
        assert!(SortKey::Winning(-200_000) < SortKey::Winning(-100_000));
    }

    #[test]
    fn test_tt_move_ordered_first() {
        let mut state = GameState::new();
        state.apply_move(Pos::new(7, 7));
        state.apply_move(Pos::new(8, 8));

        let candidates = [Pos::new(6, 6), Pos::new(6, 7), Pos::new(9, 9)];
        let history = [[0; BOARD_SIZE]; BOARD_SIZE];
        let ordered = order_moves(
            state.board(),
            state.current(),
            &candidates,
            Some(Pos::new(9, 9)),
            &[],
            &history,
        );
        assert_eq!(ordered[0], Pos::new(9, 9));
    }

    #[test]
    fn test_winning_moves_beat_killers() {
        // Black can complete a five at (7,7); a killer elsewhere must not
        // outrank it.
        let board = board_with(
            &[Pos::new(7, 3), Pos::new(7, 4), Pos::new(7, 5), Pos::new(7, 6)],
            &[Pos::new(6, 3), Pos::new(6, 4)],
        );
        let candidates = [Pos::new(10, 10), Pos::new(7, 7)];
        let history = [[0; BOARD_SIZE]; BOARD_SIZE];
        let ordered = order_moves(
            &board,
            Stone::Black,
            &candidates,
            None,
            &[Pos::new(10, 10)],
            &history,
        );
        assert_eq!(ordered[0], Pos::new(7, 7));
    }

    #[test]
    fn test_history_breaks_quiet_ties() {
        let board = board_with(&[Pos::new(0, 14)], &[]);
        // Two moves far from the stone with identical (zero) heuristics
        let a = Pos::new(14, 0);
        let b = Pos::new(14, 2);
        let mut history = [[0; BOARD_SIZE]; BOARD_SIZE];
        history[b.row as usize][b.col as usize] = 64;

        let ordered = order_moves(&board, Stone::Black, &[a, b], None, &[], &history);
        assert_eq!(ordered[0], b);
    }

    #[test]
    fn test_stable_order_for_equal_keys() {
        let board = board_with(&[Pos::new(0, 14)], &[]);
        let candidates = [Pos::new(14, 0), Pos::new(14, 2), Pos::new(14, 4)];
        let history = [[0; BOARD_SIZE]; BOARD_SIZE];
        let ordered = order_moves(&board, Stone::Black, &candidates, None, &[], &history);
        assert_eq!(ordered.to_vec(), candidates.to_vec());
    }

    #[test]
    fn test_cap_keeps_forcing_moves() {
        // Black four on row 7; (7,7) completes it and must survive any cap
        let board = board_with(
            &[Pos::new(7, 3), Pos::new(7, 4), Pos::new(7, 5), Pos::new(7, 6)],
            &[],
        );
        let mut ordered: Vec<Pos> = (0..10).map(|c| Pos::new(0, c)).collect();
        ordered.push(Pos::new(7, 7)); // past the cap

        let capped = cap_preserving_forcing(&board, Stone::Black, ordered, 4);
        assert!(capped.contains(&Pos::new(7, 7)));
        // Forcing move is prepended ahead of the retained prefix
        assert_eq!(capped[0], Pos::new(7, 7));
        assert_eq!(capped.len(), 5);
    }

    #[test]
    fn test_cap_noop_under_limit() {
        let board = Board::new();
        let ordered = vec![Pos::new(1, 1), Pos::new(2, 2)];
        let capped = cap_preserving_forcing(&board, Stone::Black, ordered.clone(), 20);
        assert_eq!(capped, ordered);
    }
}
