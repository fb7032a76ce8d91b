//! Candidate move generation with forced-response shortcuts
//!
//! The generator returns the legal moves worth considering at a node.
//! Tactical positions collapse to a handful of legally mandatory replies;
//! quiet positions fall back to the neighborhood of the existing stones.

use crate::board::{Board, GameState, Pos, Stone, BOARD_SIZE, WIN_LENGTH};
use crate::eval::PatternScore;
use crate::rules::DIRECTIONS;

use super::ordering::move_heuristic;

/// Would placing `color` at `pos` immediately complete a run of five or
/// more? Scans the four axes through the candidate, so it catches both
/// contiguous fours and gapped shapes like `XX_XX`.
#[must_use]
pub fn is_winning_placement(board: &Board, pos: Pos, color: Stone) -> bool {
    if !board.is_empty(pos) {
        return false;
    }

    for &(dr, dc) in &DIRECTIONS {
        let mut count = 1;

        let mut r = i32::from(pos.row) + dr;
        let mut c = i32::from(pos.col) + dc;
        while Pos::is_valid(r, c) && board.get(Pos::new(r as u8, c as u8)) == color {
            count += 1;
            r += dr;
            c += dc;
        }

        r = i32::from(pos.row) - dr;
        c = i32::from(pos.col) - dc;
        while Pos::is_valid(r, c) && board.get(Pos::new(r as u8, c as u8)) == color {
            count += 1;
            r -= dr;
            c -= dc;
        }

        if count >= WIN_LENGTH {
            return true;
        }
    }
    false
}

/// Empty endpoints of `color`'s exactly-four groups: the squares that
/// complete (or block) the four. Groups of five and more are already wins
/// and are not reported here.
#[must_use]
pub fn four_extension_squares(board: &Board, color: Stone) -> Vec<Pos> {
    let mut squares = Vec::new();
    let Some(stones) = board.stones(color) else {
        return squares;
    };

    for pos in stones.iter_ones() {
        for &(dr, dc) in &DIRECTIONS {
            if !is_group_start(board, pos, dr, dc, color) {
                continue;
            }

            let (count, end_r, end_c) = walk_group(board, pos, dr, dc, color);
            if count != 4 {
                continue;
            }

            let before_r = i32::from(pos.row) - dr;
            let before_c = i32::from(pos.col) - dc;
            if Pos::is_valid(before_r, before_c)
                && board.is_empty(Pos::new(before_r as u8, before_c as u8))
            {
                squares.push(Pos::new(before_r as u8, before_c as u8));
            }
            if Pos::is_valid(end_r, end_c) && board.is_empty(Pos::new(end_r as u8, end_c as u8)) {
                squares.push(Pos::new(end_r as u8, end_c as u8));
            }
        }
    }

    squares
}

/// Endpoint squares and count of `color`'s open threes (exactly three in a
/// row, both ends empty). The endpoints are where one of those threats can
/// be blocked.
#[must_use]
pub fn open_three_squares(board: &Board, color: Stone) -> (Vec<Pos>, usize) {
    let mut squares = Vec::new();
    let mut count = 0;
    let Some(stones) = board.stones(color) else {
        return (squares, count);
    };

    for pos in stones.iter_ones() {
        for &(dr, dc) in &DIRECTIONS {
            if !is_group_start(board, pos, dr, dc, color) {
                continue;
            }

            let (n, end_r, end_c) = walk_group(board, pos, dr, dc, color);
            if n != 3 {
                continue;
            }

            let before_r = i32::from(pos.row) - dr;
            let before_c = i32::from(pos.col) - dc;
            let open_before = Pos::is_valid(before_r, before_c)
                && board.is_empty(Pos::new(before_r as u8, before_c as u8));
            let open_after =
                Pos::is_valid(end_r, end_c) && board.is_empty(Pos::new(end_r as u8, end_c as u8));

            if open_before && open_after {
                count += 1;
                squares.push(Pos::new(before_r as u8, before_c as u8));
                squares.push(Pos::new(end_r as u8, end_c as u8));
            }
        }
    }

    (squares, count)
}

/// True when `pos` is the first stone of its group along (dr, dc).
#[inline]
fn is_group_start(board: &Board, pos: Pos, dr: i32, dc: i32, color: Stone) -> bool {
    let r = i32::from(pos.row) - dr;
    let c = i32::from(pos.col) - dc;
    !(Pos::is_valid(r, c) && board.get(Pos::new(r as u8, c as u8)) == color)
}

/// Count the group from its start and return (length, one-past-end coords).
#[inline]
fn walk_group(board: &Board, start: Pos, dr: i32, dc: i32, color: Stone) -> (i32, i32, i32) {
    let mut count = 0;
    let mut r = i32::from(start.row);
    let mut c = i32::from(start.col);
    while Pos::is_valid(r, c) && board.get(Pos::new(r as u8, c as u8)) == color {
        count += 1;
        r += dr;
        c += dc;
    }
    (count, r, c)
}

/// Generate candidate moves for the side to move. The first rule that fires
/// wins:
///
/// 1. Empty board: the center intersection only.
/// 2. Opponent has an exactly-four group: its empty endpoints plus our own
///    fours' endpoints (we may still win first).
/// 3. We can complete five right now: only those winning placements.
/// 4. The opponent could complete five next move: only the squares we must
///    occupy.
/// 5. Opponent has two or more open threes: our strong counter-threats plus
///    the endpoints of those threes.
/// 6. Otherwise: every empty square within Chebyshev distance 2 of a stone,
///    distance-1 neighbors first.
#[must_use]
pub fn generate_candidates(state: &GameState) -> Vec<Pos> {
    if state.moves().is_empty() {
        return vec![Pos::center()];
    }

    let board = state.board();
    let current = state.current();
    let opponent = current.opponent();

    // Priority 2: forced response to an opponent four
    let opp_fours = four_extension_squares(board, opponent);
    if !opp_fours.is_empty() {
        let own_fours = four_extension_squares(board, current);
        let mut combined = Vec::new();
        for p in opp_fours.into_iter().chain(own_fours) {
            if board.is_empty(p) && !combined.contains(&p) {
                combined.push(p);
            }
        }
        if !combined.is_empty() {
            return combined;
        }
    }

    // Neighborhood of the existing stones, distance 1 listed before 2.
    // Stones iterate in index order so the result is deterministic.
    let mut near = [[false; BOARD_SIZE]; BOARD_SIZE];
    let mut far = [[false; BOARD_SIZE]; BOARD_SIZE];
    let mut dist1 = Vec::new();
    let mut dist2 = Vec::new();

    for pos in board.occupied() {
        for dr in -2i32..=2 {
            for dc in -2i32..=2 {
                if dr == 0 && dc == 0 {
                    continue;
                }
                let r = i32::from(pos.row) + dr;
                let c = i32::from(pos.col) + dc;
                if !Pos::is_valid(r, c) {
                    continue;
                }
                let p = Pos::new(r as u8, c as u8);
                if !board.is_empty(p) {
                    continue;
                }
                if dr.abs() <= 1 && dc.abs() <= 1 {
                    if !near[p.row as usize][p.col as usize] {
                        near[p.row as usize][p.col as usize] = true;
                        dist1.push(p);
                    }
                } else if !far[p.row as usize][p.col as usize] {
                    far[p.row as usize][p.col as usize] = true;
                    dist2.push(p);
                }
            }
        }
    }

    let mut candidates = dist1;
    candidates.extend(
        dist2
            .into_iter()
            .filter(|p| !near[p.row as usize][p.col as usize]),
    );

    // Priority 3: take an immediate win
    let wins: Vec<Pos> = candidates
        .iter()
        .copied()
        .filter(|&m| is_winning_placement(board, m, current))
        .collect();
    if !wins.is_empty() {
        return wins;
    }

    // Priority 4: deny the opponent's immediate win
    let blocks: Vec<Pos> = candidates
        .iter()
        .copied()
        .filter(|&m| is_winning_placement(board, m, opponent))
        .collect();
    if !blocks.is_empty() {
        return blocks;
    }

    // Priority 5: the opponent threatens a fork of open threes; restrict to
    // our own strong counter-threats and the endpoints of those threes
    let (opp_open3, opp_open3_count) = open_three_squares(board, opponent);
    if opp_open3_count >= 2 {
        let mut combined: Vec<Pos> = candidates
            .iter()
            .copied()
            .filter(|&m| move_heuristic(board, m, current) >= PatternScore::OPEN_FOUR)
            .collect();
        for p in opp_open3 {
            if board.is_empty(p) && !combined.contains(&p) {
                combined.push(p);
            }
        }
        if combined.len() >= 2 {
            return combined;
        }
    }

    candidates
}
