//! Pattern scores for Gomoku evaluation
//!
//! A group is a maximal run of same-color stones along one axis; it is
//! scored from its length and how many of its two ends touch an empty
//! on-grid square.

use crate::board::WIN_LENGTH;

/// Scoring weights for board patterns
pub struct PatternScore;

impl PatternScore {
    /// Terminal evaluation for a decided game
    pub const WIN: i32 = 1_000_000;

    /// Five in a row already on the board
    pub const FIVE: i32 = 100_000;
    /// Open four: _OOOO_ (two winning extensions, unstoppable)
    pub const OPEN_FOUR: i32 = 50_000;
    /// Closed four: XOOOO_ (one winning extension, must be answered)
    pub const CLOSED_FOUR: i32 = 12_000;
    /// Open three: _OOO_ (promotes to an open four)
    pub const OPEN_THREE: i32 = 6_000;
    /// Closed three
    pub const CLOSED_THREE: i32 = 1_500;
    /// Open two
    pub const OPEN_TWO: i32 = 1_000;
    /// Closed two
    pub const CLOSED_TWO: i32 = 100;

    /// Two simultaneous open threes for one side
    pub const FORK_BONUS: i32 = 5_000;
    /// A four plus an open three for one side: the defender is overwhelmed
    pub const DOUBLE_THREAT_BONUS: i32 = 9_000;
    /// Four stones in a five-cell window with an interior gap (e.g. XX_XX):
    /// a win-in-1 threat the contiguous-group scan does not see
    pub const BROKEN_FOUR: i32 = 10_000;

    /// Moves whose ordering heuristic reaches this are forcing and are
    /// never dropped by candidate caps
    pub const FORCING_THRESHOLD: i32 = 12_000;
}

/// Look up the score for a consecutive group with the given open ends.
/// Groups of five or more score [`PatternScore::FIVE`] regardless of ends;
/// dead groups (no open end, under five) score zero.
#[inline]
pub fn pattern_score(count: i32, open_ends: i32) -> i32 {
    if count >= WIN_LENGTH {
        return PatternScore::FIVE;
    }
    match (count, open_ends) {
        (4, 2) => PatternScore::OPEN_FOUR,
        (4, 1) => PatternScore::CLOSED_FOUR,
        (3, 2) => PatternScore::OPEN_THREE,
        (3, 1) => PatternScore::CLOSED_THREE,
        (2, 2) => PatternScore::OPEN_TWO,
        (2, 1) => PatternScore::CLOSED_TWO,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_five_ignores_open_ends() {
        assert_eq!(pattern_score(5, 0), PatternScore::FIVE);
        assert_eq!(pattern_score(5, 1), PatternScore::FIVE);
        assert_eq!(pattern_score(5, 2), PatternScore::FIVE);
        assert_eq!(pattern_score(6, 2), PatternScore::FIVE); // overline
    }

    #[test]
    fn test_table_values() {
        assert_eq!(pattern_score(4, 2), 50_000);
        assert_eq!(pattern_score(4, 1), 12_000);
        assert_eq!(pattern_score(3, 2), 6_000);
        assert_eq!(pattern_score(3, 1), 1_500);
        assert_eq!(pattern_score(2, 2), 1_000);
        assert_eq!(pattern_score(2, 1), 100);
    }

    #[test]
    fn test_dead_groups_score_zero() {
        assert_eq!(pattern_score(4, 0), 0);
        assert_eq!(pattern_score(3, 0), 0);
        assert_eq!(pattern_score(2, 0), 0);
        assert_eq!(pattern_score(1, 2), 0);
        assert_eq!(pattern_score(1, 1), 0);
    }

    #[test]
    fn test_score_hierarchy() {
        assert!(PatternScore::WIN > PatternScore::FIVE);
        assert!(PatternScore::FIVE > PatternScore::OPEN_FOUR);
        assert!(PatternScore::OPEN_FOUR > PatternScore::CLOSED_FOUR);
        assert!(PatternScore::CLOSED_FOUR > PatternScore::OPEN_THREE);
        assert!(PatternScore::OPEN_THREE > PatternScore::CLOSED_THREE);
        assert!(PatternScore::CLOSED_THREE > PatternScore::OPEN_TWO);
        assert!(PatternScore::OPEN_TWO > PatternScore::CLOSED_TWO);
    }
}
