//! Iteratively-deepened principal-variation search
//!
//! Negamax alpha-beta with the classical refinements: Zobrist-keyed
//! transposition table, killer moves, history heuristic, late-move
//! reductions, a quiescence extension for forcing lines, and aspiration
//! windows around the previous iteration's score.

use log::debug;

use crate::board::{format_point, GameState, Pos, Stone, BOARD_SIZE};
use crate::eval::{evaluate, PatternScore};

use super::candidates::{generate_candidates, is_winning_placement};
use super::ordering::{
    cap_preserving_forcing, move_heuristic, order_moves, HistoryTable,
};
use super::tt::{EntryFlag, TranspositionTable};
use super::zobrist::ZobristTable;
use super::INF;

/// Default maximum iterative-deepening depth
pub const DEFAULT_DEPTH: u32 = 6;

/// Candidate caps; forcing moves always survive them
const MAX_CANDIDATES_ROOT: usize = 30;
const MAX_CANDIDATES_INNER: usize = 20;

/// Aspiration half-window around the previous iteration's score
const ASPIRATION_WINDOW: i32 = 500;

/// Quiescence: extra plies past the horizon, forcing moves only
const QUIESCENCE_DEPTH: i32 = 2;
const MAX_QUIESCENCE_FORCING: usize = 5;

/// Late-move reduction thresholds
const LMR_MIN_DEPTH: i32 = 3;
const LMR_MIN_INDEX: usize = 4;
const LMR_QUIET_THRESHOLD: i32 = PatternScore::OPEN_THREE;

const TT_SIZE_MB: usize = 16;

/// Result of a completed move selection.
#[derive(Debug, Clone, Copy)]
pub struct SearchOutcome {
    pub best_move: Pos,
    /// Negamax score from the mover's viewpoint
    pub score: i32,
    /// Deepest completed iteration
    pub depth: u32,
    /// Nodes visited, quiescence included
    pub nodes: u64,
}

/// The search driver. One instance per player; every call to
/// [`select_move`](Self::select_move) starts from a fresh transposition
/// table, killer slots, and history table.
pub struct Searcher {
    zobrist: ZobristTable,
    tt: TranspositionTable,
    killers: Vec<[Option<Pos>; 2]>,
    history: HistoryTable,
    nodes: u64,
    max_depth: u32,
}

impl Searcher {
    #[must_use]
    pub fn new(max_depth: u32) -> Self {
        assert!(max_depth >= 1, "search depth must be positive");
        Self {
            zobrist: ZobristTable::new(),
            tt: TranspositionTable::new(TT_SIZE_MB),
            killers: Vec::new(),
            history: [[0; BOARD_SIZE]; BOARD_SIZE],
            nodes: 0,
            max_depth,
        }
    }

    #[must_use]
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Pick a move for the side to move. The position must not be terminal.
    /// All internal `apply_move` calls are paired with `undo_move`, so the
    /// position is unchanged on return.
    #[must_use]
    pub fn select_move(&mut self, state: &mut GameState) -> Pos {
        self.search(state).best_move
    }

    /// Like [`select_move`](Self::select_move), with score and node counts.
    #[must_use]
    pub fn search(&mut self, state: &mut GameState) -> SearchOutcome {
        assert!(!state.is_over(), "select_move on a finished game");
        let me = state.current();
        let color: i32 = if me == Stone::Black { 1 } else { -1 };

        let mut candidates = generate_candidates(state);
        assert!(!candidates.is_empty(), "no legal moves to choose from");

        // Win in one: verified by actually applying the move
        for &m in &candidates {
            state.apply_move(m);
            let won = state.is_over() && state.winner() == Some(me);
            state.undo_move();
            if won {
                debug!("win in one at {}", format_point(m));
                return SearchOutcome {
                    best_move: m,
                    score: PatternScore::WIN,
                    depth: 0,
                    nodes: 0,
                };
            }
        }

        // Fresh search memory for this selection
        self.tt.clear();
        self.history = [[0; BOARD_SIZE]; BOARD_SIZE];
        self.killers = vec![[None; 2]; self.max_depth as usize + 2];
        self.nodes = 0;

        // Cap root candidates once before deepening
        if candidates.len() > MAX_CANDIDATES_ROOT {
            let ordered = order_moves(state.board(), me, &candidates, None, &[], &self.history);
            candidates =
                cap_preserving_forcing(state.board(), me, ordered, MAX_CANDIDATES_ROOT);
        }

        let root_hash = self.zobrist.hash(state);
        let mut best_move = candidates[0];
        let mut best_score = 0;
        let mut prev_score = 0;

        for depth in 1..=self.max_depth {
            let d = depth as i32;
            let (score, mv) = if depth <= 2 {
                // Shallow scores are too noisy to aspire around
                self.root_search(state, &candidates, d, -INF, INF, color, root_hash)
            } else {
                let alpha = prev_score - ASPIRATION_WINDOW;
                let beta = prev_score + ASPIRATION_WINDOW;
                let (score, mv) =
                    self.root_search(state, &candidates, d, alpha, beta, color, root_hash);
                if score <= alpha || score >= beta {
                    // Fail low/high: redo with the full window
                    self.root_search(state, &candidates, d, -INF, INF, color, root_hash)
                } else {
                    (score, mv)
                }
            };

            if let Some(m) = mv {
                best_move = m;
                best_score = score;
            }
            prev_score = score;
            debug!(
                "depth {depth}: best {} score {score} nodes {}",
                format_point(best_move),
                self.nodes
            );
        }

        SearchOutcome {
            best_move,
            score: best_score,
            depth: self.max_depth,
            nodes: self.nodes,
        }
    }

    /// One iteration over the root candidates with PVS.
    #[allow(clippy::too_many_arguments)]
    fn root_search(
        &mut self,
        state: &mut GameState,
        candidates: &[Pos],
        depth: i32,
        mut alpha: i32,
        beta: i32,
        color: i32,
        root_hash: u64,
    ) -> (i32, Option<Pos>) {
        let current = state.current();
        let tt_move = self.tt.best_move(root_hash);
        let killers = self.valid_killers(state, depth);

        let ordered = order_moves(
            state.board(),
            current,
            candidates,
            tt_move,
            &killers,
            &self.history,
        );
        let ordered =
            cap_preserving_forcing(state.board(), current, ordered, MAX_CANDIDATES_ROOT);

        let mut best_score = -INF;
        let mut best_move = ordered.first().copied();

        for (i, &m) in ordered.iter().enumerate() {
            let child_hash = self.zobrist.toggle(root_hash, m, current);
            state.apply_move(m);

            let score = if i == 0 {
                -self.pvs(state, depth - 1, -beta, -alpha, -color, child_hash)
            } else {
                let mut s = -self.pvs(state, depth - 1, -alpha - 1, -alpha, -color, child_hash);
                if s > alpha && s < beta {
                    s = -self.pvs(state, depth - 1, -beta, -alpha, -color, child_hash);
                }
                s
            };

            state.undo_move();

            if score > best_score {
                best_score = score;
                best_move = Some(m);
            }
            alpha = alpha.max(score);
            if alpha >= beta {
                break;
            }
        }

        (best_score, best_move)
    }

    /// Interior PVS node. Returns the negamax value for the side to move
    /// (`color` is +1 when Black is to move, -1 otherwise).
    fn pvs(
        &mut self,
        state: &mut GameState,
        depth: i32,
        mut alpha: i32,
        beta: i32,
        color: i32,
        hash: u64,
    ) -> i32 {
        self.nodes += 1;

        if state.is_over() {
            return color * evaluate(state);
        }
        if depth == 0 {
            return self.quiesce(state, alpha, beta, color, QUIESCENCE_DEPTH);
        }

        let mut tt_move = None;
        if let Some(hit) = self.tt.probe(hash, depth, alpha, beta) {
            if let Some(score) = hit.score {
                return score;
            }
            tt_move = hit.best_move;
        }

        let candidates = generate_candidates(state);
        if candidates.is_empty() {
            return color * evaluate(state);
        }

        let current = state.current();
        let killers = self.valid_killers(state, depth);

        let ordered = order_moves(
            state.board(),
            current,
            &candidates,
            tt_move,
            &killers,
            &self.history,
        );
        let ordered =
            cap_preserving_forcing(state.board(), current, ordered, MAX_CANDIDATES_INNER);

        let orig_alpha = alpha;
        let mut best = -INF;
        let mut best_move = None;

        for (i, &m) in ordered.iter().enumerate() {
            // LMR applies to late quiet moves that are neither the TT move
            // nor a killer; decided before the stone goes down
            let reduce = depth >= LMR_MIN_DEPTH
                && i >= LMR_MIN_INDEX
                && tt_move != Some(m)
                && !killers.contains(&m)
                && move_heuristic(state.board(), m, current) < LMR_QUIET_THRESHOLD;

            let child_hash = self.zobrist.toggle(hash, m, current);
            state.apply_move(m);

            let score = if i == 0 {
                -self.pvs(state, depth - 1, -beta, -alpha, -color, child_hash)
            } else {
                let mut s = if reduce {
                    let reduced =
                        -self.pvs(state, depth - 2, -alpha - 1, -alpha, -color, child_hash);
                    if reduced > alpha {
                        // Reduction failed high: retry at full depth
                        -self.pvs(state, depth - 1, -alpha - 1, -alpha, -color, child_hash)
                    } else {
                        reduced
                    }
                } else {
                    -self.pvs(state, depth - 1, -alpha - 1, -alpha, -color, child_hash)
                };
                if s > alpha && s < beta {
                    // Null window failed high inside the window: full re-search
                    s = -self.pvs(state, depth - 1, -beta, -alpha, -color, child_hash);
                }
                s
            };

            state.undo_move();

            if score > best {
                best = score;
                best_move = Some(m);
            }
            alpha = alpha.max(score);
            if alpha >= beta {
                self.record_cutoff(m, depth);
                break;
            }
        }

        let flag = if best <= orig_alpha {
            EntryFlag::UpperBound
        } else if best >= beta {
            EntryFlag::LowerBound
        } else {
            EntryFlag::Exact
        };
        self.tt.store(hash, depth, best, flag, best_move);

        best
    }

    /// Quiescence: stand pat on quiet positions, otherwise follow only
    /// forcing continuations (wins first, then four-level threats) for a
    /// few extra plies so the horizon does not cut a tactic in half.
    fn quiesce(
        &mut self,
        state: &mut GameState,
        mut alpha: i32,
        beta: i32,
        color: i32,
        qdepth: i32,
    ) -> i32 {
        self.nodes += 1;

        if state.is_over() {
            return color * evaluate(state);
        }

        let stand_pat = color * evaluate(state);
        if stand_pat >= beta {
            return stand_pat;
        }
        if qdepth == 0 {
            return stand_pat;
        }
        alpha = alpha.max(stand_pat);

        let candidates = generate_candidates(state);
        let current = state.current();

        let mut forcing = Vec::new();
        let mut threats = Vec::new();
        for &m in &candidates {
            if is_winning_placement(state.board(), m, current) {
                forcing.push(m);
            } else if move_heuristic(state.board(), m, current) >= PatternScore::FORCING_THRESHOLD
            {
                threats.push(m);
            }
        }
        forcing.extend(threats);
        forcing.truncate(MAX_QUIESCENCE_FORCING);

        if forcing.is_empty() {
            return stand_pat; // quiet position
        }

        for &m in &forcing {
            state.apply_move(m);
            let score = -self.quiesce(state, -beta, -alpha, -color, qdepth - 1);
            state.undo_move();

            if score >= beta {
                return score;
            }
            alpha = alpha.max(score);
        }

        alpha
    }

    /// Killer slots for a depth, restricted to squares still empty here.
    fn valid_killers(&self, state: &GameState, depth: i32) -> Vec<Pos> {
        self.killers
            .get(depth as usize)
            .map(|slots| {
                slots
                    .iter()
                    .flatten()
                    .copied()
                    .filter(|&k| state.board().is_empty(k))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Beta cutoff bookkeeping: shift the killer slots and bump the cutting
    /// move's history weight by `2^depth`.
    fn record_cutoff(&mut self, m: Pos, depth: i32) {
        if let Some(slots) = self.killers.get_mut(depth as usize) {
            if slots[0] != Some(m) {
                slots[1] = slots[0];
                slots[0] = Some(m);
            }
        }
        self.history[m.row as usize][m.col as usize] += 1 << depth;
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH)
    }
}
