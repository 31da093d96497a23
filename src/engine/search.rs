//! Alpha-beta search core with quiescence, null-move pruning, late-move
//! reduction, transposition-table probing/storing, and the
//! iterative-deepening driver.
//!
//! Scores are always from White's perspective; White maximizes, Black
//! minimizes. Cancellation is cooperative: the wall-clock deadline is
//! polled at every node entry and at the top of each deepening round, never
//! preemptively, so the board's undo stack is always consistent.

use std::time::Instant;

use log::debug;

use crate::board::{Board, Color, Move};
use crate::tt::{Bound, TranspositionTable};

use super::eval::{evaluate, MATE_SCORE};
use super::order::{order_moves, order_tactical};
use super::{EngineConfig, SearchStats};

const INFINITY: i32 = MATE_SCORE + 1000;

/// Longest principal variation reconstructed from the table.
pub(crate) const PV_MAX_LEN: usize = 6;

/// Tuning knobs for the search core. Defaults are the shipping
/// configuration; tests switch individual heuristics off to compare the
/// search against a plain minimax reference.
#[derive(Clone, Debug)]
pub(crate) struct SearchParams {
    pub(crate) use_tt: bool,
    pub(crate) null_move: bool,
    pub(crate) null_move_reduction: u32,
    pub(crate) null_move_min_depth: u32,
    /// Null move is skipped once the side to move's non-pawn material drops
    /// to this threshold; zugzwang gets more likely as material comes off.
    pub(crate) null_move_material: i32,
    pub(crate) lmr: bool,
    pub(crate) lmr_min_depth: u32,
    /// Ordered-move index where reductions start.
    pub(crate) lmr_move_threshold: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        SearchParams {
            use_tt: true,
            null_move: true,
            null_move_reduction: 2,
            null_move_min_depth: 3,
            null_move_material: 1300,
            lmr: true,
            lmr_min_depth: 3,
            lmr_move_threshold: 3,
        }
    }
}

pub(crate) struct SearchContext<'a> {
    pub(crate) board: &'a mut Board,
    pub(crate) tt: &'a mut TranspositionTable,
    pub(crate) config: &'a EngineConfig,
    pub(crate) params: &'a SearchParams,
    pub(crate) deadline: Option<Instant>,
    pub(crate) aborted: bool,
    pub(crate) stats: SearchStats,
}

struct RootResult {
    completed: bool,
    best: Option<(Move, i32)>,
}

impl SearchContext<'_> {
    #[inline]
    fn deadline_exceeded(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Iterative deepening: search depth 1 upward, keeping the result of
    /// the deepest fully-completed round. Always yields a move when one
    /// exists, even if the very first round is cut short.
    pub(crate) fn run(&mut self, maximizing: bool) -> (Option<Move>, i32, u32) {
        let mut best: Option<(Move, i32)> = None;
        let mut partial: Option<(Move, i32)> = None;
        let mut completed_depth = 0;

        for depth in 1..=self.config.max_depth {
            if self.deadline_exceeded() {
                self.aborted = true;
                break;
            }

            let result = self.search_root(depth, maximizing);
            if result.completed {
                best = result.best;
                completed_depth = depth;
                if let Some((mv, eval)) = best {
                    debug!(
                        "depth {depth} complete: best {mv} eval {eval} nodes {}",
                        self.stats.nodes
                    );
                }
            } else {
                // A cut-short round still evaluated some moves fully; keep
                // the leader in case no round ever completes.
                partial = result.best.or(partial);
                break;
            }

            if self.deadline_exceeded() {
                break;
            }
        }

        match best.or(partial) {
            Some((mv, eval)) => (Some(mv), eval, completed_depth),
            None => (None, 0, 0),
        }
    }

    /// One root-level pass: every legal move searched at `depth - 1`.
    fn search_root(&mut self, depth: u32, maximizing: bool) -> RootResult {
        let moves = self.board.legal_moves();
        let tt_move = if self.params.use_tt {
            self.tt.probe(self.board.hash()).and_then(|e| e.best_move)
        } else {
            None
        };
        let ordered = order_moves(self.board, &moves, tt_move);

        let mut alpha = -INFINITY;
        let mut beta = INFINITY;
        let mut best: Option<(Move, i32)> = None;

        for mv in &ordered {
            self.board.make_move(mv);
            let score = self.search(depth - 1, alpha, beta, !maximizing, 1);
            self.board.unmake_move();

            if self.aborted {
                // Even a cut-short first evaluation beats returning nothing;
                // the driver falls back to it only when no round completes.
                if best.is_none() {
                    best = Some((*mv, score));
                }
                return RootResult {
                    completed: false,
                    best,
                };
            }

            let improved = match best {
                None => true,
                Some((_, best_score)) => {
                    if maximizing {
                        score > best_score
                    } else {
                        score < best_score
                    }
                }
            };
            if improved {
                best = Some((*mv, score));
            }
            if maximizing {
                alpha = alpha.max(score);
            } else {
                beta = beta.min(score);
            }
        }

        if self.params.use_tt {
            if let Some((mv, score)) = best {
                self.tt
                    .store(self.board.hash(), depth, score, Bound::Exact, Some(mv));
            }
        }

        RootResult {
            completed: true,
            best,
        }
    }

    /// The recursive alpha-beta core. Returns a White-perspective score and
    /// stores the node's result in the transposition table.
    pub(crate) fn search(
        &mut self,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
        ply: u32,
    ) -> i32 {
        self.stats.nodes += 1;

        // Sole cancellation point: a result produced after this trips is
        // discardable and callers must not trust it.
        if self.deadline_exceeded() {
            self.aborted = true;
            return evaluate(self.board);
        }

        if self.board.is_draw() {
            return 0;
        }

        let mut tt_move = None;
        if self.params.use_tt {
            if let Some(entry) = self.tt.probe(self.board.hash()) {
                tt_move = entry.best_move;
                if entry.depth >= depth {
                    match entry.bound {
                        Bound::Exact => return entry.score,
                        Bound::Lower => alpha = alpha.max(entry.score),
                        Bound::Upper => beta = beta.min(entry.score),
                    }
                    if alpha >= beta {
                        return entry.score;
                    }
                }
            }
        }
        let (alpha_in, beta_in) = (alpha, beta);

        if depth == 0 {
            return if self.config.quiescence_enabled {
                self.quiesce(alpha, beta, maximizing, 0)
            } else {
                evaluate(self.board)
            };
        }

        let moves = self.board.legal_moves();
        if moves.is_empty() {
            let side = self.board.side_to_move();
            return if self.board.is_check(side) {
                // Mated; prefer later mates for the loser, earlier for the
                // winner, by backing the score off one unit per ply.
                match side {
                    Color::White => -(MATE_SCORE - ply as i32),
                    Color::Black => MATE_SCORE - ply as i32,
                }
            } else {
                0
            };
        }

        let in_check = self.board.is_check(self.board.side_to_move());

        if let Some(cutoff) = self.try_null_move(depth, alpha, beta, maximizing, ply, in_check) {
            return cutoff;
        }

        let ordered = order_moves(self.board, &moves, tt_move);

        let mut best_score = if maximizing { -INFINITY } else { INFINITY };
        let mut best_move = None;

        for (i, mv) in ordered.iter().enumerate() {
            self.board.make_move(mv);

            let gives_check = self.board.is_check(self.board.side_to_move());
            let reduction = self.lmr_reduction(depth, i, mv, in_check, gives_check);

            let mut score = self.search(
                depth - 1 - reduction,
                alpha,
                beta,
                !maximizing,
                ply + 1,
            );

            // A reduced search that beats the bound is not trusted until it
            // survives a full-depth re-search.
            if reduction > 0 {
                let promising = if maximizing { score > alpha } else { score < beta };
                if promising && !self.aborted {
                    score = self.search(depth - 1, alpha, beta, !maximizing, ply + 1);
                }
            }

            self.board.unmake_move();

            if self.aborted {
                return best_score;
            }

            if maximizing {
                if score > best_score {
                    best_score = score;
                    best_move = Some(*mv);
                }
                alpha = alpha.max(best_score);
            } else {
                if score < best_score {
                    best_score = score;
                    best_move = Some(*mv);
                }
                beta = beta.min(best_score);
            }
            if alpha >= beta {
                break;
            }
        }

        if self.params.use_tt && !self.aborted {
            if let Some(mv) = best_move {
                let bound = bound_for(best_score, alpha_in, beta_in);
                self.tt
                    .store(self.board.hash(), depth, best_score, bound, Some(mv));
            }
        }

        best_score
    }

    /// Capture-only extension of the search at leaf nodes, so a position is
    /// never scored in the middle of a capture sequence.
    pub(crate) fn quiesce(&mut self, mut alpha: i32, mut beta: i32, maximizing: bool, qdepth: u32) -> i32 {
        self.stats.nodes += 1;
        self.stats.max_qdepth = self.stats.max_qdepth.max(qdepth);

        let stand_pat = evaluate(self.board);

        // Hard recursion bound; tactical shootouts stop here regardless of
        // pending captures.
        if qdepth >= self.config.max_quiescence_depth {
            return stand_pat;
        }

        // A side is never forced into a losing capture, so the static score
        // bounds the node.
        if maximizing {
            if stand_pat >= beta {
                return beta;
            }
            alpha = alpha.max(stand_pat);
        } else {
            if stand_pat <= alpha {
                return alpha;
            }
            beta = beta.min(stand_pat);
        }

        let mut moves = self.board.tactical_moves();
        if moves.is_empty() {
            return stand_pat;
        }
        order_tactical(&mut moves);

        for mv in &moves {
            self.board.make_move(mv);
            let score = self.quiesce(alpha, beta, !maximizing, qdepth + 1);
            self.board.unmake_move();

            if maximizing {
                alpha = alpha.max(score);
            } else {
                beta = beta.min(score);
            }
            if alpha >= beta {
                break;
            }
        }

        if maximizing {
            alpha
        } else {
            beta
        }
    }

    /// Skip a turn at reduced depth: if doing nothing already fails the
    /// bound, a real move would too. Off in check, near the endgame
    /// (zugzwang), and at low depth.
    fn try_null_move(
        &mut self,
        depth: u32,
        alpha: i32,
        beta: i32,
        maximizing: bool,
        ply: u32,
        in_check: bool,
    ) -> Option<i32> {
        if !self.params.null_move
            || depth < self.params.null_move_min_depth
            || in_check
            || self.board.non_pawn_material(self.board.side_to_move())
                <= self.params.null_move_material
        {
            return None;
        }

        let reduced = depth - 1 - self.params.null_move_reduction.min(depth - 1);
        let undo = self.board.make_null_move();
        let score = if maximizing {
            self.search(reduced, beta - 1, beta, false, ply + 1)
        } else {
            self.search(reduced, alpha, alpha + 1, true, ply + 1)
        };
        self.board.unmake_null_move(undo);

        if self.aborted {
            return None;
        }
        if maximizing && score >= beta {
            return Some(beta);
        }
        if !maximizing && score <= alpha {
            return Some(alpha);
        }
        None
    }

    /// Reduction for quiet, late-ordered moves at sufficient depth.
    fn lmr_reduction(
        &self,
        depth: u32,
        move_index: usize,
        mv: &Move,
        in_check: bool,
        gives_check: bool,
    ) -> u32 {
        let applies = self.params.lmr
            && depth >= self.params.lmr_min_depth
            && move_index >= self.params.lmr_move_threshold
            && !in_check
            && !gives_check
            && !mv.is_capture()
            && !mv.is_promotion();
        u32::from(applies)
    }
}

/// Bound classification for a finished node, relative to the window it was
/// searched with: fail-high is a lower bound, fail-low an upper bound.
pub(crate) fn bound_for(score: i32, alpha: i32, beta: i32) -> Bound {
    if score >= beta {
        Bound::Lower
    } else if score <= alpha {
        Bound::Upper
    } else {
        Bound::Exact
    }
}

/// Walk transposition-table best moves from the current position to rebuild
/// the expected line. Stops on a missing entry, an illegal move, a repeated
/// hash (cycle guard), or the length bound. The board is restored before
/// returning.
pub(crate) fn extract_pv(board: &mut Board, tt: &TranspositionTable, max_len: usize) -> Vec<Move> {
    let mut pv = Vec::with_capacity(max_len);
    let mut seen_hashes: Vec<u64> = Vec::with_capacity(max_len);

    while pv.len() < max_len {
        let hash = board.hash();
        if seen_hashes.contains(&hash) {
            break;
        }
        seen_hashes.push(hash);

        let Some(mv) = tt.probe(hash).and_then(|e| e.best_move) else {
            break;
        };
        if !board.legal_moves().contains(&mv) {
            break;
        }
        board.make_move(&mv);
        pv.push(mv);
    }

    for _ in 0..pv.len() {
        board.unmake_move();
    }
    pv
}
