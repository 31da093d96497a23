//! The move-selection engine: static evaluation, move ordering, alpha-beta
//! search with quiescence, iterative deepening under a wall-clock budget,
//! and the difficulty tiers that configure all of it.
//!
//! One [`Engine`] instance owns the process-wide transposition table; the
//! table persists across calls, so later searches inherit move ordering
//! from earlier ones. Each `find_best_move` call is one search session:
//! synchronous, single-threaded, cancelled only by its own deadline
//! polling.

pub mod eval;

mod order;
mod search;


use std::time::{Duration, Instant};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::{Board, Color, Move};
use crate::tt::TranspositionTable;

use search::{extract_pv, SearchContext, PV_MAX_LEN};

pub(crate) use search::SearchParams;

/// Default transposition-table ceiling, in entries.
pub const DEFAULT_TT_ENTRIES: usize = 1 << 20;

/// Strength tier requested by the host.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// The search configuration for this tier.
    #[must_use]
    pub fn config(self) -> EngineConfig {
        match self {
            Difficulty::Easy => EngineConfig {
                max_depth: 2,
                time_limit_ms: 500,
                randomness: 0.30,
                quiescence_enabled: false,
                max_quiescence_depth: 0,
            },
            Difficulty::Medium => EngineConfig {
                max_depth: 3,
                time_limit_ms: 1500,
                randomness: 0.10,
                quiescence_enabled: true,
                max_quiescence_depth: 4,
            },
            Difficulty::Hard => EngineConfig {
                max_depth: 4,
                time_limit_ms: 3000,
                randomness: 0.0,
                quiescence_enabled: true,
                max_quiescence_depth: 6,
            },
        }
    }
}

/// Per-session search configuration, immutable once derived.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    pub max_depth: u32,
    /// Wall-clock budget; 0 means no deadline.
    pub time_limit_ms: u64,
    /// Probability in [0, 1] of playing a uniformly random legal move
    /// instead of searching. Drawn once per call; the deliberate weakening
    /// mechanism of the easier tiers.
    pub randomness: f64,
    pub quiescence_enabled: bool,
    pub max_quiescence_depth: u32,
}

/// Counters from one search session.
#[derive(Clone, Copy, Debug, Default)]
pub struct SearchStats {
    /// Nodes visited, quiescence included.
    pub nodes: u64,
    /// Deepest fully-completed iteration.
    pub depth: u32,
    /// Deepest quiescence recursion reached.
    pub max_qdepth: u32,
}

/// The result of one `find_best_move` session.
#[derive(Clone, Debug)]
pub struct SearchOutcome {
    /// `None` only when the position has no legal moves.
    pub best_move: Option<Move>,
    /// Expected continuation, best move first. Empty when no search ran.
    pub pv: Vec<Move>,
    /// Centipawns from White's perspective; 0 when no search ran.
    pub eval: i32,
    pub stats: SearchStats,
}

impl SearchOutcome {
    fn without_search(best_move: Option<Move>) -> Self {
        SearchOutcome {
            best_move,
            pv: Vec::new(),
            eval: 0,
            stats: SearchStats::default(),
        }
    }
}

/// The engine instance. Owns the transposition table, which is reused
/// across sessions and cleared wholesale when it outgrows its ceiling.
pub struct Engine {
    tt: TranspositionTable,
}

impl Engine {
    #[must_use]
    pub fn new() -> Self {
        Engine::with_tt_capacity(DEFAULT_TT_ENTRIES)
    }

    #[must_use]
    pub fn with_tt_capacity(max_entries: usize) -> Self {
        Engine {
            tt: TranspositionTable::new(max_entries),
        }
    }

    /// Number of live transposition-table entries.
    #[must_use]
    pub fn tt_len(&self) -> usize {
        self.tt.len()
    }

    /// Select a move for the side to move under `config`.
    ///
    /// Shortcuts, in order: no legal move (no-move outcome), exactly one
    /// legal move (returned without searching), the difficulty randomness
    /// draw (uniform random legal move). Otherwise iterative deepening runs
    /// until `config.max_depth` or the deadline, whichever comes first, and
    /// the deepest completed round wins. The board comes back unchanged.
    pub fn find_best_move(&mut self, board: &mut Board, config: &EngineConfig) -> SearchOutcome {
        self.find_best_move_with_params(board, config, &SearchParams::default())
    }

    pub(crate) fn find_best_move_with_params(
        &mut self,
        board: &mut Board,
        config: &EngineConfig,
        params: &SearchParams,
    ) -> SearchOutcome {
        let moves = board.legal_moves();
        if moves.is_empty() {
            return SearchOutcome::without_search(None);
        }
        if moves.len() == 1 {
            return SearchOutcome::without_search(Some(moves[0]));
        }

        if config.randomness > 0.0 {
            let mut rng = rand::thread_rng();
            if rng.gen::<f64>() < config.randomness {
                if let Some(&mv) = moves.choose(&mut rng) {
                    return SearchOutcome::without_search(Some(mv));
                }
            }
        }

        let deadline = (config.time_limit_ms > 0)
            .then(|| Instant::now() + Duration::from_millis(config.time_limit_ms));
        let maximizing = board.side_to_move() == Color::White;

        let mut ctx = SearchContext {
            board: &mut *board,
            tt: &mut self.tt,
            config,
            params,
            deadline,
            aborted: false,
            stats: SearchStats::default(),
        };
        let (best_move, eval, depth) = ctx.run(maximizing);
        let mut stats = ctx.stats;
        stats.depth = depth;

        let pv = extract_pv(board, &self.tt, PV_MAX_LEN);

        SearchOutcome {
            best_move,
            pv,
            eval,
            stats,
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}
