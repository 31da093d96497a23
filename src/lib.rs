pub mod board;
pub mod engine;
pub mod tt;

mod zobrist;

#[cfg(feature = "serde")]
pub mod api;

pub use board::{Board, Color, Move, Piece, Square};
pub use engine::{Difficulty, Engine, EngineConfig, SearchOutcome, SearchStats};
pub use tt::{Bound, TranspositionTable, TtEntry};
