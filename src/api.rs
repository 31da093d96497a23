//! The message-passing session boundary exposed to the host.
//!
//! One request describes one search session: a FEN position and a
//! difficulty tier. The response carries the chosen move (or `null` when
//! the position has no legal moves), the principal variation, and the
//! centipawn evaluation, all in coordinate notation. Malformed FEN fails
//! the session before any search work starts.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::{Board, FenError, Move};
use crate::engine::{Difficulty, Engine};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MoveRequest {
    pub fen: String,
    pub difficulty: Difficulty,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MoveResponse {
    /// Selected move in coordinate notation; `None` only with no legal moves.
    #[serde(rename = "move")]
    pub best_move: Option<String>,
    /// Expected continuation, best move first.
    pub pv: Vec<String>,
    /// Centipawns from White's perspective; 0 when no search was performed.
    pub eval: i32,
}

/// A rejected session. Nothing is retried; the request simply fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The request's FEN field does not describe a valid position.
    InvalidFen(FenError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidFen(err) => write!(f, "invalid FEN: {err}"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::InvalidFen(err) => Some(err),
        }
    }
}

impl From<FenError> for EngineError {
    fn from(err: FenError) -> Self {
        EngineError::InvalidFen(err)
    }
}

impl Engine {
    /// Run one search session for `request` and package the answer.
    pub fn respond(&mut self, request: &MoveRequest) -> Result<MoveResponse, EngineError> {
        let mut board = Board::try_from_fen(&request.fen)?;
        let config = request.difficulty.config();
        let outcome = self.find_best_move(&mut board, &config);

        Ok(MoveResponse {
            best_move: outcome.best_move.map(|mv| mv.to_string()),
            pv: outcome.pv.iter().map(Move::to_string).collect(),
            eval: outcome.eval,
        })
    }
}
