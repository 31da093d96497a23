//! Static evaluation in centipawns, positive favoring White regardless of
//! whose turn it is.
//!
//! Terms: material, piece-square tables interpolated between middlegame and
//! endgame by a phase weight from remaining non-pawn material, pawn
//! structure (doubled and isolated files), a king pawn-shield bonus that
//! fades toward the endgame, and a mobility count. Mobility counts legal
//! replies for the side to move only; a turn-neutral differential would
//! need a second move generation per evaluation.

use crate::board::{Board, Color, Piece};

/// Magnitude of a checkmate score.
pub const MATE_SCORE: i32 = 30_000;

/// Scores at or beyond this magnitude announce a forced mate.
pub const MATE_THRESHOLD: i32 = 29_000;

pub const DRAW_SCORE: i32 = 0;

pub(crate) const MATERIAL_MG: [i32; 6] = [100, 320, 330, 500, 900, 0];
pub(crate) const MATERIAL_EG: [i32; 6] = [110, 300, 320, 520, 910, 0];

/// Phase contribution per piece type; 24 = all minor/major pieces on board.
const PHASE_WEIGHTS: [i32; 6] = [0, 1, 1, 2, 4, 0];
const PHASE_MAX: i32 = 24;

const DOUBLED_PAWN_PENALTY: i32 = 15;
const ISOLATED_PAWN_PENALTY: i32 = 10;
const SHIELD_BONUS: i32 = 10;
const MOBILITY_WEIGHT: i32 = 2;

#[rustfmt::skip]
const PAWN_MG: [i32; 64] = [
      0,   0,   0,   0,   0,   0,   0,   0,
     50,  50,  50,  50,  50,  50,  50,  50,
     10,  10,  20,  30,  30,  20,  10,  10,
      5,   5,  10,  25,  25,  10,   5,   5,
      0,   0,   0,  20,  20,   0,   0,   0,
      5,  -5, -10,   0,   0, -10,  -5,   5,
      5,  10,  10, -20, -20,  10,  10,   5,
      0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const PAWN_EG: [i32; 64] = [
      0,   0,   0,   0,   0,   0,   0,   0,
     80,  80,  80,  80,  80,  80,  80,  80,
     50,  50,  50,  50,  50,  50,  50,  50,
     30,  30,  30,  30,  30,  30,  30,  30,
     15,  15,  15,  15,  15,  15,  15,  15,
      5,   5,   5,   5,   5,   5,   5,   5,
      5,   5,   5,   5,   5,   5,   5,   5,
      0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const KNIGHT_TABLE: [i32; 64] = [
    -50, -40, -30, -30, -30, -30, -40, -50,
    -40, -20,   0,   0,   0,   0, -20, -40,
    -30,   0,  10,  15,  15,  10,   0, -30,
    -30,   5,  15,  20,  20,  15,   5, -30,
    -30,   0,  15,  20,  20,  15,   0, -30,
    -30,   5,  10,  15,  15,  10,   5, -30,
    -40, -20,   0,   5,   5,   0, -20, -40,
    -50, -40, -30, -30, -30, -30, -40, -50,
];

#[rustfmt::skip]
const BISHOP_TABLE: [i32; 64] = [
    -20, -10, -10, -10, -10, -10, -10, -20,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -10,   0,   5,  10,  10,   5,   0, -10,
    -10,   5,   5,  10,  10,   5,   5, -10,
    -10,   0,  10,  10,  10,  10,   0, -10,
    -10,  10,  10,  10,  10,  10,  10, -10,
    -10,   5,   0,   0,   0,   0,   5, -10,
    -20, -10, -10, -10, -10, -10, -10, -20,
];

#[rustfmt::skip]
const ROOK_TABLE: [i32; 64] = [
      0,   0,   0,   0,   0,   0,   0,   0,
      5,  10,  10,  10,  10,  10,  10,   5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
      0,   0,   0,   5,   5,   0,   0,   0,
];

#[rustfmt::skip]
const QUEEN_TABLE: [i32; 64] = [
    -20, -10, -10,  -5,  -5, -10, -10, -20,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -10,   0,   5,   5,   5,   5,   0, -10,
     -5,   0,   5,   5,   5,   5,   0,  -5,
      0,   0,   5,   5,   5,   5,   0,  -5,
    -10,   5,   5,   5,   5,   5,   0, -10,
    -10,   0,   5,   0,   0,   0,   0, -10,
    -20, -10, -10,  -5,  -5, -10, -10, -20,
];

#[rustfmt::skip]
const KING_MG: [i32; 64] = [
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -20, -30, -30, -40, -40, -30, -30, -20,
    -10, -20, -20, -20, -20, -20, -20, -10,
     20,  20,   0,   0,   0,   0,  20,  20,
     20,  30,  10,   0,   0,  10,  30,  20,
];

#[rustfmt::skip]
const KING_EG: [i32; 64] = [
    -50, -40, -30, -20, -20, -30, -40, -50,
    -30, -20, -10,   0,   0, -10, -20, -30,
    -30, -10,  20,  30,  30,  20, -10, -30,
    -30, -10,  30,  40,  40,  30, -10, -30,
    -30, -10,  30,  40,  40,  30, -10, -30,
    -30, -10,  20,  30,  30,  20, -10, -30,
    -30, -30,   0,   0,   0,   0, -30, -30,
    -50, -30, -30, -30, -30, -30, -30, -50,
];

/// Tables are written rank 8 first (White's point of view), so a white piece
/// indexes with the rank flipped and a black piece indexes directly.
const PST_MG: [[i32; 64]; 6] = [
    PAWN_MG,
    KNIGHT_TABLE,
    BISHOP_TABLE,
    ROOK_TABLE,
    QUEEN_TABLE,
    KING_MG,
];

const PST_EG: [[i32; 64]; 6] = [
    PAWN_EG,
    KNIGHT_TABLE,
    BISHOP_TABLE,
    ROOK_TABLE,
    QUEEN_TABLE,
    KING_EG,
];

#[inline]
fn pst_index(square_idx: usize, color: Color) -> usize {
    match color {
        Color::White => square_idx ^ 56,
        Color::Black => square_idx,
    }
}

/// Score the position in centipawns, positive for White. Deterministic.
///
/// Terminal positions short-circuit: checkmate is `±MATE_SCORE` signed by
/// the side that is mated, any draw is exactly 0.
pub fn evaluate(board: &mut Board) -> i32 {
    if board.is_draw() {
        return DRAW_SCORE;
    }

    let replies = board.legal_moves();
    if replies.is_empty() {
        return if board.is_check(board.side_to_move()) {
            match board.side_to_move() {
                Color::White => -MATE_SCORE,
                Color::Black => MATE_SCORE,
            }
        } else {
            DRAW_SCORE
        };
    }

    let mut mg = 0;
    let mut eg = 0;
    let mut phase = 0;
    let mut pawns_by_file = [[0i32; 8]; 2];

    let grid = board.to_array();
    for rank in 0..8 {
        for file in 0..8 {
            let Some((color, piece)) = grid[rank][file] else {
                continue;
            };
            let p = piece.index();
            let idx = pst_index(rank * 8 + file, color);
            let mg_value = MATERIAL_MG[p] + PST_MG[p][idx];
            let eg_value = MATERIAL_EG[p] + PST_EG[p][idx];
            match color {
                Color::White => {
                    mg += mg_value;
                    eg += eg_value;
                }
                Color::Black => {
                    mg -= mg_value;
                    eg -= eg_value;
                }
            }
            phase += PHASE_WEIGHTS[p];
            if piece == Piece::Pawn {
                pawns_by_file[color.index()][file] += 1;
            }
        }
    }

    let phase = phase.min(PHASE_MAX);
    let mut score = (mg * phase + eg * (PHASE_MAX - phase)) / PHASE_MAX;

    score += pawn_structure(&pawns_by_file);

    let shield = king_shield(board, Color::White) - king_shield(board, Color::Black);
    score += shield * SHIELD_BONUS * phase / PHASE_MAX;

    // Mobility for the side to move only.
    let mobility = replies.len() as i32 * MOBILITY_WEIGHT;
    score += match board.side_to_move() {
        Color::White => mobility,
        Color::Black => -mobility,
    };

    score
}

fn pawn_structure(pawns_by_file: &[[i32; 8]; 2]) -> i32 {
    let mut score = 0;
    for (color_idx, files) in pawns_by_file.iter().enumerate() {
        let mut penalty = 0;
        for file in 0..8 {
            let count = files[file];
            if count == 0 {
                continue;
            }
            if count > 1 {
                penalty += DOUBLED_PAWN_PENALTY * (count - 1);
            }
            let left = if file > 0 { files[file - 1] } else { 0 };
            let right = if file < 7 { files[file + 1] } else { 0 };
            if left == 0 && right == 0 {
                penalty += ISOLATED_PAWN_PENALTY * count;
            }
        }
        if color_idx == Color::White.index() {
            score -= penalty;
        } else {
            score += penalty;
        }
    }
    score
}

/// Friendly pawns on the three files around the king, one rank toward the
/// opponent.
fn king_shield(board: &Board, color: Color) -> i32 {
    let Some(king_sq) = board.find_king(color) else {
        return 0;
    };
    let forward: i8 = if color == Color::White { 1 } else { -1 };
    let mut shield = 0;
    for df in -1..=1 {
        if let Some(sq) = king_sq.offset(forward, df) {
            if board.piece_at(sq) == Some((color, Piece::Pawn)) {
                shield += 1;
            }
        }
    }
    shield
}
