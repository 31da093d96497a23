use std::collections::HashMap;

use crate::zobrist::ZOBRIST;

use super::types::{CASTLE_BLACK_K, CASTLE_BLACK_Q, CASTLE_WHITE_K, CASTLE_WHITE_Q};
use super::{Color, Move, Piece, Square, START_FEN};

/// Everything needed to reverse one `make_move`.
#[derive(Clone, Debug)]
pub(crate) struct Undo {
    pub(crate) mv: Move,
    pub(crate) captured: Option<(Color, Piece)>,
    pub(crate) previous_en_passant: Option<Square>,
    pub(crate) previous_castling_rights: u8,
    pub(crate) previous_halfmove_clock: u32,
    pub(crate) previous_hash: u64,
    pub(crate) made_hash: u64,
}

/// State saved across a null move (pass of the turn).
pub struct NullUndo {
    pub(crate) previous_en_passant: Option<Square>,
    pub(crate) previous_hash: u64,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct RepetitionTable {
    counts: HashMap<u64, u32>,
}

impl RepetitionTable {
    pub(crate) fn get(&self, hash: u64) -> u32 {
        self.counts.get(&hash).copied().unwrap_or(0)
    }

    pub(crate) fn increment(&mut self, hash: u64) {
        *self.counts.entry(hash).or_insert(0) += 1;
    }

    pub(crate) fn decrement(&mut self, hash: u64) {
        if let Some(count) = self.counts.get_mut(&hash) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                self.counts.remove(&hash);
            }
        }
    }
}

/// A chess position: mailbox piece array plus game state, mutated in place
/// by `make_move` and restored exactly by `unmake_move`.
#[derive(Clone, Debug)]
pub struct Board {
    pub(crate) squares: [Option<(Color, Piece)>; 64],
    pub(crate) side_to_move: Color,
    pub(crate) castling_rights: u8,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) hash: u64,
    pub(crate) repetitions: RepetitionTable,
    pub(crate) undo_stack: Vec<Undo>,
}

impl Board {
    /// The standard starting position.
    #[must_use]
    pub fn new() -> Self {
        Board::try_from_fen(START_FEN).expect("start position FEN is valid")
    }

    pub(crate) fn empty() -> Self {
        Board {
            squares: [None; 64],
            side_to_move: Color::White,
            castling_rights: 0,
            en_passant: None,
            halfmove_clock: 0,
            hash: 0,
            repetitions: RepetitionTable::default(),
            undo_stack: Vec::new(),
        }
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        self.squares[sq.index()]
    }

    /// The 8x8 grid view, indexed `[rank][file]`.
    #[must_use]
    pub fn to_array(&self) -> [[Option<(Color, Piece)>; 8]; 8] {
        let mut grid = [[None; 8]; 8];
        for (idx, entry) in self.squares.iter().enumerate() {
            grid[idx / 8][idx % 8] = *entry;
        }
        grid
    }

    pub(crate) fn find_king(&self, color: Color) -> Option<Square> {
        self.squares
            .iter()
            .position(|entry| *entry == Some((color, Piece::King)))
            .map(|idx| Square(idx as u8))
    }

    /// Material value of everything but pawns and the king, one side.
    pub(crate) fn non_pawn_material(&self, color: Color) -> i32 {
        const VALUES: [i32; 6] = [0, 320, 330, 500, 900, 0];
        self.squares
            .iter()
            .flatten()
            .filter(|(c, _)| *c == color)
            .map(|(_, p)| VALUES[p.index()])
            .sum()
    }

    /// Draw by the 50-move rule, threefold repetition, or insufficient
    /// material.
    pub fn is_draw(&self) -> bool {
        self.halfmove_clock >= 100
            || self.repetitions.get(self.hash) >= 3
            || self.is_insufficient_material()
    }

    fn is_insufficient_material(&self) -> bool {
        let mut minors = 0u32;
        let mut bishop_square_colors = [false; 2];
        let mut only_bishops = true;
        for (idx, entry) in self.squares.iter().enumerate() {
            match entry {
                None | Some((_, Piece::King)) => {}
                Some((_, Piece::Pawn | Piece::Rook | Piece::Queen)) => return false,
                Some((_, Piece::Knight)) => {
                    minors += 1;
                    only_bishops = false;
                }
                Some((_, Piece::Bishop)) => {
                    minors += 1;
                    bishop_square_colors[(idx / 8 + idx % 8) % 2] = true;
                }
            }
        }
        if minors <= 1 {
            return true;
        }
        // Any number of bishops all living on one square color cannot mate.
        only_bishops && (!bishop_square_colors[0] || !bishop_square_colors[1])
    }

    /// Recompute the Zobrist hash from scratch. Used at construction and as
    /// a test oracle for the incremental updates in make/unmake.
    pub(crate) fn full_hash(&self) -> u64 {
        let mut hash = 0u64;
        for (idx, entry) in self.squares.iter().enumerate() {
            if let Some((color, piece)) = entry {
                hash ^= ZOBRIST.piece_keys[color.index()][piece.index()][idx];
            }
        }
        if self.side_to_move == Color::Black {
            hash ^= ZOBRIST.black_to_move_key;
        }
        hash ^= ZOBRIST.castling_keys[self.castling_rights as usize];
        if let Some(ep) = self.en_passant {
            hash ^= ZOBRIST.en_passant_keys[ep.file() as usize];
        }
        hash
    }

    pub(crate) fn has_castling_right(&self, right: u8) -> bool {
        self.castling_rights & right != 0
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

/// Castling rights that survive a move touching each square: moving or
/// capturing on a king/rook home square strips the matching rights.
pub(crate) const CASTLE_MASK: [u8; 64] = {
    let mut mask = [0xFu8; 64];
    mask[0] = 0xF & !CASTLE_WHITE_Q; // a1
    mask[4] = 0xF & !(CASTLE_WHITE_K | CASTLE_WHITE_Q); // e1
    mask[7] = 0xF & !CASTLE_WHITE_K; // h1
    mask[56] = 0xF & !CASTLE_BLACK_Q; // a8
    mask[60] = 0xF & !(CASTLE_BLACK_K | CASTLE_BLACK_Q); // e8
    mask[63] = 0xF & !CASTLE_BLACK_K; // h8
    mask
};
