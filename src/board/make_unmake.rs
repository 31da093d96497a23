use crate::zobrist::ZOBRIST;

use super::state::{NullUndo, Undo, CASTLE_MASK};
use super::{Board, Color, Move, Piece, Square};

impl Board {
    #[inline]
    fn toggle_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        // Caller keeps squares[] and the hash in sync; this only flips the key.
        self.hash ^= ZOBRIST.piece_keys[color.index()][piece.index()][sq.index()];
    }

    /// Apply a move, pushing everything needed for `unmake_move` onto the
    /// internal undo stack. The hash is updated incrementally.
    pub fn make_move(&mut self, mv: &Move) {
        let color = self.side_to_move;
        let previous_hash = self.hash;
        let previous_en_passant = self.en_passant;
        let previous_castling_rights = self.castling_rights;
        let previous_halfmove_clock = self.halfmove_clock;

        self.hash ^= ZOBRIST.black_to_move_key;
        if let Some(ep) = self.en_passant {
            self.hash ^= ZOBRIST.en_passant_keys[ep.file() as usize];
        }
        self.en_passant = None;

        // Remove the captured piece first so the destination is free.
        let mut captured: Option<(Color, Piece)> = None;
        if mv.en_passant {
            let victim_sq = Square::new(mv.from.rank(), mv.to.file());
            captured = self.squares[victim_sq.index()].take();
            if let Some((vc, vp)) = captured {
                self.toggle_piece(victim_sq, vc, vp);
            }
        } else if mv.capture.is_some() {
            captured = self.squares[mv.to.index()].take();
            if let Some((vc, vp)) = captured {
                self.toggle_piece(mv.to, vc, vp);
            }
        }

        // Move the piece, promoting if required.
        let placed = mv.promotion.unwrap_or(mv.piece);
        self.squares[mv.from.index()] = None;
        self.toggle_piece(mv.from, color, mv.piece);
        self.squares[mv.to.index()] = Some((color, placed));
        self.toggle_piece(mv.to, color, placed);

        // Castling also moves the rook.
        if mv.castling {
            let (rook_from, rook_to) = rook_squares(mv);
            self.squares[rook_from.index()] = None;
            self.toggle_piece(rook_from, color, Piece::Rook);
            self.squares[rook_to.index()] = Some((color, Piece::Rook));
            self.toggle_piece(rook_to, color, Piece::Rook);
        }

        // A double pawn push opens an en-passant target behind the pawn.
        if mv.piece == Piece::Pawn && mv.from.rank().abs_diff(mv.to.rank()) == 2 {
            let ep = Square::new((mv.from.rank() + mv.to.rank()) / 2, mv.from.file());
            self.en_passant = Some(ep);
            self.hash ^= ZOBRIST.en_passant_keys[ep.file() as usize];
        }

        let new_rights =
            self.castling_rights & CASTLE_MASK[mv.from.index()] & CASTLE_MASK[mv.to.index()];
        if new_rights != self.castling_rights {
            self.hash ^= ZOBRIST.castling_keys[self.castling_rights as usize];
            self.hash ^= ZOBRIST.castling_keys[new_rights as usize];
            self.castling_rights = new_rights;
        }

        if mv.piece == Piece::Pawn || captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }

        self.side_to_move = color.opponent();

        let made_hash = self.hash;
        self.repetitions.increment(made_hash);

        self.undo_stack.push(Undo {
            mv: *mv,
            captured,
            previous_en_passant,
            previous_castling_rights,
            previous_halfmove_clock,
            previous_hash,
            made_hash,
        });
    }

    /// Reverse the most recent `make_move`, restoring the position exactly.
    pub fn unmake_move(&mut self) {
        let undo = self
            .undo_stack
            .pop()
            .expect("unmake_move without a matching make_move");
        let mv = undo.mv;

        self.repetitions.decrement(undo.made_hash);
        self.side_to_move = self.side_to_move.opponent();
        let color = self.side_to_move;

        self.squares[mv.to.index()] = None;
        self.squares[mv.from.index()] = Some((color, mv.piece));

        if mv.castling {
            let (rook_from, rook_to) = rook_squares(&mv);
            self.squares[rook_to.index()] = None;
            self.squares[rook_from.index()] = Some((color, Piece::Rook));
        } else if mv.en_passant {
            let victim_sq = Square::new(mv.from.rank(), mv.to.file());
            self.squares[victim_sq.index()] = undo.captured;
        } else if undo.captured.is_some() {
            self.squares[mv.to.index()] = undo.captured;
        }

        self.en_passant = undo.previous_en_passant;
        self.castling_rights = undo.previous_castling_rights;
        self.halfmove_clock = undo.previous_halfmove_clock;
        self.hash = undo.previous_hash;
    }

    /// Apply `mv`, run `f`, and undo the move on the way out. Keeps probe
    /// code (check detection, PV validation) symmetric by construction.
    pub fn with_move<T>(&mut self, mv: &Move, f: impl FnOnce(&mut Board) -> T) -> T {
        self.make_move(mv);
        let result = f(self);
        self.unmake_move();
        result
    }

    /// Pass the turn without moving. Used by null-move pruning only; the
    /// resulting position can be illegal chess and is never stored.
    pub(crate) fn make_null_move(&mut self) -> NullUndo {
        let undo = NullUndo {
            previous_en_passant: self.en_passant,
            previous_hash: self.hash,
        };
        self.hash ^= ZOBRIST.black_to_move_key;
        if let Some(ep) = self.en_passant {
            self.hash ^= ZOBRIST.en_passant_keys[ep.file() as usize];
        }
        self.en_passant = None;
        self.side_to_move = self.side_to_move.opponent();
        undo
    }

    pub(crate) fn unmake_null_move(&mut self, undo: NullUndo) {
        self.side_to_move = self.side_to_move.opponent();
        self.en_passant = undo.previous_en_passant;
        self.hash = undo.previous_hash;
    }
}

/// Rook source and destination for a castling king move.
fn rook_squares(mv: &Move) -> (Square, Square) {
    let rank = mv.to.rank();
    if mv.to.file() == 6 {
        (Square::new(rank, 7), Square::new(rank, 5))
    } else {
        (Square::new(rank, 0), Square::new(rank, 3))
    }
}
