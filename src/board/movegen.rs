use super::types::{CASTLE_BLACK_K, CASTLE_BLACK_Q, CASTLE_WHITE_K, CASTLE_WHITE_Q};
use super::{Board, Color, Move, Piece, Square};

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (1, -1),
    (1, 0),
    (1, 1),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ROOK_DIRS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

const PROMOTION_PIECES: [Piece; 4] = [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight];

impl Board {
    /// All legal moves for the side to move, in generation order.
    pub fn legal_moves(&mut self) -> Vec<Move> {
        self.generate_legal(false)
    }

    /// Captures and promotions only, for quiescence search.
    pub fn tactical_moves(&mut self) -> Vec<Move> {
        self.generate_legal(true)
    }

    fn generate_legal(&mut self, tactical_only: bool) -> Vec<Move> {
        let color = self.side_to_move;
        let pseudo = self.pseudo_legal_moves(tactical_only);
        let mut legal = Vec::with_capacity(pseudo.len());
        for mv in pseudo {
            // A move is legal when the mover's king is not left in check.
            let safe = self.with_move(&mv, |b| !b.is_check(color));
            if safe {
                legal.push(mv);
            }
        }
        legal
    }

    fn pseudo_legal_moves(&self, tactical_only: bool) -> Vec<Move> {
        let color = self.side_to_move;
        let mut moves = Vec::with_capacity(48);
        for idx in 0..64u8 {
            let sq = Square(idx);
            match self.piece_at(sq) {
                Some((c, piece)) if c == color => match piece {
                    Piece::Pawn => self.pawn_moves(sq, color, tactical_only, &mut moves),
                    Piece::Knight => {
                        self.leaper_moves(sq, color, Piece::Knight, &KNIGHT_OFFSETS, tactical_only, &mut moves)
                    }
                    Piece::King => {
                        self.leaper_moves(sq, color, Piece::King, &KING_OFFSETS, tactical_only, &mut moves);
                        if !tactical_only {
                            self.castling_moves(sq, color, &mut moves);
                        }
                    }
                    Piece::Bishop => {
                        self.slider_moves(sq, color, Piece::Bishop, &BISHOP_DIRS, tactical_only, &mut moves)
                    }
                    Piece::Rook => {
                        self.slider_moves(sq, color, Piece::Rook, &ROOK_DIRS, tactical_only, &mut moves)
                    }
                    Piece::Queen => {
                        self.slider_moves(sq, color, Piece::Queen, &BISHOP_DIRS, tactical_only, &mut moves);
                        self.slider_moves(sq, color, Piece::Queen, &ROOK_DIRS, tactical_only, &mut moves);
                    }
                },
                _ => {}
            }
        }
        moves
    }

    fn pawn_moves(&self, from: Square, color: Color, tactical_only: bool, moves: &mut Vec<Move>) {
        let forward: i8 = if color == Color::White { 1 } else { -1 };
        let start_rank: u8 = if color == Color::White { 1 } else { 6 };
        let promo_rank: u8 = if color == Color::White { 7 } else { 0 };

        // Pushes. A promotion push is tactical even without a capture.
        if let Some(to) = from.offset(forward, 0) {
            if self.piece_at(to).is_none() {
                if to.rank() == promo_rank {
                    push_promotions(from, to, None, moves);
                } else if !tactical_only {
                    moves.push(Move::quiet(from, to, Piece::Pawn));
                    if from.rank() == start_rank {
                        if let Some(two) = from.offset(2 * forward, 0) {
                            if self.piece_at(two).is_none() {
                                moves.push(Move::quiet(from, two, Piece::Pawn));
                            }
                        }
                    }
                }
            }
        }

        // Captures, including en passant.
        for df in [-1, 1] {
            let Some(to) = from.offset(forward, df) else {
                continue;
            };
            match self.piece_at(to) {
                Some((victim_color, victim)) if victim_color != color => {
                    if to.rank() == promo_rank {
                        push_promotions(from, to, Some(victim), moves);
                    } else {
                        moves.push(Move {
                            capture: Some(victim),
                            ..Move::quiet(from, to, Piece::Pawn)
                        });
                    }
                }
                None if self.en_passant == Some(to) => {
                    moves.push(Move {
                        capture: Some(Piece::Pawn),
                        en_passant: true,
                        ..Move::quiet(from, to, Piece::Pawn)
                    });
                }
                _ => {}
            }
        }
    }

    fn leaper_moves(
        &self,
        from: Square,
        color: Color,
        piece: Piece,
        offsets: &[(i8, i8)],
        tactical_only: bool,
        moves: &mut Vec<Move>,
    ) {
        for &(dr, df) in offsets {
            let Some(to) = from.offset(dr, df) else {
                continue;
            };
            match self.piece_at(to) {
                None if !tactical_only => moves.push(Move::quiet(from, to, piece)),
                Some((victim_color, victim)) if victim_color != color => {
                    moves.push(Move {
                        capture: Some(victim),
                        ..Move::quiet(from, to, piece)
                    });
                }
                _ => {}
            }
        }
    }

    fn slider_moves(
        &self,
        from: Square,
        color: Color,
        piece: Piece,
        dirs: &[(i8, i8)],
        tactical_only: bool,
        moves: &mut Vec<Move>,
    ) {
        for &(dr, df) in dirs {
            let mut current = from;
            while let Some(to) = current.offset(dr, df) {
                match self.piece_at(to) {
                    None => {
                        if !tactical_only {
                            moves.push(Move::quiet(from, to, piece));
                        }
                        current = to;
                    }
                    Some((victim_color, victim)) => {
                        if victim_color != color {
                            moves.push(Move {
                                capture: Some(victim),
                                ..Move::quiet(from, to, piece)
                            });
                        }
                        break;
                    }
                }
            }
        }
    }

    fn castling_moves(&self, from: Square, color: Color, moves: &mut Vec<Move>) {
        let home_rank: u8 = if color == Color::White { 0 } else { 7 };
        if from != Square::new(home_rank, 4) || self.is_check(color) {
            return;
        }
        let (kingside, queenside) = match color {
            Color::White => (CASTLE_WHITE_K, CASTLE_WHITE_Q),
            Color::Black => (CASTLE_BLACK_K, CASTLE_BLACK_Q),
        };
        let enemy = color.opponent();

        if self.has_castling_right(kingside)
            && self.piece_at(Square::new(home_rank, 5)).is_none()
            && self.piece_at(Square::new(home_rank, 6)).is_none()
            && !self.is_square_attacked(Square::new(home_rank, 5), enemy)
            && !self.is_square_attacked(Square::new(home_rank, 6), enemy)
        {
            moves.push(Move {
                castling: true,
                ..Move::quiet(from, Square::new(home_rank, 6), Piece::King)
            });
        }

        if self.has_castling_right(queenside)
            && self.piece_at(Square::new(home_rank, 1)).is_none()
            && self.piece_at(Square::new(home_rank, 2)).is_none()
            && self.piece_at(Square::new(home_rank, 3)).is_none()
            && !self.is_square_attacked(Square::new(home_rank, 2), enemy)
            && !self.is_square_attacked(Square::new(home_rank, 3), enemy)
        {
            moves.push(Move {
                castling: true,
                ..Move::quiet(from, Square::new(home_rank, 2), Piece::King)
            });
        }
    }

    /// Is `sq` attacked by any piece of `by`?
    pub(crate) fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        // Pawns attack diagonally forward, so look one rank back from `sq`.
        let pawn_dir: i8 = if by == Color::White { -1 } else { 1 };
        for df in [-1, 1] {
            if let Some(from) = sq.offset(pawn_dir, df) {
                if self.piece_at(from) == Some((by, Piece::Pawn)) {
                    return true;
                }
            }
        }

        for &(dr, df) in &KNIGHT_OFFSETS {
            if let Some(from) = sq.offset(dr, df) {
                if self.piece_at(from) == Some((by, Piece::Knight)) {
                    return true;
                }
            }
        }

        for &(dr, df) in &KING_OFFSETS {
            if let Some(from) = sq.offset(dr, df) {
                if self.piece_at(from) == Some((by, Piece::King)) {
                    return true;
                }
            }
        }

        for &(dr, df) in &BISHOP_DIRS {
            if let Some((color, piece)) = self.first_piece_along(sq, dr, df) {
                if color == by && matches!(piece, Piece::Bishop | Piece::Queen) {
                    return true;
                }
            }
        }

        for &(dr, df) in &ROOK_DIRS {
            if let Some((color, piece)) = self.first_piece_along(sq, dr, df) {
                if color == by && matches!(piece, Piece::Rook | Piece::Queen) {
                    return true;
                }
            }
        }

        false
    }

    fn first_piece_along(&self, from: Square, dr: i8, df: i8) -> Option<(Color, Piece)> {
        let mut current = from;
        while let Some(next) = current.offset(dr, df) {
            if let Some(found) = self.piece_at(next) {
                return Some(found);
            }
            current = next;
        }
        None
    }

    /// Is `color`'s king in check?
    pub fn is_check(&self, color: Color) -> bool {
        match self.find_king(color) {
            Some(king_sq) => self.is_square_attacked(king_sq, color.opponent()),
            None => false,
        }
    }

    pub fn is_checkmate(&mut self) -> bool {
        self.is_check(self.side_to_move) && self.legal_moves().is_empty()
    }

    pub fn is_stalemate(&mut self) -> bool {
        !self.is_check(self.side_to_move) && self.legal_moves().is_empty()
    }

    /// Node count of the move-generation tree to `depth`. Correctness anchor
    /// for the generator; see the test suite for reference values.
    pub fn perft(&mut self, depth: u32) -> u64 {
        if depth == 0 {
            return 1;
        }
        let moves = self.legal_moves();
        if depth == 1 {
            return moves.len() as u64;
        }
        let mut nodes = 0;
        for mv in &moves {
            self.make_move(mv);
            nodes += self.perft(depth - 1);
            self.unmake_move();
        }
        nodes
    }
}

fn push_promotions(from: Square, to: Square, capture: Option<Piece>, moves: &mut Vec<Move>) {
    for promo in PROMOTION_PIECES {
        moves.push(Move {
            capture,
            promotion: Some(promo),
            ..Move::quiet(from, to, Piece::Pawn)
        });
    }
}
