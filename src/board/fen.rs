use super::error::{FenError, MoveParseError};
use super::types::{CASTLE_BLACK_K, CASTLE_BLACK_Q, CASTLE_WHITE_K, CASTLE_WHITE_Q};
use super::{Board, Color, Move, Piece, Square};

impl Board {
    /// Parse a position from FEN notation.
    ///
    /// Returns an error if the FEN string is malformed; this is the only
    /// input validation the engine performs before searching.
    pub fn try_from_fen(fen: &str) -> Result<Self, FenError> {
        let mut board = Board::empty();
        let fields: Vec<&str> = fen.split_whitespace().collect();

        if fields.len() < 4 {
            return Err(FenError::TooFewFields {
                found: fields.len(),
            });
        }

        let ranks: Vec<&str> = fields[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::BadRankCount { found: ranks.len() });
        }
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            // FEN lists rank 8 first.
            let rank = 7 - rank_idx as u8;
            let mut file = 0u8;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as u8;
                } else {
                    let color = if c.is_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let piece = Piece::from_char(c).ok_or(FenError::InvalidPiece { char: c })?;
                    if file >= 8 {
                        return Err(FenError::TooManyFiles { rank: rank_idx });
                    }
                    board.squares[Square::new(rank, file).index()] = Some((color, piece));
                    file += 1;
                }
                if file > 8 {
                    return Err(FenError::TooManyFiles { rank: rank_idx });
                }
            }
        }

        board.side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };

        for c in fields[2].chars() {
            match c {
                'K' => board.castling_rights |= CASTLE_WHITE_K,
                'Q' => board.castling_rights |= CASTLE_WHITE_Q,
                'k' => board.castling_rights |= CASTLE_BLACK_K,
                'q' => board.castling_rights |= CASTLE_BLACK_Q,
                '-' => {}
                _ => return Err(FenError::InvalidCastling { char: c }),
            }
        }

        board.en_passant = if fields[3] == "-" {
            None
        } else {
            match Square::from_algebraic(fields[3]) {
                Ok(sq) => Some(sq),
                Err(_) => {
                    return Err(FenError::InvalidEnPassant {
                        found: fields[3].to_string(),
                    })
                }
            }
        };

        if let Some(clock) = fields.get(4) {
            board.halfmove_clock = clock.parse().unwrap_or(0);
        }

        if board.find_king(Color::White).is_none() || board.find_king(Color::Black).is_none() {
            return Err(FenError::MissingKing);
        }

        board.hash = board.full_hash();
        board.repetitions.increment(board.hash);
        Ok(board)
    }

    /// Parse a position from FEN notation.
    ///
    /// # Panics
    /// Panics if the FEN string is invalid. Use `try_from_fen` for fallible
    /// parsing.
    #[must_use]
    pub fn from_fen(fen: &str) -> Self {
        Self::try_from_fen(fen).expect("invalid FEN string")
    }

    /// Render the position as FEN.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut placement = String::new();
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match self.piece_at(Square::new(rank, file)) {
                    Some((color, piece)) => {
                        if empty > 0 {
                            placement.push_str(&empty.to_string());
                            empty = 0;
                        }
                        placement.push(piece.to_fen_char(color));
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                placement.push_str(&empty.to_string());
            }
            if rank > 0 {
                placement.push('/');
            }
        }

        let side = match self.side_to_move {
            Color::White => "w",
            Color::Black => "b",
        };

        let mut castling = String::new();
        for (right, c) in [
            (CASTLE_WHITE_K, 'K'),
            (CASTLE_WHITE_Q, 'Q'),
            (CASTLE_BLACK_K, 'k'),
            (CASTLE_BLACK_Q, 'q'),
        ] {
            if self.has_castling_right(right) {
                castling.push(c);
            }
        }
        if castling.is_empty() {
            castling.push('-');
        }

        let ep = self
            .en_passant
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());

        format!(
            "{placement} {side} {castling} {ep} {} 1",
            self.halfmove_clock
        )
    }

    /// Parse a coordinate-notation move (`e2e4`, `e7e8q`) against the
    /// current position's legal moves.
    pub fn parse_move(&mut self, notation: &str) -> Result<Move, MoveParseError> {
        let chars: Vec<char> = notation.chars().collect();
        if !(4..=5).contains(&chars.len()) {
            return Err(MoveParseError::InvalidLength { len: chars.len() });
        }
        let bad_square = || MoveParseError::InvalidSquare {
            notation: notation.to_string(),
        };
        let from_str: String = chars[0..2].iter().collect();
        let to_str: String = chars[2..4].iter().collect();
        let from = Square::from_algebraic(&from_str).map_err(|_| bad_square())?;
        let to = Square::from_algebraic(&to_str).map_err(|_| bad_square())?;
        let promotion = match chars.get(4) {
            None => None,
            Some(&c) => match Piece::from_char(c) {
                Some(p @ (Piece::Knight | Piece::Bishop | Piece::Rook | Piece::Queen)) => Some(p),
                _ => return Err(MoveParseError::InvalidPromotion { char: c }),
            },
        };

        self.legal_moves()
            .into_iter()
            .find(|m| m.from == from && m.to == to && m.promotion == promotion)
            .ok_or_else(|| MoveParseError::IllegalMove {
                notation: notation.to_string(),
            })
    }
}
