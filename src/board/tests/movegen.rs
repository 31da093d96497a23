//! Move generation tests, anchored by standard perft node counts.

use crate::board::{Board, Color, Piece};

#[test]
fn perft_start_position() {
    let mut board = Board::new();
    assert_eq!(board.perft(1), 20);
    assert_eq!(board.perft(2), 400);
    assert_eq!(board.perft(3), 8902);
}

#[test]
fn perft_kiwipete() {
    let mut board =
        Board::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    assert_eq!(board.perft(1), 48);
    assert_eq!(board.perft(2), 2039);
}

#[test]
fn perft_pinned_en_passant_position() {
    let mut board = Board::from_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1");
    assert_eq!(board.perft(1), 14);
    assert_eq!(board.perft(2), 191);
    assert_eq!(board.perft(3), 2812);
}

#[test]
fn perft_promotion_position() {
    let mut board =
        Board::from_fen("r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1");
    assert_eq!(board.perft(1), 6);
    assert_eq!(board.perft(2), 264);
}

#[test]
fn pawn_promotions_generate_all_four_pieces() {
    let mut board = Board::from_fen("7k/P7/8/8/8/8/8/K7 w - - 0 1");
    let promos: Vec<Piece> = board
        .legal_moves()
        .into_iter()
        .filter_map(|m| m.promotion)
        .collect();
    assert_eq!(promos.len(), 4);
    for piece in [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight] {
        assert!(promos.contains(&piece));
    }
}

#[test]
fn tactical_moves_are_captures_and_promotions_only() {
    let mut board =
        Board::from_fen("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2");
    let tactical = board.tactical_moves();
    assert!(!tactical.is_empty());
    assert!(tactical.iter().all(|m| m.is_capture() || m.is_promotion()));

    // Every tactical move is also in the full legal list.
    let all = board.legal_moves();
    assert!(tactical.iter().all(|m| all.contains(m)));
}

#[test]
fn moving_a_pinned_piece_is_illegal() {
    // The e-file knight shields the white king from the rook on e8.
    let mut board = Board::from_fen("4r2k/8/8/8/8/4N3/8/4K3 w - - 0 1");
    let knight_moves: Vec<_> = board
        .legal_moves()
        .into_iter()
        .filter(|m| m.piece == Piece::Knight)
        .collect();
    assert!(knight_moves.is_empty(), "pinned knight must not move");
}

#[test]
fn check_detection() {
    let board = Board::from_fen("4k3/8/8/8/8/8/8/4K2r w - - 0 1");
    assert!(board.is_check(Color::White));
    assert!(!board.is_check(Color::Black));
}

#[test]
fn checkmate_and_stalemate_detection() {
    let mut mate = Board::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1");
    let mv = mate.parse_move("a1a8").unwrap();
    mate.make_move(&mv);
    assert!(mate.is_checkmate());
    assert!(!mate.is_stalemate());

    // Black to move, not in check, nowhere to go.
    let mut stale = Board::from_fen("7k/5Q2/8/8/8/8/8/K7 b - - 0 1");
    assert!(stale.is_stalemate());
    assert!(!stale.is_checkmate());
}

#[test]
fn castling_blocked_through_attacked_square() {
    // Black rook on f8 covers f1; kingside castling is off, queenside fine.
    let mut board = Board::from_fen("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1");
    let castles: Vec<_> = board
        .legal_moves()
        .into_iter()
        .filter(|m| m.castling)
        .collect();
    assert_eq!(castles.len(), 1);
    assert_eq!(castles[0].to.file(), 2);
}

#[test]
fn castling_requires_empty_squares() {
    let mut board = Board::from_fen("4k3/8/8/8/8/8/8/R2QK2R w KQ - 0 1");
    let castles: Vec<_> = board
        .legal_moves()
        .into_iter()
        .filter(|m| m.castling)
        .collect();
    // d1 is occupied: only kingside remains.
    assert_eq!(castles.len(), 1);
    assert_eq!(castles[0].to.file(), 6);
}
