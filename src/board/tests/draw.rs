//! Draw rule tests: 50-move rule, threefold repetition, insufficient
//! material.

use crate::board::Board;

#[test]
fn fifty_move_rule() {
    let board = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 100 80");
    assert!(board.is_draw());

    let board = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 99 80");
    // Two bare kings: still a draw, but by material, not the clock.
    assert!(board.is_draw());
}

#[test]
fn threefold_repetition() {
    let mut board = Board::new();
    // Knight shuffles: the starting position recurs after every four plies.
    for notation in ["g1f3", "g8f6", "f3g1", "f6g8", "g1f3", "g8f6", "f3g1", "f6g8"] {
        assert!(!board.is_draw());
        let mv = board.parse_move(notation).unwrap();
        board.make_move(&mv);
    }
    // Third occurrence of the starting position.
    assert!(board.is_draw());
}

#[test]
fn repetition_count_unwinds_with_unmake() {
    let mut board = Board::new();
    for notation in ["g1f3", "g8f6", "f3g1", "f6g8", "g1f3", "g8f6", "f3g1", "f6g8"] {
        let mv = board.parse_move(notation).unwrap();
        board.make_move(&mv);
    }
    assert!(board.is_draw());
    board.unmake_move();
    assert!(!board.is_draw());
}

#[test]
fn insufficient_material() {
    assert!(Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").is_draw());
    assert!(Board::from_fen("4k3/8/8/8/8/2B5/8/4K3 w - - 0 1").is_draw());
    assert!(Board::from_fen("4k3/8/8/8/8/2N5/8/4K3 b - - 0 1").is_draw());
    // Bishops on the same square color cannot mate each other's king.
    assert!(Board::from_fen("4k3/8/8/8/8/2B5/8/2B1K3 w - - 0 1").is_draw());
}

#[test]
fn sufficient_material_is_not_a_draw() {
    assert!(!Board::from_fen("4k3/8/8/8/8/2R5/8/4K3 w - - 0 1").is_draw());
    assert!(!Board::from_fen("4k3/7p/8/8/8/8/8/4K3 b - - 0 1").is_draw());
    assert!(!Board::from_fen("4k3/8/8/8/8/1NN5/8/4K3 w - - 0 1").is_draw());
    // Opposite-colored bishops can still mate in the corner.
    assert!(!Board::from_fen("4k3/8/8/8/8/2BB4/8/4K3 w - - 0 1").is_draw());
}
