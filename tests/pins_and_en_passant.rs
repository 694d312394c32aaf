use quince_chess::game_state::chess_types::*;
use quince_chess::move_generation::legal_move_generator::generate_legal_moves;
use quince_chess::utils::algebraic::algebraic_to_square;

fn sq(name: &str) -> Square {
    algebraic_to_square(name).expect("valid square")
}

fn destinations_from(fen: &str, from: &str) -> Vec<Square> {
    let mut position = Position::from_fen(fen).expect("FEN should parse");
    let from = sq(from);
    let mut out: Vec<Square> = generate_legal_moves(&mut position)
        .into_iter()
        .filter(|mv| mv.from == from)
        .map(|mv| mv.to)
        .collect();
    out.sort_unstable();
    out
}

#[test]
fn rook_pinned_on_file_moves_only_along_pin_line() {
    // King e1, rook e3, queen e8.
    let moves = destinations_from("k3q3/8/8/8/8/4R3/8/4K3 w - - 0 1", "e3");
    let expected: Vec<Square> = ["e2", "e4", "e5", "e6", "e7", "e8"].iter().map(|s| sq(s)).collect();
    assert_eq!(moves, expected);
}

#[test]
fn bishop_pinned_on_file_cannot_move() {
    assert!(destinations_from("k3q3/8/8/8/8/4B3/8/4K3 w - - 0 1", "e3").is_empty());
}

#[test]
fn queen_pinned_on_diagonal_keeps_diagonal_moves() {
    // King a1, queen c3, bishop f6.
    let moves = destinations_from("7k/8/5b2/8/8/2Q5/8/K7 w - - 0 1", "c3");
    let expected: Vec<Square> = ["b2", "d4", "e5", "f6"].iter().map(|s| sq(s)).collect();
    assert_eq!(moves, expected);
}

#[test]
fn en_passant_exposing_rank_check_is_excluded() {
    // Both pawns leave the fifth rank, opening h5-a5.
    let fen = "8/8/8/K2pP2r/8/8/8/7k w - d6 0 1";
    let moves = destinations_from(fen, "e5");
    assert_eq!(moves, vec![sq("e6")]);
}

#[test]
fn en_passant_allowed_when_rank_stays_blocked() {
    let fen = "8/8/8/K1PpP2r/8/8/8/7k w - d6 0 1";
    let moves = destinations_from(fen, "e5");
    assert!(moves.contains(&sq("d6")));
}

#[test]
fn en_passant_capturing_checking_pawn_is_legal() {
    // d7-d5 gave check to the king on e4; exd6 removes the checker.
    let fen = "8/8/8/3pP3/4K3/8/8/7k w - d6 0 1";
    let mut position = Position::from_fen(fen).expect("FEN should parse");
    let moves = generate_legal_moves(&mut position);
    assert!(moves.contains(&ChessMove::new(sq("e5"), sq("d6"))));
}
