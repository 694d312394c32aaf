use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use quince_chess::game_state::chess_types::*;
use quince_chess::move_generation::legal_move_apply::{apply_move, undo_move};
use quince_chess::move_generation::legal_move_checks::{attackers_of, is_king_in_check, is_square_attacked};
use quince_chess::move_generation::legal_move_generator::generate_legal_moves;

/// Attack test by walking every piece of `by`, independent of the oracle's
/// scan-from-target approach.
fn brute_force_attacked(position: &Position, target: Square, by: Color) -> bool {
    let (tf, tr) = (file_of(target) as i8, rank_of(target) as i8);
    position.pieces_of(by).any(|(from, kind)| {
        let (ff, fr) = (file_of(from) as i8, rank_of(from) as i8);
        let (df, dr) = (tf - ff, tr - fr);
        match kind {
            PieceKind::Pawn => dr == by.forward() && df.abs() == 1,
            PieceKind::Knight => (df.abs(), dr.abs()) == (1, 2) || (df.abs(), dr.abs()) == (2, 1),
            PieceKind::King => from != target && df.abs() <= 1 && dr.abs() <= 1,
            PieceKind::Rook | PieceKind::Bishop | PieceKind::Queen => {
                let straight = (df == 0) != (dr == 0);
                let diagonal = df != 0 && df.abs() == dr.abs();
                let shape_ok = match kind {
                    PieceKind::Rook => straight,
                    PieceKind::Bishop => diagonal,
                    _ => straight || diagonal,
                };
                shape_ok && path_is_clear(position, from, df.signum(), dr.signum(), target)
            }
        }
    })
}

fn path_is_clear(position: &Position, from: Square, step_f: i8, step_r: i8, target: Square) -> bool {
    let mut square = from;
    loop {
        square = match offset_square(square, step_f, step_r) {
            Some(next) => next,
            None => return false,
        };
        if square == target {
            return true;
        }
        if position.piece_at(square).is_some() {
            return false;
        }
    }
}

fn assert_oracle_matches(position: &Position) {
    for color in [Color::Light, Color::Dark] {
        for square in 0..64u8 {
            let expected = brute_force_attacked(position, square, color);
            assert_eq!(
                is_square_attacked(position, square, color),
                expected,
                "square {square} by {color:?} in {position:?}"
            );
            assert_eq!(!attackers_of(position, square, color).is_empty(), expected);
        }
    }
}

#[test]
fn oracle_agrees_with_exhaustive_scan_over_random_playouts() {
    let mut rng = StdRng::seed_from_u64(0x5eed_c0de);
    let mut checked_positions = 0usize;

    for _game in 0..24 {
        let mut position = Position::new_game();
        for _ply in 0..80 {
            assert_oracle_matches(&position);
            checked_positions += 1;

            let moves = generate_legal_moves(&mut position);
            let Some(&mv) = moves.as_slice().choose(&mut rng) else {
                break;
            };
            let _ = apply_move(&mut position, mv);
            // The mover's king is never left attacked.
            assert!(!is_king_in_check(&position, position.side_to_move.opposite()));
        }
    }

    assert!(checked_positions >= 100, "only {checked_positions} positions checked");
}

#[test]
fn apply_undo_round_trips_every_legal_move() {
    let mut rng = StdRng::seed_from_u64(17);
    for fen in [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        "8/8/8/K2pP2r/8/8/8/7k w - d6 0 1",
    ] {
        let mut position = Position::from_fen(fen).expect("FEN should parse");
        for _ply in 0..40 {
            let moves = generate_legal_moves(&mut position);
            for &mv in &moves {
                let before = position.clone();
                let record = apply_move(&mut position, mv);
                undo_move(&mut position, record);
                assert_eq!(position, before, "{mv} did not round-trip in {fen}");
            }
            let Some(&mv) = moves.as_slice().choose(&mut rng) else {
                break;
            };
            let _ = apply_move(&mut position, mv);
        }
    }
}
