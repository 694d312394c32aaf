//! Legal king moves, including castling as a two-file king shift.

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::{is_square_attacked, move_keeps_king_safe};
use crate::move_generation::legal_move_generator::LegalityContext;
use crate::move_generation::legal_move_shared::KING_OFFSETS;

pub fn generate_king_moves(position: &mut Position, context: &LegalityContext, out: &mut Vec<ChessMove>) {
    let side = position.side_to_move;
    let from = context.king_square;

    for (df, dr) in KING_OFFSETS {
        let Some(to) = offset_square(from, df, dr) else {
            continue;
        };
        if matches!(position.piece_at(to), Some(p) if p.color == side) {
            continue;
        }
        let mv = ChessMove::new(from, to);
        if move_keeps_king_safe(position, mv) {
            out.push(mv);
        }
    }

    if !context.in_check {
        generate_castling_moves(position, from, out);
    }
}

fn generate_castling_moves(position: &Position, king_from: Square, out: &mut Vec<ChessMove>) {
    let side = position.side_to_move;
    let enemy = side.opposite();
    let rank = side.home_rank();
    if king_from != make_square(4, rank) {
        return;
    }

    // (right, rook file, squares that must be empty, squares the king crosses)
    let wings: [(CastlingRights, u8, &[u8], [u8; 2]); 2] = [
        (kingside_right(side), 7, &[5, 6][..], [5, 6]),
        (queenside_right(side), 0, &[1, 2, 3][..], [3, 2]),
    ];

    for (right, rook_file, between, king_path) in wings {
        if !position.has_castling_right(right) {
            continue;
        }
        let rook = Piece::new(side, PieceKind::Rook);
        if position.piece_at(make_square(rook_file, rank)) != Some(rook) {
            continue;
        }
        if !between.iter().all(|&file| position.is_empty(make_square(file, rank))) {
            continue;
        }
        if king_path
            .iter()
            .any(|&file| is_square_attacked(position, make_square(file, rank), enemy))
        {
            continue;
        }
        out.push(ChessMove::new(king_from, make_square(king_path[1], rank)));
    }
}
