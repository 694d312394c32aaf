//! Legal pawn move generation: pushes, double pushes, captures, en passant
//! and promotions.

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::move_keeps_king_safe;
use crate::move_generation::legal_move_generator::{LegalityContext, SafetyMemo};

pub fn generate_pawn_moves(
    position: &mut Position,
    context: &LegalityContext,
    from: Square,
    out: &mut Vec<ChessMove>,
) {
    let side = position.side_to_move;
    let forward = side.forward();
    let mut memo = SafetyMemo::for_piece(position, context, from);

    if let Some(one_step) = offset_square(from, 0, forward) {
        if position.is_empty(one_step) {
            let mv = ChessMove::new(from, one_step);
            if memo.verify(position, mv, Some((0, forward))) {
                push_with_promotions(side, mv, out);
            }

            if rank_of(from) == side.pawn_start_rank() {
                if let Some(two_step) = offset_square(one_step, 0, forward) {
                    let mv = ChessMove::new(from, two_step);
                    if position.is_empty(two_step) && memo.verify(position, mv, Some((0, forward))) {
                        out.push(mv);
                    }
                }
            }
        }
    }

    for file_delta in [-1i8, 1] {
        let Some(to) = offset_square(from, file_delta, forward) else {
            continue;
        };
        let mv = ChessMove::new(from, to);
        match position.piece_at(to) {
            Some(target) if target.color != side => {
                if memo.verify(position, mv, Some((file_delta, forward))) {
                    push_with_promotions(side, mv, out);
                }
            }
            None if position.en_passant_square == Some(to) => {
                // Two pawns leave the capturer's rank at once; always probe.
                if move_keeps_king_safe(position, mv) {
                    out.push(mv);
                }
            }
            _ => {}
        }
    }
}

fn push_with_promotions(side: Color, mv: ChessMove, out: &mut Vec<ChessMove>) {
    if rank_of(mv.to) == side.promotion_rank() {
        for kind in PROMOTION_KINDS {
            out.push(ChessMove::promoting(mv.from, mv.to, kind));
        }
    } else {
        out.push(mv);
    }
}
