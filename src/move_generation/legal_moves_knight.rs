//! Legal knight move generation.

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_generator::{LegalityContext, SafetyMemo};
use crate::move_generation::legal_move_shared::KNIGHT_OFFSETS;

pub fn generate_knight_moves(
    position: &mut Position,
    context: &LegalityContext,
    from: Square,
    out: &mut Vec<ChessMove>,
) {
    let side = position.side_to_move;
    let mut memo = SafetyMemo::for_piece(position, context, from);

    for (df, dr) in KNIGHT_OFFSETS {
        let Some(to) = offset_square(from, df, dr) else {
            continue;
        };
        if matches!(position.piece_at(to), Some(p) if p.color == side) {
            continue;
        }
        let mv = ChessMove::new(from, to);
        if memo.verify(position, mv, None) {
            out.push(mv);
        }
    }
}
