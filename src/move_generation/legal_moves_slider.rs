//! Legal bishop, rook and queen move generation.

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_generator::{LegalityContext, SafetyMemo};
use crate::move_generation::legal_move_shared::slider_directions;

pub fn generate_slider_moves(
    position: &mut Position,
    context: &LegalityContext,
    from: Square,
    kind: PieceKind,
    out: &mut Vec<ChessMove>,
) {
    let side = position.side_to_move;
    let mut memo = SafetyMemo::for_piece(position, context, from);

    for &direction in slider_directions(kind) {
        let mut current = from;
        while let Some(to) = offset_square(current, direction.0, direction.1) {
            let occupant = position.piece_at(to);
            if matches!(occupant, Some(p) if p.color == side) {
                break;
            }
            let mv = ChessMove::new(from, to);
            if memo.verify(position, mv, Some(direction)) {
                out.push(mv);
            }
            if occupant.is_some() {
                break;
            }
            current = to;
        }
    }
}
