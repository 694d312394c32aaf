//! Move-ordering heuristics used ahead of alpha-beta iteration.

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::en_passant_victim_square;
use crate::search::board_scoring::piece_value;

pub trait MoveOrderer: Send + Sync {
    /// Reorders `moves` in place, most promising first.
    fn order(&self, position: &Position, moves: &mut [ChessMove]);
}

/// Leaves moves in generation order.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeneratorOrdering;

impl MoveOrderer for GeneratorOrdering {
    fn order(&self, _position: &Position, _moves: &mut [ChessMove]) {}
}

/// Captures by value delta, promotion bonus, and a penalty for stepping a
/// piece onto a square an enemy pawn attacks.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaptureFirstOrdering;

impl CaptureFirstOrdering {
    const CAPTURE_BASE: i32 = 1_000;
    const PROMOTION_BONUS: i32 = 800;

    pub fn move_order_score(position: &Position, mv: ChessMove) -> i32 {
        let Some(mover) = position.piece_at(mv.from) else {
            return i32::MIN;
        };

        let mut score = 0i32;
        let victim = position
            .piece_at(mv.to)
            .map(|piece| piece.kind)
            .or_else(|| en_passant_victim_square(position, mv).map(|_| PieceKind::Pawn));
        if let Some(victim) = victim {
            score += Self::CAPTURE_BASE + piece_value(victim) - piece_value(mover.kind) / 10;
        }
        if let Some(promotion) = mv.promotion {
            score += Self::PROMOTION_BONUS + piece_value(promotion);
        }
        if mover.kind != PieceKind::Pawn && attacked_by_enemy_pawn(position, mv.to, mover.color) {
            score -= piece_value(mover.kind) - piece_value(PieceKind::Pawn);
        }
        score
    }
}

impl MoveOrderer for CaptureFirstOrdering {
    fn order(&self, position: &Position, moves: &mut [ChessMove]) {
        // Stable, so equal scores keep generation order.
        moves.sort_by_cached_key(|mv| std::cmp::Reverse(Self::move_order_score(position, *mv)));
    }
}

fn attacked_by_enemy_pawn(position: &Position, square: Square, mover: Color) -> bool {
    let enemy = mover.opposite();
    let enemy_pawn = Piece::new(enemy, PieceKind::Pawn);
    [-1i8, 1]
        .into_iter()
        .filter_map(|file_delta| offset_square(square, file_delta, -enemy.forward()))
        .any(|from| position.piece_at(from) == Some(enemy_pawn))
}

/// Moves `mv` to the front of `moves` if present, keeping the rest in order.
pub fn promote_to_front(moves: &mut [ChessMove], mv: ChessMove) -> bool {
    match moves.iter().position(|candidate| *candidate == mv) {
        Some(index) => {
            moves[..=index].rotate_right(1);
            true
        }
        None => false,
    }
}
