//! Structural position fingerprint.
//!
//! Covers side to move, en-passant target, castling rights and the full board;
//! move counters and cached king squares are left out because they do not
//! change which moves are available. The whole structure is the key, so a map
//! lookup compares every field and distinct positions never alias.

use crate::game_state::chess_types::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PositionSignature {
    board: [u8; 32],
    side_to_move: Color,
    en_passant_square: Option<Square>,
    castling_rights: CastlingRights,
}

impl PositionSignature {
    pub fn of(position: &Position) -> Self {
        let mut board = [0u8; 32];
        for square in 0..64u8 {
            let code = position.piece_at(square).map_or(0, Piece::code);
            let byte = &mut board[usize::from(square / 2)];
            if square % 2 == 0 {
                *byte |= code;
            } else {
                *byte |= code << 4;
            }
        }

        Self {
            board,
            side_to_move: position.side_to_move,
            en_passant_square: position.en_passant_square,
            castling_rights: position.castling_rights,
        }
    }
}
