//! Terminal-condition oracle.
//!
//! The search treats `classify` as authoritative: it never re-derives mate,
//! stalemate or draw conditions on its own.

use crate::game_state::chess_rules::FIFTY_MOVE_RULE_PLIES;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_king_in_check;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Checkmate,
    Stalemate,
    DrawByInsufficientMaterial,
    DrawByFiftyMoveRule,
}

impl GameStatus {
    #[inline]
    pub fn is_terminal(self) -> bool {
        self != GameStatus::Ongoing
    }
}

/// Classifies `position` given its legal moves for the side to move.
pub fn classify(position: &Position, legal_moves: &[ChessMove]) -> GameStatus {
    if legal_moves.is_empty() {
        return if is_king_in_check(position, position.side_to_move) {
            GameStatus::Checkmate
        } else {
            GameStatus::Stalemate
        };
    }
    if has_insufficient_material(position) {
        return GameStatus::DrawByInsufficientMaterial;
    }
    if position.halfmove_clock >= FIFTY_MOVE_RULE_PLIES {
        return GameStatus::DrawByFiftyMoveRule;
    }
    GameStatus::Ongoing
}

/// K v K, K+minor v K, or nothing but bishops that all stand on one square colour.
pub fn has_insufficient_material(position: &Position) -> bool {
    let mut minors = 0u32;
    let mut bishop_colours = [false; 2];
    let mut only_bishops = true;

    for color in [Color::Light, Color::Dark] {
        for (square, kind) in position.pieces_of(color) {
            match kind {
                PieceKind::King => {}
                PieceKind::Knight => {
                    minors += 1;
                    only_bishops = false;
                }
                PieceKind::Bishop => {
                    minors += 1;
                    bishop_colours[usize::from(is_light_square(square))] = true;
                }
                PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
            }
        }
    }

    minors <= 1 || (only_bishops && !(bishop_colours[0] && bishop_colours[1]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legal_move_generator::generate_legal_moves;

    fn status(fen: &str) -> GameStatus {
        let mut position = Position::from_fen(fen).expect("FEN should parse");
        let moves = generate_legal_moves(&mut position);
        classify(&position, &moves)
    }

    #[test]
    fn detects_checkmate_and_stalemate() {
        // Back-rank mate.
        assert_eq!(status("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1"), GameStatus::Checkmate);
        assert_eq!(status("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1"), GameStatus::Stalemate);
        assert_eq!(
            status(crate::game_state::chess_rules::STARTING_POSITION_FEN),
            GameStatus::Ongoing
        );
    }

    #[test]
    fn detects_insufficient_material() {
        assert_eq!(status("4k3/8/8/8/8/8/8/4K3 w - - 0 1"), GameStatus::DrawByInsufficientMaterial);
        assert_eq!(status("4k3/8/8/8/8/8/8/4KN2 w - - 0 1"), GameStatus::DrawByInsufficientMaterial);
        // Bishops on c1 and f8 share the dark squares.
        assert_eq!(status("5bk1/8/8/8/8/8/8/2B1K3 w - - 0 1"), GameStatus::DrawByInsufficientMaterial);
        // Opposite-coloured bishops can still mate.
        assert_eq!(status("4k1b1/8/8/8/8/8/8/2B1K3 w - - 0 1"), GameStatus::Ongoing);
        assert_eq!(status("4k3/8/8/8/8/8/8/3NKN2 w - - 0 1"), GameStatus::Ongoing);
        assert_eq!(status("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1"), GameStatus::Ongoing);
    }

    #[test]
    fn detects_fifty_move_rule() {
        assert_eq!(status("4k3/8/8/8/8/8/8/R3K3 w - - 100 80"), GameStatus::DrawByFiftyMoveRule);
        assert_eq!(status("4k3/8/8/8/8/8/8/R3K3 w - - 99 80"), GameStatus::Ongoing);
    }
}
