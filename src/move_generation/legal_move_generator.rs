//! Legal move generation.
//!
//! Each geometric move is checked for king safety while it is generated. The
//! king's attack status is computed once up front; with the king safe, a
//! piece that sits on no line through the king cannot be pinned and skips
//! verification entirely, and a piece that might be pinned only probes until
//! its moves prove it free (see [`SafetyMemo`]).

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::{
    attackers_of, cannot_be_pinned, move_keeps_king_safe,
};
use crate::move_generation::legal_move_shared::Direction;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_slider::generate_slider_moves;

/// King status shared by every piece generator for one position.
#[derive(Debug, Clone, Copy)]
pub struct LegalityContext {
    pub king_square: Square,
    pub in_check: bool,
    pub double_check: bool,
}

impl LegalityContext {
    pub fn of(position: &Position) -> Self {
        let side = position.side_to_move;
        let king_square = position.king_square(side);
        let checkers = attackers_of(position, king_square, side.opposite());
        Self {
            king_square,
            in_check: !checkers.is_empty(),
            double_check: checkers.len() >= 2,
        }
    }
}

/// Per-piece record of which move lines are already known not to expose the king.
///
/// With the king not in check, a pin confines a piece to one line through its
/// square, so safety is uniform along any ray leaving the piece: one verified
/// square settles the whole ray, and two verified lines (or one verified
/// knight jump) prove the piece is not pinned at all.
#[derive(Debug)]
pub struct SafetyMemo {
    in_check: bool,
    unpinned: bool,
    confirmed_lines: [Option<Direction>; 2],
}

impl SafetyMemo {
    pub fn for_piece(position: &Position, context: &LegalityContext, from: Square) -> Self {
        Self {
            in_check: context.in_check,
            unpinned: !context.in_check
                && cannot_be_pinned(position, context.king_square, from),
            confirmed_lines: [None; 2],
        }
    }

    /// Whether `mv`, travelling along `line` (`None` for a knight jump), keeps
    /// the king safe.
    pub fn verify(&mut self, position: &mut Position, mv: ChessMove, line: Option<Direction>) -> bool {
        if self.in_check {
            return move_keeps_king_safe(position, mv);
        }
        if self.unpinned {
            return true;
        }

        let line = line.map(normalize_line);
        if line.is_some() && self.confirmed_lines.contains(&line) {
            return true;
        }

        let safe = move_keeps_king_safe(position, mv);
        if safe {
            match line {
                None => self.unpinned = true,
                Some(_) => {
                    if self.confirmed_lines[0].is_none() {
                        self.confirmed_lines[0] = line;
                    } else {
                        self.confirmed_lines[1] = line;
                        self.unpinned = true;
                    }
                }
            }
        }
        safe
    }
}

/// Collapses opposite directions onto one line.
fn normalize_line((df, dr): Direction) -> Direction {
    if dr < 0 || (dr == 0 && df < 0) {
        (-df, -dr)
    } else {
        (df, dr)
    }
}

/// All legal moves for the side to move. The position is only touched
/// transiently by safety probes and is unchanged on return.
pub fn generate_legal_moves(position: &mut Position) -> Vec<ChessMove> {
    let context = LegalityContext::of(position);
    let mut out = Vec::with_capacity(64);

    if !context.double_check {
        let side = position.side_to_move;
        let pieces: Vec<(Square, PieceKind)> = position.pieces_of(side).collect();
        for (from, kind) in pieces {
            match kind {
                PieceKind::Pawn => generate_pawn_moves(position, &context, from, &mut out),
                PieceKind::Knight => generate_knight_moves(position, &context, from, &mut out),
                PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
                    generate_slider_moves(position, &context, from, kind, &mut out)
                }
                PieceKind::King => {}
            }
        }
    }

    generate_king_moves(position, &context, &mut out);
    out
}

/// Looks `mv` up in the legal move list.
pub fn is_legal_move(position: &mut Position, mv: ChessMove) -> bool {
    generate_legal_moves(position).contains(&mv)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legal(fen: &str) -> Vec<ChessMove> {
        let mut position = Position::from_fen(fen).expect("FEN should parse");
        let before = position.clone();
        let moves = generate_legal_moves(&mut position);
        assert_eq!(position, before, "generation must leave the position untouched");
        moves
    }

    fn destinations_from(moves: &[ChessMove], from: Square) -> Vec<Square> {
        let mut to: Vec<Square> = moves.iter().filter(|m| m.from == from).map(|m| m.to).collect();
        to.sort_unstable();
        to
    }

    #[test]
    fn startpos_has_twenty_moves() {
        assert_eq!(legal(crate::game_state::chess_rules::STARTING_POSITION_FEN).len(), 20);
    }

    #[test]
    fn pinned_rook_moves_only_along_pin_line() {
        // White king e1, rook e3, black queen e8.
        let moves = legal("4q1k1/8/8/8/8/4R3/8/4K3 w - - 0 1");
        // e2, e4, e5, e6, e7 and the capture on e8.
        assert_eq!(destinations_from(&moves, 20), vec![12, 28, 36, 44, 52, 60]);
    }

    #[test]
    fn pinned_knight_cannot_move() {
        let moves = legal("4q1k1/8/8/8/8/4N3/8/4K3 w - - 0 1");
        assert!(destinations_from(&moves, 20).is_empty());
    }

    #[test]
    fn diagonally_pinned_bishop_stays_on_diagonal() {
        // White king a1, bishop c3, black bishop f6.
        let moves = legal("6k1/8/5b2/8/8/2B5/8/K7 w - - 0 1");
        assert_eq!(destinations_from(&moves, 18), vec![9, 27, 36, 45]);
    }

    #[test]
    fn en_passant_exposing_rank_check_is_excluded() {
        // White king a5, pawn b5; black pawn c5 just advanced; black rook h5.
        let moves = legal("4k3/8/8/KPp4r/8/8/8/8 w - c6 0 2");
        assert!(!moves.contains(&ChessMove::new(33, 42)));
        // The ordinary push is still fine: b5 leaves the rank but c5 keeps it blocked.
        assert!(moves.contains(&ChessMove::new(33, 41)));
    }

    #[test]
    fn en_passant_is_generated_when_safe() {
        let moves = legal("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2");
        assert!(moves.contains(&ChessMove::new(36, 43)));
    }

    #[test]
    fn double_check_allows_only_king_moves() {
        // Rook e8, bishop b4 and knight d3 all hit e1; the a3 rook may not take d3.
        let moves = legal("4r1k1/8/8/8/1b6/R2n4/8/4K3 w - - 0 1");
        assert!(moves.iter().all(|m| m.from == 4), "got {moves:?}");
        assert!(!moves.is_empty());
    }

    #[test]
    fn single_check_must_be_answered() {
        // Rook e8 checks; the d2 knight can block on e4 and nothing else.
        let moves = legal("4r1k1/8/8/8/8/8/3N4/4K3 w - - 0 1");
        let knight: Vec<_> = destinations_from(&moves, 11);
        assert_eq!(knight, vec![28]);
    }

    #[test]
    fn promotions_emit_four_moves() {
        let moves = legal("4k3/P7/8/8/8/8/8/4K3 w - - 0 1");
        assert_eq!(moves.iter().filter(|m| m.from == 48).count(), 4);
    }

    #[test]
    fn castling_through_attacked_square_is_rejected() {
        // Black rook f8 covers f1: no kingside castling, queenside is fine.
        let moves = legal("5rk1/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert!(!moves.contains(&ChessMove::new(4, 6)));
        assert!(moves.contains(&ChessMove::new(4, 2)));
    }
}
