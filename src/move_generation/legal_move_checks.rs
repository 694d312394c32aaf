//! Check and attack oracle.
//!
//! Answers "is this square attacked, and by whom" by scanning outward from the
//! square: knight jumps, the two pawn diagonals, adjacent kings, and the first
//! occupant along each of the eight rays. The probe helpers answer the same
//! question for the position one pending move ahead by toggling only the
//! squares the move touches.

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::*;

#[inline]
fn holds(position: &Position, square: Square, color: Color, kinds: &[PieceKind]) -> bool {
    matches!(position.piece_at(square), Some(p) if p.color == color && kinds.contains(&p.kind))
}

/// Calls `visit` for every attacker of `square` belonging to `by`; stops early
/// when `visit` returns `false`.
fn scan_attackers(
    position: &Position,
    square: Square,
    by: Color,
    mut visit: impl FnMut(Square) -> bool,
) {
    for (df, dr) in KNIGHT_OFFSETS {
        if let Some(sq) = offset_square(square, df, dr) {
            if holds(position, sq, by, &[PieceKind::Knight]) && !visit(sq) {
                return;
            }
        }
    }

    // A pawn of `by` attacks `square` from one rank behind it (in `by`'s frame).
    for df in [-1i8, 1] {
        if let Some(sq) = offset_square(square, df, -by.forward()) {
            if holds(position, sq, by, &[PieceKind::Pawn]) && !visit(sq) {
                return;
            }
        }
    }

    for (df, dr) in KING_OFFSETS {
        if let Some(sq) = offset_square(square, df, dr) {
            if holds(position, sq, by, &[PieceKind::King]) && !visit(sq) {
                return;
            }
        }
    }

    for (directions, kinds) in [
        (&ORTHOGONAL_DIRECTIONS, [PieceKind::Rook, PieceKind::Queen]),
        (&DIAGONAL_DIRECTIONS, [PieceKind::Bishop, PieceKind::Queen]),
    ] {
        for &(df, dr) in directions {
            if let Some(sq) = first_occupied(position, square, (df, dr)) {
                if holds(position, sq, by, &kinds) && !visit(sq) {
                    return;
                }
            }
        }
    }
}

/// First non-empty square strictly beyond `from` along `direction`.
pub fn first_occupied(position: &Position, from: Square, direction: Direction) -> Option<Square> {
    let mut current = from;
    while let Some(next) = offset_square(current, direction.0, direction.1) {
        if !position.is_empty(next) {
            return Some(next);
        }
        current = next;
    }
    None
}

pub fn is_square_attacked(position: &Position, square: Square, by: Color) -> bool {
    let mut attacked = false;
    scan_attackers(position, square, by, |_| {
        attacked = true;
        false
    });
    attacked
}

/// Attackers of `square` belonging to `by`; stops once two are found, since a
/// double check can only be answered by a king move.
pub fn attackers_of(position: &Position, square: Square, by: Color) -> Vec<Square> {
    let mut attackers = Vec::with_capacity(2);
    scan_attackers(position, square, by, |sq| {
        attackers.push(sq);
        attackers.len() < 2
    });
    attackers
}

#[inline]
pub fn is_king_in_check(position: &Position, color: Color) -> bool {
    is_square_attacked(position, position.king_square(color), color.opposite())
}

/// Runs `query` against the board as it would look after `mv`, touching only
/// the origin, destination and (for en passant) the captured pawn's square.
/// Clocks, rights and caches are never changed.
pub fn probe<R>(position: &mut Position, mv: ChessMove, query: impl FnOnce(&Position) -> R) -> R {
    let victim_square = en_passant_victim_square(position, mv);
    let moving = position.take_square(mv.from);
    let previous_to = position.piece_at(mv.to);
    position.set_square(mv.to, moving);
    let victim = victim_square.and_then(|sq| position.take_square(sq));

    let result = query(position);

    if let Some(sq) = victim_square {
        position.set_square(sq, victim);
    }
    position.set_square(mv.to, previous_to);
    position.set_square(mv.from, moving);
    result
}

/// True when `mv` would not leave the mover's king attacked.
pub fn move_keeps_king_safe(position: &mut Position, mv: ChessMove) -> bool {
    let side = position.side_to_move;
    let king_target = match position.piece_at(mv.from) {
        Some(piece) if piece.kind == PieceKind::King => mv.to,
        _ => position.king_square(side),
    };
    probe(position, mv, |board| {
        !is_square_attacked(board, king_target, side.opposite())
    })
}

/// Attackers of `square` after the pending `mv`.
pub fn attackers_after(
    position: &mut Position,
    square: Square,
    by: Color,
    mv: ChessMove,
) -> Vec<Square> {
    probe(position, mv, |board| attackers_of(board, square, by))
}

/// Walks the single ray from the king through `vacated`. Returns `true` when no
/// enemy slider of `kinds` is uncovered on it. A piece landing on `destination`
/// inside that ray keeps it blocked. Without a destination the question is
/// whether the piece may leave `vacated` at all.
fn safe_from_discovery_along(
    position: &Position,
    king_square: Square,
    vacated: Square,
    destination: Option<Square>,
    diagonal: bool,
) -> bool {
    let Some(direction) = ray_direction(king_square, vacated) else {
        return true;
    };
    if is_diagonal(direction) != diagonal {
        return true;
    }

    let side = match position.piece_at(king_square) {
        Some(piece) => piece.color,
        None => return true,
    };
    let sliders: [PieceKind; 2] = if diagonal {
        [PieceKind::Bishop, PieceKind::Queen]
    } else {
        [PieceKind::Rook, PieceKind::Queen]
    };

    let mut current = king_square;
    while let Some(next) = offset_square(current, direction.0, direction.1) {
        if Some(next) == destination {
            return true;
        }
        if next != vacated {
            if let Some(piece) = position.piece_at(next) {
                return !(piece.color != side && sliders.contains(&piece.kind));
            }
        }
        current = next;
    }
    true
}

#[inline]
pub fn safe_from_line_discovery(
    position: &Position,
    king_square: Square,
    vacated: Square,
    destination: Option<Square>,
) -> bool {
    safe_from_discovery_along(position, king_square, vacated, destination, false)
}

#[inline]
pub fn safe_from_diagonal_discovery(
    position: &Position,
    king_square: Square,
    vacated: Square,
    destination: Option<Square>,
) -> bool {
    safe_from_discovery_along(position, king_square, vacated, destination, true)
}

/// Whether vacating `square` can never expose the king of its owner.
#[inline]
pub fn cannot_be_pinned(position: &Position, king_square: Square, square: Square) -> bool {
    safe_from_line_discovery(position, king_square, square, None)
        && safe_from_diagonal_discovery(position, king_square, square, None)
}

/// Squares the piece on `from` attacks or defends (pawns: diagonals only).
pub fn for_each_controlled_square(position: &Position, from: Square, mut visit: impl FnMut(Square)) {
    let Some(piece) = position.piece_at(from) else {
        return;
    };
    match piece.kind {
        PieceKind::Pawn => {
            for df in [-1i8, 1] {
                if let Some(sq) = offset_square(from, df, piece.color.forward()) {
                    visit(sq);
                }
            }
        }
        PieceKind::Knight => {
            for (df, dr) in KNIGHT_OFFSETS {
                if let Some(sq) = offset_square(from, df, dr) {
                    visit(sq);
                }
            }
        }
        PieceKind::King => {
            for (df, dr) in KING_OFFSETS {
                if let Some(sq) = offset_square(from, df, dr) {
                    visit(sq);
                }
            }
        }
        kind => {
            for &(df, dr) in slider_directions(kind) {
                let mut current = from;
                while let Some(next) = offset_square(current, df, dr) {
                    visit(next);
                    if !position.is_empty(next) {
                        break;
                    }
                    current = next;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(fen: &str) -> Position {
        Position::from_fen(fen).expect("FEN should parse")
    }

    #[test]
    fn pawn_attacks_respect_direction() {
        // White pawn on e4 attacks d5 and f5, not d3.
        let pos = position("4k3/8/8/8/4P3/8/8/4K3 w - - 0 1");
        assert!(is_square_attacked(&pos, 35, Color::Light));
        assert!(is_square_attacked(&pos, 37, Color::Light));
        assert!(!is_square_attacked(&pos, 19, Color::Light));
    }

    #[test]
    fn sliders_are_blocked_by_first_occupant() {
        // Black rook a8, own pawn a5 blocks the a-file below it.
        let pos = position("r3k3/8/8/p7/8/8/8/4K3 w - - 0 1");
        assert!(is_square_attacked(&pos, 48, Color::Dark));
        assert!(!is_square_attacked(&pos, 24, Color::Dark));
    }

    #[test]
    fn attackers_of_stops_at_two() {
        // King e1 attacked by rook e8, bishop b4 and knight d3.
        let pos = position("4r1k1/8/8/8/1b6/3n4/8/4K3 w - - 0 1");
        let attackers = attackers_of(&pos, 4, Color::Dark);
        assert_eq!(attackers.len(), 2);
    }

    #[test]
    fn probe_restores_board() {
        let mut pos = position("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2");
        let before = pos.clone();
        let mv = ChessMove::new(36, 43);
        let empty_victim = probe(&mut pos, mv, |board| board.is_empty(35));
        assert!(empty_victim);
        assert_eq!(pos, before);
    }

    #[test]
    fn line_discovery_detects_pin() {
        // White king e1, rook e3, black queen e8.
        let pos = position("4q1k1/8/8/8/8/4R3/8/4K3 w - - 0 1");
        assert!(!safe_from_line_discovery(&pos, 4, 20, None));
        assert!(!safe_from_line_discovery(&pos, 4, 20, Some(21)));
        assert!(safe_from_line_discovery(&pos, 4, 20, Some(36)));
        assert!(safe_from_diagonal_discovery(&pos, 4, 20, None));
        assert!(!cannot_be_pinned(&pos, 4, 20));
    }

    #[test]
    fn move_keeps_king_safe_rejects_walking_along_slider_ray() {
        // King e1 in check from rook e8 cannot step to e2.
        let mut pos = position("4r1k1/8/8/8/8/8/8/4K3 w - - 0 1");
        assert!(!move_keeps_king_safe(&mut pos, ChessMove::new(4, 12)));
        assert!(move_keeps_king_safe(&mut pos, ChessMove::new(4, 3)));
    }

    #[test]
    fn attackers_after_block_clears_the_check() {
        let mut board = position("4r1k1/8/8/8/8/8/3N4/4K3 w - - 0 1");
        let before = board.clone();
        assert_eq!(attackers_of(&board, 4, Color::Dark), vec![60]);

        let block = ChessMove::new(11, 28);
        assert!(attackers_after(&mut board, 4, Color::Dark, block).is_empty());
        assert_eq!(board, before);
    }

    #[test]
    fn attackers_after_en_passant_sees_rank_discovery() {
        let mut board = position("8/8/8/K2pP2r/8/8/8/7k w - d6 0 1");
        let before = board.clone();
        assert!(attackers_of(&board, 32, Color::Dark).is_empty());

        let capture = ChessMove::new(36, 43);
        assert_eq!(attackers_after(&mut board, 32, Color::Dark, capture), vec![39]);
        assert_eq!(board, before);
    }
}
