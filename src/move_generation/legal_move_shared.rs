use crate::game_state::chess_types::*;

/// `(file_delta, rank_delta)` step.
pub type Direction = (i8, i8);

pub const ORTHOGONAL_DIRECTIONS: [Direction; 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
pub const DIAGONAL_DIRECTIONS: [Direction; 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub const KING_OFFSETS: [Direction; 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];
pub const KNIGHT_OFFSETS: [Direction; 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// Ray directions a sliding piece of `kind` may travel along.
pub fn slider_directions(kind: PieceKind) -> &'static [Direction] {
    const QUEEN_DIRECTIONS: [Direction; 8] = KING_OFFSETS;
    match kind {
        PieceKind::Bishop => &DIAGONAL_DIRECTIONS,
        PieceKind::Rook => &ORTHOGONAL_DIRECTIONS,
        PieceKind::Queen => &QUEEN_DIRECTIONS,
        _ => &[],
    }
}

/// Unit step from `from` toward `to` when both share a rank, file or diagonal.
pub fn ray_direction(from: Square, to: Square) -> Option<Direction> {
    if from == to {
        return None;
    }
    let df = file_of(to) as i8 - file_of(from) as i8;
    let dr = rank_of(to) as i8 - rank_of(from) as i8;
    if df == 0 || dr == 0 || df.abs() == dr.abs() {
        Some((df.signum(), dr.signum()))
    } else {
        None
    }
}

#[inline]
pub fn is_diagonal(direction: Direction) -> bool {
    direction.0 != 0 && direction.1 != 0
}

/// Square of the pawn removed when `mv` is an en-passant capture in `position`.
pub fn en_passant_victim_square(position: &Position, mv: ChessMove) -> Option<Square> {
    let mover = position.piece_at(mv.from)?;
    if mover.kind != PieceKind::Pawn
        || position.en_passant_square != Some(mv.to)
        || file_of(mv.from) == file_of(mv.to)
        || !position.is_empty(mv.to)
    {
        return None;
    }
    Some(make_square(file_of(mv.to), rank_of(mv.from)))
}
