//! Core value types shared by the board, the move generator and the search.
//!
//! Squares are plain indices with `0 == a1`, `7 == h1` and `63 == h8`.

pub use crate::game_state::position::Position;
pub use crate::game_state::undo_state::UndoRecord;

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// Rank step a pawn of this colour advances by.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::Light => 1,
            Color::Dark => -1,
        }
    }

    #[inline]
    pub const fn home_rank(self) -> u8 {
        match self {
            Color::Light => 0,
            Color::Dark => 7,
        }
    }

    #[inline]
    pub const fn pawn_start_rank(self) -> u8 {
        match self {
            Color::Light => 1,
            Color::Dark => 6,
        }
    }

    #[inline]
    pub const fn promotion_rank(self) -> u8 {
        match self {
            Color::Light => 7,
            Color::Dark => 0,
        }
    }
}

/// Piece kind (colour is carried separately in [`Piece`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Lower-case letter used by FEN and long algebraic promotion suffixes.
    #[inline]
    pub const fn to_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    #[inline]
    pub fn from_char(ch: char) -> Option<Self> {
        match ch.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// Promotion choices in the order the generator emits them.
pub const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// Occupant of a board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// 4-bit code used by the packed position signature (`0` is reserved for empty).
    #[inline]
    pub const fn code(self) -> u8 {
        1 + self.kind.index() as u8 + 6 * self.color.index() as u8
    }
}

/// Board square index (`0..=63`).
pub type Square = u8;

#[inline]
pub const fn file_of(square: Square) -> u8 {
    square % 8
}

#[inline]
pub const fn rank_of(square: Square) -> u8 {
    square / 8
}

#[inline]
pub const fn make_square(file: u8, rank: u8) -> Square {
    rank * 8 + file
}

/// Square reached by stepping `(file_delta, rank_delta)`, or `None` off the board.
#[inline]
pub fn offset_square(square: Square, file_delta: i8, rank_delta: i8) -> Option<Square> {
    let file = file_of(square) as i8 + file_delta;
    let rank = rank_of(square) as i8 + rank_delta;
    if (0..8).contains(&file) && (0..8).contains(&rank) {
        Some(make_square(file as u8, rank as u8))
    } else {
        None
    }
}

/// Light-coloured squares have odd `file + rank`.
#[inline]
pub const fn is_light_square(square: Square) -> bool {
    (file_of(square) + rank_of(square)) % 2 == 1
}

/// Castling rights bitmask.
pub type CastlingRights = u8;

pub const CASTLE_LIGHT_KINGSIDE: CastlingRights = 1 << 0;
pub const CASTLE_LIGHT_QUEENSIDE: CastlingRights = 1 << 1;
pub const CASTLE_DARK_KINGSIDE: CastlingRights = 1 << 2;
pub const CASTLE_DARK_QUEENSIDE: CastlingRights = 1 << 3;

#[inline]
pub const fn kingside_right(color: Color) -> CastlingRights {
    match color {
        Color::Light => CASTLE_LIGHT_KINGSIDE,
        Color::Dark => CASTLE_DARK_KINGSIDE,
    }
}

#[inline]
pub const fn queenside_right(color: Color) -> CastlingRights {
    match color {
        Color::Light => CASTLE_LIGHT_QUEENSIDE,
        Color::Dark => CASTLE_DARK_QUEENSIDE,
    }
}

/// The castling right tied to a rook's original corner square, if any.
#[inline]
pub const fn castling_right_for_corner(square: Square) -> Option<CastlingRights> {
    match square {
        0 => Some(CASTLE_LIGHT_QUEENSIDE),
        7 => Some(CASTLE_LIGHT_KINGSIDE),
        56 => Some(CASTLE_DARK_QUEENSIDE),
        63 => Some(CASTLE_DARK_KINGSIDE),
        _ => None,
    }
}

/// Move descriptor: origin, destination and optional promotion piece.
///
/// Castling is a two-file king shift; the rook relocation is derived when the
/// move is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChessMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl ChessMove {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    #[inline]
    pub const fn promoting(from: Square, to: Square, piece: PieceKind) -> Self {
        Self {
            from,
            to,
            promotion: Some(piece),
        }
    }
}

impl std::fmt::Display for ChessMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let square = |sq: Square| {
            format!(
                "{}{}",
                char::from(b'a' + file_of(sq)),
                char::from(b'1' + rank_of(sq))
            )
        };
        write!(f, "{}{}", square(self.from), square(self.to))?;
        if let Some(piece) = self.promotion {
            write!(f, "{}", piece.to_char())?;
        }
        Ok(())
    }
}
