//! Mailbox board representation.
//!
//! `Position` is the single mutable model the engine works on. It is mutated
//! in place by `apply_move` / `undo_move` during both real play and search,
//! and carries denormalized caches (king squares, piece counts) that every
//! mutation keeps consistent instead of rescanning the board.

use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::game_state::position_signature::PositionSignature;
use crate::utils::fen_parser::{parse_fen, FenError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub(crate) squares: [Option<Piece>; 64],

    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,

    pub halfmove_clock: u16,
    pub fullmove_number: u16,

    // Denormalized caches.
    pub(crate) king_squares: [Square; 2],
    pub(crate) piece_counts: [u8; 2],

    // Number of applied-but-not-undone moves; guards LIFO undo order.
    pub(crate) applied_moves: u32,
}

impl Position {
    /// Board with no pieces. Only the FEN parser builds on this; it is not a
    /// valid position until both kings have been placed.
    pub(crate) fn empty() -> Self {
        Self {
            squares: [None; 64],
            side_to_move: Color::Light,
            castling_rights: 0,
            en_passant_square: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            king_squares: [0; 2],
            piece_counts: [0; 2],
            applied_moves: 0,
        }
    }

    pub fn new_game() -> Self {
        parse_fen(STARTING_POSITION_FEN).expect("starting FEN should always parse")
    }

    #[inline]
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        parse_fen(fen)
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[usize::from(square)]
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.squares[usize::from(square)].is_none()
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        self.king_squares[color.index()]
    }

    #[inline]
    pub fn piece_count(&self, color: Color) -> u8 {
        self.piece_counts[color.index()]
    }

    #[inline]
    pub fn has_castling_right(&self, right: CastlingRights) -> bool {
        self.castling_rights & right != 0
    }

    /// Structural fingerprint used by the position cache and repetition counting.
    #[inline]
    pub fn signature(&self) -> PositionSignature {
        PositionSignature::of(self)
    }

    /// Occupied squares of one colour, in board order.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, PieceKind)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter_map(move |(idx, cell)| match cell {
                Some(piece) if piece.color == color => Some((idx as Square, piece.kind)),
                _ => None,
            })
    }

    /// Places a piece on an empty square, maintaining the caches.
    pub(crate) fn place(&mut self, square: Square, piece: Piece) {
        debug_assert!(self.is_empty(square));
        self.squares[usize::from(square)] = Some(piece);
        self.piece_counts[piece.color.index()] += 1;
        if piece.kind == PieceKind::King {
            self.king_squares[piece.color.index()] = square;
        }
    }

    #[inline]
    pub(crate) fn set_square(&mut self, square: Square, content: Option<Piece>) {
        self.squares[usize::from(square)] = content;
    }

    #[inline]
    pub(crate) fn take_square(&mut self, square: Square) -> Option<Piece> {
        self.squares[usize::from(square)].take()
    }
}
