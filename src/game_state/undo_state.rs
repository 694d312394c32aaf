use crate::game_state::chess_types::*;

/// What an intermediary slot of an [`UndoRecord`] stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntermediaryKind {
    /// Slot unused by this move.
    None,
    /// Square of the pawn removed by an en-passant capture.
    CapturedPawn,
    /// Origin or destination square of the rook moved by castling.
    CastlingRook,
}

/// Prior state of a square touched by a move besides its origin and destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intermediary {
    pub kind: IntermediaryKind,
    pub square: Square,
    pub prior: Option<Piece>,
}

impl Intermediary {
    pub const NONE: Intermediary = Intermediary {
        kind: IntermediaryKind::None,
        square: 0,
        prior: None,
    };
}

/// Everything needed to reverse one applied move in O(1).
///
/// Produced by `apply_move` and consumed by `undo_move` strictly in LIFO
/// order; `stamp` is the position's applied-move height right after the apply
/// and is checked on undo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoRecord {
    pub mv: ChessMove,
    pub captured: Option<Piece>,
    pub intermediaries: [Intermediary; 2],
    pub intermediary_count: u8,

    pub prev_castling_rights: CastlingRights,
    pub prev_en_passant_square: Option<Square>,
    pub prev_halfmove_clock: u16,
    pub prev_fullmove_number: u16,

    pub prev_king_square: Option<Square>,
    pub stamp: u32,
}

impl UndoRecord {
    pub(crate) fn push_intermediary(&mut self, intermediary: Intermediary) {
        let slot = usize::from(self.intermediary_count);
        assert!(slot < 2, "a move touches at most two intermediary squares");
        self.intermediaries[slot] = intermediary;
        self.intermediary_count += 1;
    }

    /// Recorded intermediaries, in the order they were recorded.
    pub fn recorded_intermediaries(&self) -> &[Intermediary] {
        &self.intermediaries[..usize::from(self.intermediary_count)]
    }
}
