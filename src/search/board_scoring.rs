//! Pluggable board evaluation interfaces and baseline implementations.
//!
//! Search remains modular by delegating position scoring to [`BoardScorer`],
//! allowing alternate heuristics to be swapped without altering search code.
//! Scores are from White's perspective in decipawns (pawn = 10). Magnitudes
//! above [`MATE_THRESHOLD`] are reserved for forced mates.

use crate::game_state::chess_types::*;
use crate::game_state::game_status::{classify, GameStatus};
use crate::move_generation::legal_move_checks::for_each_controlled_square;

pub const MATE_SCORE: i32 = 1000;
pub const MATE_THRESHOLD: i32 = 950;
/// Ordinary evaluations are clamped to this magnitude.
pub const EVAL_LIMIT: i32 = 900;
pub const TEMPO_BONUS: i32 = 1;

#[inline]
pub fn is_mate_score(score: i32) -> bool {
    score.abs() > MATE_THRESHOLD
}

/// Moves to mate for a mate score: positive when White mates, negative when
/// Black mates.
pub fn mate_distance(score: i32) -> Option<i32> {
    if !is_mate_score(score) {
        return None;
    }
    let moves = (MATE_SCORE - score.abs() + 1) / 2;
    Some(if score > 0 { moves } else { -moves })
}

/// Score for a terminal position as reported by the terminal-condition oracle.
pub fn terminal_score(position: &Position, ply_from_root: u32, legal_moves: &[ChessMove]) -> Option<i32> {
    let ply = ply_from_root as i32;
    match classify(position, legal_moves) {
        GameStatus::Ongoing => None,
        GameStatus::Checkmate => Some(match position.side_to_move {
            Color::Light => -MATE_SCORE + ply,
            Color::Dark => MATE_SCORE - ply,
        }),
        GameStatus::Stalemate
        | GameStatus::DrawByInsufficientMaterial
        | GameStatus::DrawByFiftyMoveRule => Some(0),
    }
}

pub trait BoardScorer: Send + Sync {
    /// Material plus placement, White minus Black, for a non-terminal position.
    fn static_score(&self, position: &Position) -> i32;

    fn name(&self) -> &'static str;

    /// Full evaluation: terminal conditions first, then the static score plus
    /// the tempo bonus for the side to move.
    fn evaluate(&self, position: &Position, ply_from_root: u32, legal_moves: &[ChessMove]) -> i32 {
        if let Some(score) = terminal_score(position, ply_from_root, legal_moves) {
            return score;
        }
        let tempo = match position.side_to_move {
            Color::Light => TEMPO_BONUS,
            Color::Dark => -TEMPO_BONUS,
        };
        (self.static_score(position) + tempo).clamp(-EVAL_LIMIT, EVAL_LIMIT)
    }
}

impl<T: BoardScorer + ?Sized> BoardScorer for Box<T> {
    fn static_score(&self, position: &Position) -> i32 {
        (**self).static_score(position)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn evaluate(&self, position: &Position, ply_from_root: u32, legal_moves: &[ChessMove]) -> i32 {
        (**self).evaluate(position, ply_from_root, legal_moves)
    }
}

/// Builds a scorer from its option name.
pub fn scorer_by_name(name: &str) -> Option<Box<dyn BoardScorer>> {
    match name.trim().to_ascii_lowercase().as_str() {
        "material" => Some(Box::new(MaterialScorer)),
        "piece_square" | "piecesquare" | "pst" => Some(Box::new(PieceSquareScorer)),
        "mobility" => Some(Box::new(MobilityScorer)),
        _ => None,
    }
}

#[inline]
pub const fn piece_value(piece: PieceKind) -> i32 {
    match piece {
        PieceKind::Pawn => 10,
        PieceKind::Knight => 30,
        PieceKind::Bishop => 32,
        PieceKind::Rook => 50,
        PieceKind::Queen => 90,
        PieceKind::King => 0,
    }
}

fn material_balance_white_minus_black(position: &Position) -> i32 {
    let light: i32 = position.pieces_of(Color::Light).map(|(_, kind)| piece_value(kind)).sum();
    let dark: i32 = position.pieces_of(Color::Dark).map(|(_, kind)| piece_value(kind)).sum();
    light - dark
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl BoardScorer for MaterialScorer {
    fn static_score(&self, position: &Position) -> i32 {
        material_balance_white_minus_black(position)
    }

    fn name(&self) -> &'static str {
        "material"
    }
}

// Placement tables from White's point of view, a1 first.
#[rustfmt::skip]
const PAWN_TABLE: [i8; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     1,  1,  1, -2, -2,  1,  1,  1,
     1, -1, -1,  0,  0, -1, -1,  1,
     0,  0,  0,  2,  2,  0,  0,  0,
     1,  1,  1,  3,  3,  1,  1,  1,
     1,  1,  2,  3,  3,  2,  1,  1,
     5,  5,  5,  5,  5,  5,  5,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const KNIGHT_TABLE: [i8; 64] = [
    -5, -4, -3, -3, -3, -3, -4, -5,
    -4, -2,  0,  1,  1,  0, -2, -4,
    -3,  1,  1,  2,  2,  1,  1, -3,
    -3,  0,  2,  2,  2,  2,  0, -3,
    -3,  1,  2,  2,  2,  2,  1, -3,
    -3,  0,  1,  2,  2,  1,  0, -3,
    -4, -2,  0,  0,  0,  0, -2, -4,
    -5, -4, -3, -3, -3, -3, -4, -5,
];

#[rustfmt::skip]
const BISHOP_TABLE: [i8; 64] = [
    -2, -1, -1, -1, -1, -1, -1, -2,
    -1,  1,  0,  0,  0,  0,  1, -1,
    -1,  1,  1,  1,  1,  1,  1, -1,
    -1,  0,  1,  1,  1,  1,  0, -1,
    -1,  1,  1,  1,  1,  1,  1, -1,
    -1,  0,  1,  1,  1,  1,  0, -1,
    -1,  0,  0,  0,  0,  0,  0, -1,
    -2, -1, -1, -1, -1, -1, -1, -2,
];

#[rustfmt::skip]
const ROOK_TABLE: [i8; 64] = [
     0,  0,  0,  1,  1,  0,  0,  0,
    -1,  0,  0,  0,  0,  0,  0, -1,
    -1,  0,  0,  0,  0,  0,  0, -1,
    -1,  0,  0,  0,  0,  0,  0, -1,
    -1,  0,  0,  0,  0,  0,  0, -1,
    -1,  0,  0,  0,  0,  0,  0, -1,
     1,  1,  1,  1,  1,  1,  1,  1,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const QUEEN_TABLE: [i8; 64] = [
    -2, -1, -1,  0,  0, -1, -1, -2,
    -1,  0,  1,  0,  0,  0,  0, -1,
    -1,  1,  1,  1,  1,  1,  0, -1,
     0,  0,  1,  1,  1,  1,  0,  0,
     0,  0,  1,  1,  1,  1,  0,  0,
    -1,  0,  1,  1,  1,  1,  0, -1,
    -1,  0,  0,  0,  0,  0,  0, -1,
    -2, -1, -1,  0,  0, -1, -1, -2,
];

#[rustfmt::skip]
const KING_TABLE: [i8; 64] = [
     2,  3,  1,  0,  0,  1,  3,  2,
     2,  2,  0,  0,  0,  0,  2,  2,
    -1, -2, -2, -2, -2, -2, -2, -1,
    -2, -3, -3, -4, -4, -3, -3, -2,
    -3, -4, -4, -5, -5, -4, -4, -3,
    -3, -4, -4, -5, -5, -4, -4, -3,
    -3, -4, -4, -5, -5, -4, -4, -3,
    -3, -4, -4, -5, -5, -4, -4, -3,
];

#[inline]
fn placement(kind: PieceKind, color: Color, square: Square) -> i32 {
    let table = match kind {
        PieceKind::Pawn => &PAWN_TABLE,
        PieceKind::Knight => &KNIGHT_TABLE,
        PieceKind::Bishop => &BISHOP_TABLE,
        PieceKind::Rook => &ROOK_TABLE,
        PieceKind::Queen => &QUEEN_TABLE,
        PieceKind::King => &KING_TABLE,
    };
    let index = match color {
        Color::Light => square,
        Color::Dark => square ^ 56,
    };
    i32::from(table[usize::from(index)])
}

/// Material plus a static piece-square table, mirrored for Black.
#[derive(Debug, Clone, Copy, Default)]
pub struct PieceSquareScorer;

impl BoardScorer for PieceSquareScorer {
    fn static_score(&self, position: &Position) -> i32 {
        let mut score = material_balance_white_minus_black(position);
        for (square, kind) in position.pieces_of(Color::Light) {
            score += placement(kind, Color::Light, square);
        }
        for (square, kind) in position.pieces_of(Color::Dark) {
            score -= placement(kind, Color::Dark, square);
        }
        score
    }

    fn name(&self) -> &'static str {
        "piece_square"
    }
}

/// Material plus a dynamic control term: every square a non-king piece
/// reaches counts once when empty, once when it defends a friend and twice
/// when it attacks an enemy.
#[derive(Debug, Clone, Copy, Default)]
pub struct MobilityScorer;

impl MobilityScorer {
    const CONTROL_DIVISOR: i32 = 4;

    fn control(position: &Position, color: Color) -> i32 {
        let mut total = 0i32;
        for (from, kind) in position.pieces_of(color) {
            if kind == PieceKind::King {
                continue;
            }
            for_each_controlled_square(position, from, |square| {
                total += match position.piece_at(square) {
                    None => 1,
                    Some(piece) if piece.color == color => 1,
                    Some(_) => 2,
                };
            });
        }
        total
    }
}

impl BoardScorer for MobilityScorer {
    fn static_score(&self, position: &Position) -> i32 {
        let control = Self::control(position, Color::Light) - Self::control(position, Color::Dark);
        material_balance_white_minus_black(position) + control / Self::CONTROL_DIVISOR
    }

    fn name(&self) -> &'static str {
        "mobility"
    }
}
