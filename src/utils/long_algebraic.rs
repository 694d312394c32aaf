//! Long algebraic move text (`e2e4`, `e7e8q`).

use thiserror::Error;

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_generator::is_legal_move;
use crate::utils::algebraic::{algebraic_to_square, SquareError};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveTextError {
    #[error("invalid long algebraic move '{0}'")]
    Length(String),
    #[error("invalid square in move: {0}")]
    Square(#[from] SquareError),
    #[error("invalid promotion piece '{0}'")]
    Promotion(char),
    #[error("move {0} is not legal in this position")]
    Illegal(String),
}

/// Parses move text without consulting any position.
pub fn parse_long_algebraic(text: &str) -> Result<ChessMove, MoveTextError> {
    let text = text.trim();
    if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
        return Err(MoveTextError::Length(text.to_owned()));
    }

    let from = algebraic_to_square(&text[0..2])?;
    let to = algebraic_to_square(&text[2..4])?;
    let promotion = match text[4..].chars().next() {
        None => None,
        Some(ch) => match PieceKind::from_char(ch) {
            Some(kind @ (PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)) => {
                Some(kind)
            }
            _ => return Err(MoveTextError::Promotion(ch)),
        },
    };

    Ok(ChessMove { from, to, promotion })
}

/// Parses move text and checks it against the legal moves of `position`.
pub fn long_algebraic_to_legal_move(
    text: &str,
    position: &mut Position,
) -> Result<ChessMove, MoveTextError> {
    let mv = parse_long_algebraic(text)?;
    if is_legal_move(position, mv) {
        Ok(mv)
    } else {
        Err(MoveTextError::Illegal(mv.to_string()))
    }
}
