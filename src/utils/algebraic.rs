//! Square conversions for algebraic coordinates (`e4` <-> index).

use thiserror::Error;

use crate::game_state::chess_types::*;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    #[error("invalid algebraic square '{0}'")]
    Malformed(String),
    #[error("invalid algebraic file '{0}'")]
    File(char),
    #[error("invalid algebraic rank '{0}'")]
    Rank(char),
}

/// Convert algebraic notation (for example: "e4") to a square index.
pub fn algebraic_to_square(text: &str) -> Result<Square, SquareError> {
    let bytes = text.as_bytes();
    if bytes.len() != 2 {
        return Err(SquareError::Malformed(text.to_owned()));
    }

    let file = bytes[0];
    let rank = bytes[1];
    if !(b'a'..=b'h').contains(&file) {
        return Err(SquareError::File(char::from(file)));
    }
    if !(b'1'..=b'8').contains(&rank) {
        return Err(SquareError::Rank(char::from(rank)));
    }

    Ok(make_square(file - b'a', rank - b'1'))
}

/// Convert a square index (`0..=63`) to algebraic notation (for example: "e4").
pub fn square_to_algebraic(square: Square) -> String {
    format!(
        "{}{}",
        char::from(b'a' + file_of(square)),
        char::from(b'1' + rank_of(square))
    )
}
