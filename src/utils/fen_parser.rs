//! FEN-to-Position parser.
//!
//! Builds a fully-populated position from a Forsyth-Edwards Notation string,
//! including the cached king squares and piece counts. Any malformed field
//! yields a [`FenError`]; no partially-built position escapes.

use thiserror::Error;

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::utils::algebraic::{algebraic_to_square, SquareError};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("missing {0} in FEN")]
    MissingField(&'static str),
    #[error("FEN has extra trailing fields")]
    TrailingFields,
    #[error("board layout must contain 8 ranks, found {0}")]
    RankCount(usize),
    #[error("rank {rank} does not sum to 8 files")]
    RankWidth { rank: u8 },
    #[error("invalid piece character '{0}' in board layout")]
    PieceChar(char),
    #[error("invalid side-to-move field '{0}'")]
    SideToMove(String),
    #[error("invalid castling rights character '{0}'")]
    CastlingChar(char),
    #[error("invalid en-passant square: {0}")]
    EnPassant(#[from] SquareError),
    #[error("en-passant square {0} is not on the third or sixth rank")]
    EnPassantRank(String),
    #[error("en-passant square {0} does not follow a double pawn push by the opponent")]
    EnPassantUnreachable(String),
    #[error("invalid {field} '{value}'")]
    Counter { field: &'static str, value: String },
    #[error("{color:?} must have exactly one king, found {count}")]
    KingCount { color: Color, count: usize },
    #[error("{0:?} is in check but it is not their turn")]
    OpponentInCheck(Color),
}

pub fn parse_fen(fen: &str) -> Result<Position, FenError> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or(FenError::MissingField("board layout"))?;
    let side_part = parts.next().ok_or(FenError::MissingField("side to move"))?;
    let castling_part = parts.next().ok_or(FenError::MissingField("castling rights"))?;
    let en_passant_part = parts.next().ok_or(FenError::MissingField("en-passant square"))?;
    let halfmove_part = parts.next().ok_or(FenError::MissingField("halfmove clock"))?;
    let fullmove_part = parts.next().ok_or(FenError::MissingField("fullmove number"))?;

    if parts.next().is_some() {
        return Err(FenError::TrailingFields);
    }

    let mut position = Position::empty();

    parse_board(board_part, &mut position)?;
    position.side_to_move = parse_side_to_move(side_part)?;
    position.castling_rights = parse_castling_rights(castling_part)?;
    position.en_passant_square = parse_en_passant_square(en_passant_part)?;
    position.halfmove_clock = parse_counter("halfmove clock", halfmove_part)?;
    position.fullmove_number = parse_counter("fullmove number", fullmove_part)?;

    if let Some(target) = position.en_passant_square {
        validate_en_passant_target(&position, target, en_passant_part)?;
    }

    // A king left in check by the previous move could be captured.
    let waiting = position.side_to_move.opposite();
    if is_king_in_check(&position, waiting) {
        return Err(FenError::OpponentInCheck(waiting));
    }

    Ok(position)
}

fn parse_board(board_part: &str, position: &mut Position) -> Result<(), FenError> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::RankCount(ranks.len()));
    }

    let mut kings = [0usize; 2];

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - fen_rank_idx as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(FenError::PieceChar(ch));
                }
                file += empty_count as u8;
                if file > 8 {
                    return Err(FenError::RankWidth { rank: rank + 1 });
                }
                continue;
            }

            let piece = piece_from_fen_char(ch).ok_or(FenError::PieceChar(ch))?;
            if file >= 8 {
                return Err(FenError::RankWidth { rank: rank + 1 });
            }
            if piece.kind == PieceKind::King {
                kings[piece.color.index()] += 1;
            }
            position.place(make_square(file, rank), piece);
            file += 1;
        }

        if file != 8 {
            return Err(FenError::RankWidth { rank: rank + 1 });
        }
    }

    for color in [Color::Light, Color::Dark] {
        let count = kings[color.index()];
        if count != 1 {
            return Err(FenError::KingCount { color, count });
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> Result<Color, FenError> {
    match side_part {
        "w" => Ok(Color::Light),
        "b" => Ok(Color::Dark),
        _ => Err(FenError::SideToMove(side_part.to_owned())),
    }
}

fn parse_castling_rights(castling_part: &str) -> Result<CastlingRights, FenError> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;
    for ch in castling_part.chars() {
        match ch {
            'K' => rights |= CASTLE_LIGHT_KINGSIDE,
            'Q' => rights |= CASTLE_LIGHT_QUEENSIDE,
            'k' => rights |= CASTLE_DARK_KINGSIDE,
            'q' => rights |= CASTLE_DARK_QUEENSIDE,
            _ => return Err(FenError::CastlingChar(ch)),
        }
    }
    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> Result<Option<Square>, FenError> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let square = algebraic_to_square(en_passant_part)?;
    if rank_of(square) != 2 && rank_of(square) != 5 {
        return Err(FenError::EnPassantRank(en_passant_part.to_owned()));
    }
    Ok(Some(square))
}

/// The target must sit behind an enemy pawn that just advanced two squares:
/// rank 6 with White to move, rank 3 with Black to move, the pawn's origin
/// and the target itself both empty.
fn validate_en_passant_target(position: &Position, target: Square, text: &str) -> Result<(), FenError> {
    let mover = position.side_to_move;
    let expected_rank = if mover == Color::Light { 5 } else { 2 };
    if rank_of(target) != expected_rank {
        return Err(FenError::EnPassantRank(text.to_owned()));
    }

    let pushed_pawn = offset_square(target, 0, -mover.forward());
    let pawn_origin = offset_square(target, 0, mover.forward());
    let consistent = position.is_empty(target)
        && pawn_origin.is_some_and(|square| position.is_empty(square))
        && pushed_pawn.and_then(|square| position.piece_at(square))
            == Some(Piece::new(mover.opposite(), PieceKind::Pawn));
    if !consistent {
        return Err(FenError::EnPassantUnreachable(text.to_owned()));
    }
    Ok(())
}

fn parse_counter(field: &'static str, text: &str) -> Result<u16, FenError> {
    text.parse::<u16>().map_err(|_| FenError::Counter {
        field,
        value: text.to_owned(),
    })
}

fn piece_from_fen_char(ch: char) -> Option<Piece> {
    let color = if ch.is_ascii_uppercase() {
        Color::Light
    } else if ch.is_ascii_lowercase() {
        Color::Dark
    } else {
        return None;
    };
    PieceKind::from_char(ch).map(|kind| Piece::new(color, kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;

    #[test]
    fn parse_starting_fen() {
        let position = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");
        assert_eq!(position.side_to_move, Color::Light);
        assert_eq!(position.fullmove_number, 1);
        assert_eq!(position.halfmove_clock, 0);
        assert_eq!(position.piece_at(0), Some(Piece::new(Color::Light, PieceKind::Rook)));
        assert_eq!(position.piece_at(59), Some(Piece::new(Color::Dark, PieceKind::Queen)));
    }

    #[test]
    fn parse_populates_caches_and_fields() {
        let position = parse_fen("8/8/8/2k5/3pP3/8/8/4K3 b - e3 0 31").expect("FEN should parse");
        assert_eq!(position.king_square(Color::Dark), 34);
        assert_eq!(position.king_square(Color::Light), 4);
        assert_eq!(position.piece_count(Color::Dark), 2);
        assert_eq!(position.en_passant_square, Some(20));
        assert_eq!(position.fullmove_number, 31);
    }

    #[test]
    fn malformed_inputs_are_rejected() {
        assert_eq!(parse_fen(""), Err(FenError::MissingField("board layout")));
        assert_eq!(
            parse_fen("8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenError::RankCount(7))
        );
        assert_eq!(
            parse_fen("4k3/8/8/8/8/8/8/4K4 w - - 0 1"),
            Err(FenError::RankWidth { rank: 1 })
        );
        assert_eq!(
            parse_fen("4k3/8/8/8/8/8/8/4X3 w - - 0 1"),
            Err(FenError::PieceChar('X'))
        );
        assert_eq!(
            parse_fen("4k3/8/8/8/8/8/8/4K3 x - - 0 1"),
            Err(FenError::SideToMove("x".to_owned()))
        );
        assert_eq!(
            parse_fen("4k3/8/8/8/8/8/8/4K3 w KX - 0 1"),
            Err(FenError::CastlingChar('X'))
        );
        assert!(matches!(
            parse_fen("4k3/8/8/8/8/8/8/4K3 w - e9 0 1"),
            Err(FenError::EnPassant(_))
        ));
        assert!(matches!(
            parse_fen("4k3/8/8/8/8/8/8/4K3 w - - x 1"),
            Err(FenError::Counter { .. })
        ));
        assert_eq!(
            parse_fen("8/8/8/8/8/8/8/4K3 w - - 0 1"),
            Err(FenError::KingCount { color: Color::Dark, count: 0 })
        );
        assert_eq!(
            parse_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1 extra"),
            Err(FenError::TrailingFields)
        );
    }

    #[test]
    fn king_capturable_by_side_to_move_is_rejected() {
        assert_eq!(
            parse_fen("4k3/8/8/8/8/8/8/4R1K1 w - - 0 1"),
            Err(FenError::OpponentInCheck(Color::Dark))
        );
        assert_eq!(
            parse_fen("4k3/8/8/8/8/8/3q4/4K3 b - - 0 1"),
            Err(FenError::OpponentInCheck(Color::Light))
        );
        // The side to move may itself be in check.
        assert!(parse_fen("4k3/8/8/8/8/8/8/4R1K1 b - - 0 1").is_ok());
    }

    #[test]
    fn en_passant_target_must_match_a_double_push() {
        // Wrong rank for the side to move.
        assert_eq!(
            parse_fen("4k3/8/8/8/4p3/8/3PN3/4K3 w - e3 0 1"),
            Err(FenError::EnPassantRank("e3".to_owned()))
        );
        assert_eq!(
            parse_fen("4k3/8/8/3pP3/8/8/8/4K3 b - d6 0 1"),
            Err(FenError::EnPassantRank("d6".to_owned()))
        );
        // No enemy pawn in front of the target.
        assert_eq!(
            parse_fen("4k3/8/8/8/8/8/8/4K3 w - d6 0 1"),
            Err(FenError::EnPassantUnreachable("d6".to_owned()))
        );
        // Occupied target or origin square.
        assert_eq!(
            parse_fen("4k3/8/3n4/3pP3/8/8/8/4K3 w - d6 0 1"),
            Err(FenError::EnPassantUnreachable("d6".to_owned()))
        );
        assert_eq!(
            parse_fen("4k3/3n4/8/3pP3/8/8/8/4K3 w - d6 0 1"),
            Err(FenError::EnPassantUnreachable("d6".to_owned()))
        );
        assert!(parse_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").is_ok());
    }
}
