//! In-place move application with exact undo.
//!
//! `apply_move` mutates the position and returns an owned [`UndoRecord`];
//! `undo_move` consumes it. Records must be undone in LIFO order.

use crate::game_state::chess_types::*;
use crate::game_state::undo_state::{Intermediary, IntermediaryKind};

/// Applies `mv`, which must come from the legal generator for this position.
///
/// # Panics
/// If the origin square is empty or holds a piece of the side not to move.
pub fn apply_move(position: &mut Position, mv: ChessMove) -> UndoRecord {
    let side = position.side_to_move;
    let enemy = side.opposite();
    let moving = match position.piece_at(mv.from) {
        Some(piece) if piece.color == side => piece,
        other => panic!("apply_move {mv}: origin holds {other:?}, side to move is {side:?}"),
    };

    // (1) pre-move fields.
    let mut record = UndoRecord {
        mv,
        captured: position.piece_at(mv.to),
        intermediaries: [Intermediary::NONE; 2],
        intermediary_count: 0,
        prev_castling_rights: position.castling_rights,
        prev_en_passant_square: position.en_passant_square,
        prev_halfmove_clock: position.halfmove_clock,
        prev_fullmove_number: position.fullmove_number,
        prev_king_square: None,
        stamp: 0,
    };

    // (2) move classification.
    let is_capture = record.captured.is_some();
    let is_pawn_move = moving.kind == PieceKind::Pawn;
    let is_rook_move = moving.kind == PieceKind::Rook;
    let is_king_move = moving.kind == PieceKind::King;
    let en_passant_capture = is_pawn_move
        && !is_capture
        && position.en_passant_square == Some(mv.to)
        && file_of(mv.from) != file_of(mv.to);

    // (3) fifty-move clock.
    if is_capture || is_pawn_move {
        position.halfmove_clock = 0;
    } else {
        position.halfmove_clock = position.halfmove_clock.saturating_add(1);
    }

    // (4) capturing an unmoved corner rook removes that right.
    if is_capture {
        if let Some(right) = castling_right_for_corner(mv.to) {
            position.castling_rights &= !right;
        }
    }

    // (5) en-passant target.
    position.en_passant_square = if is_pawn_move && rank_of(mv.from).abs_diff(rank_of(mv.to)) == 2 {
        Some(make_square(file_of(mv.from), (rank_of(mv.from) + rank_of(mv.to)) / 2))
    } else {
        None
    };

    // (6) relocate.
    position.set_square(mv.from, None);
    position.set_square(mv.to, Some(moving));
    if is_capture {
        position.piece_counts[enemy.index()] -= 1;
    }

    // (7) promotion / en-passant victim.
    if let Some(kind) = mv.promotion {
        position.set_square(mv.to, Some(Piece::new(side, kind)));
    } else if en_passant_capture {
        let victim_square = make_square(file_of(mv.to), rank_of(mv.from));
        let victim = position.take_square(victim_square);
        record.push_intermediary(Intermediary {
            kind: IntermediaryKind::CapturedPawn,
            square: victim_square,
            prior: victim,
        });
        position.piece_counts[enemy.index()] -= 1;
    }

    // (8) rook leaving its corner.
    if is_rook_move {
        if let Some(right) = castling_right_for_corner(mv.from) {
            position.castling_rights &= !right;
        }
    }

    // (9) king bookkeeping and castling rook.
    if is_king_move {
        record.prev_king_square = Some(mv.from);
        position.king_squares[side.index()] = mv.to;
        position.castling_rights &= !(kingside_right(side) | queenside_right(side));

        if file_of(mv.from).abs_diff(file_of(mv.to)) == 2 {
            let rank = rank_of(mv.from);
            let (rook_from, rook_to) = if file_of(mv.to) > file_of(mv.from) {
                (make_square(7, rank), make_square(5, rank))
            } else {
                (make_square(0, rank), make_square(3, rank))
            };
            let rook = position.take_square(rook_from);
            record.push_intermediary(Intermediary {
                kind: IntermediaryKind::CastlingRook,
                square: rook_from,
                prior: rook,
            });
            record.push_intermediary(Intermediary {
                kind: IntermediaryKind::CastlingRook,
                square: rook_to,
                prior: position.piece_at(rook_to),
            });
            position.set_square(rook_to, rook);
        }
    }

    // (10) hand over the move.
    if side == Color::Dark {
        position.fullmove_number = position.fullmove_number.saturating_add(1);
    }
    position.side_to_move = enemy;

    position.applied_moves += 1;
    record.stamp = position.applied_moves;
    record
}

/// Reverses the most recent `apply_move`.
///
/// # Panics
/// If `record` is not the most recently applied, not yet undone record.
pub fn undo_move(position: &mut Position, record: UndoRecord) {
    assert_eq!(
        record.stamp, position.applied_moves,
        "undo_move {} called out of LIFO order",
        record.mv
    );
    position.applied_moves -= 1;

    position.side_to_move = position.side_to_move.opposite();
    let side = position.side_to_move;
    let enemy = side.opposite();

    position.castling_rights = record.prev_castling_rights;
    position.en_passant_square = record.prev_en_passant_square;
    position.halfmove_clock = record.prev_halfmove_clock;
    position.fullmove_number = record.prev_fullmove_number;

    let mv = record.mv;
    let mut moved = match position.take_square(mv.to) {
        Some(piece) => piece,
        None => panic!("undo_move {mv}: destination is empty"),
    };
    if mv.promotion.is_some() {
        moved = Piece::new(side, PieceKind::Pawn);
    }
    position.set_square(mv.from, Some(moved));
    position.set_square(mv.to, record.captured);
    if record.captured.is_some() {
        position.piece_counts[enemy.index()] += 1;
    }

    if let Some(square) = record.prev_king_square {
        position.king_squares[side.index()] = square;
    }

    for intermediary in record.recorded_intermediaries().iter().rev() {
        position.set_square(intermediary.square, intermediary.prior);
        if intermediary.kind == IntermediaryKind::CapturedPawn {
            position.piece_counts[enemy.index()] += 1;
        }
    }
}
