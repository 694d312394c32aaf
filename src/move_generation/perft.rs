//! Exhaustive move-path enumeration for validating the legal generator
//! against published reference counts.

use std::thread;

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::{apply_move, undo_move};
use crate::move_generation::legal_move_generator::generate_legal_moves;

/// Leaf count at `depth`, walking the tree with apply/undo on one position.
pub fn perft(position: &mut Position, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = generate_legal_moves(position);
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for mv in moves {
        let record = apply_move(position, mv);
        nodes += perft(position, depth - 1);
        undo_move(position, record);
    }
    nodes
}

/// Per-root-move leaf counts, in generation order.
pub fn perft_divide(position: &mut Position, depth: u8) -> Vec<(ChessMove, u64)> {
    if depth == 0 {
        return Vec::new();
    }

    let moves = generate_legal_moves(position);
    let mut out = Vec::with_capacity(moves.len());
    for mv in moves {
        let record = apply_move(position, mv);
        let nodes = perft(position, depth - 1);
        undo_move(position, record);
        out.push((mv, nodes));
    }
    out
}

/// Same count as [`perft`], one worker thread per root move. Each worker owns
/// a clone of the position.
pub fn perft_multi_threaded(position: &Position, depth: u8) -> u64 {
    if depth <= 1 {
        return perft(&mut position.clone(), depth);
    }

    let mut root = position.clone();
    let root_moves = generate_legal_moves(&mut root);

    thread::scope(|scope| {
        let handles: Vec<_> = root_moves
            .into_iter()
            .map(|mv| {
                let mut local = root.clone();
                scope.spawn(move || {
                    let record = apply_move(&mut local, mv);
                    let nodes = perft(&mut local, depth - 1);
                    undo_move(&mut local, record);
                    nodes
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
            .sum()
    })
}
