//! Random-move engine.
//!
//! Selects uniformly from legal moves and is primarily used for diagnostics,
//! integration testing, and low-strength gameplay.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::game_state::chess_types::Position;
use crate::game_state::repetition::RepetitionTable;
use crate::move_generation::legal_move_generator::generate_legal_moves;

pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "QuinceChess Random"
    }

    fn author(&self) -> &str {
        "quince_chess developers"
    }

    fn choose_move(
        &mut self,
        position: &mut Position,
        _repetitions: &RepetitionTable,
        params: &GoParams,
    ) -> EngineOutput {
        let legal_moves = generate_legal_moves(position);

        let mut out = EngineOutput::default();
        out.info_lines.push(format!(
            "info string random_engine legal_moves {}",
            legal_moves.len()
        ));
        if let Some(depth) = params.depth {
            out.info_lines
                .push(format!("info string random_engine requested_depth {depth}"));
        }

        out.best_move = legal_moves.as_slice().choose(&mut self.rng).copied();
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_a_legal_move_and_keeps_position() {
        let mut engine = RandomEngine::with_seed(7);
        let mut position = Position::new_game();
        let legal = generate_legal_moves(&mut position);
        let out = engine.choose_move(&mut position, &RepetitionTable::new(), &GoParams::default());
        let picked = out.best_move.expect("start position has moves");
        assert!(legal.contains(&picked));
        assert_eq!(position, Position::new_game());
    }

    #[test]
    fn no_move_when_mated() {
        let mut engine = RandomEngine::with_seed(1);
        let mut position = Position::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").expect("FEN");
        let out = engine.choose_move(&mut position, &RepetitionTable::new(), &GoParams::default());
        assert_eq!(out.best_move, None);
    }
}
