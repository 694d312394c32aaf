//! Engine abstraction layer used by the UCI subsystem.
//!
//! Defines common input parameters and output payloads so different engine
//! strategies can be selected at runtime behind a single trait interface.

use thiserror::Error;

use crate::game_state::chess_types::{ChessMove, Position};
use crate::game_state::repetition::RepetitionTable;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoParams {
    pub depth: Option<u8>,
    pub movetime_ms: Option<u64>,
    pub wtime_ms: Option<u64>,
    pub btime_ms: Option<u64>,
    pub winc_ms: Option<u64>,
    pub binc_ms: Option<u64>,
    pub movestogo: Option<u16>,
}

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    pub best_move: Option<ChessMove>,
    pub info_lines: Vec<String>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("unknown option '{0}'")]
    UnknownOption(String),
    #[error("invalid value '{value}' for option '{name}'")]
    InvalidOptionValue { name: String, value: String },
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn author(&self) -> &str;

    fn new_game(&mut self) {}

    fn set_option(&mut self, name: &str, _value: &str) -> Result<(), EngineError> {
        Err(EngineError::UnknownOption(name.to_owned()))
    }

    /// Picks a move for the side to move. `position` is searched in place
    /// and is identical to its input state when this returns.
    fn choose_move(
        &mut self,
        position: &mut Position,
        repetitions: &RepetitionTable,
        params: &GoParams,
    ) -> EngineOutput;
}
