//! Crate root module declarations for the Quince Chess engine project.
//!
//! This file exposes all top-level subsystems (game state, move generation,
//! search, engines, UCI protocol handling, and utility helpers) so binaries,
//! tests, and external tooling can import stable module paths.

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_status;
    pub mod position;
    pub mod position_signature;
    pub mod repetition;
    pub mod undo_state;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_king;
    pub mod legal_moves_knight;
    pub mod legal_moves_pawn;
    pub mod legal_moves_slider;
    pub mod perft;
}

pub mod search {
    pub mod board_scoring;
    pub mod move_ordering;
    pub mod position_cache;
    pub mod search_clock;
    pub mod search_engine;
}

pub mod uci {
    pub mod uci_top;
}

pub mod engines {
    pub mod engine_iterative;
    pub mod engine_random;
    pub mod engine_trait;
    pub mod time_management;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_parser;
    pub mod long_algebraic;
}
