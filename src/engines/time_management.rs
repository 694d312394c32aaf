//! Per-move time budgets derived from the UCI clock fields.
//!
//! The front end passes `wtime/btime/winc/binc/movestogo` through untouched;
//! the engine turns them into a single `movetime` here.

use crate::engines::engine_trait::GoParams;
use crate::game_state::chess_types::{Color, PieceKind, Position};
use crate::search::board_scoring::piece_value;

/// Material on the board at the start of a game, in decipawns.
const STARTING_MATERIAL: u64 = 788;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeManagementStrategy {
    /// Spend 1/20th of the remaining clock.
    Fraction20,
    /// Split the clock over the moves the remaining material suggests are
    /// left, plus most of the increment.
    MaterialPhase,
}

pub fn resolve_go_params(
    position: &Position,
    params: &GoParams,
    strategy: TimeManagementStrategy,
) -> GoParams {
    if params.movetime_ms.is_some() {
        return params.clone();
    }

    let (remaining, increment) = match position.side_to_move {
        Color::Light => (params.wtime_ms, params.winc_ms),
        Color::Dark => (params.btime_ms, params.binc_ms),
    };
    let Some(remaining) = remaining else {
        return params.clone();
    };

    let budget = match strategy {
        TimeManagementStrategy::Fraction20 => (remaining / 20).max(1),
        TimeManagementStrategy::MaterialPhase => {
            let moves_left = params
                .movestogo
                .map_or_else(|| expected_moves_left(position), |mtg| u64::from(mtg.max(1)));
            material_phase_budget_ms(remaining, increment, moves_left)
        }
    };

    GoParams {
        movetime_ms: Some(budget),
        ..params.clone()
    }
}

/// 40 moves with a full board, tapering to 10 with bare kings.
fn expected_moves_left(position: &Position) -> u64 {
    let material: u64 = [Color::Light, Color::Dark]
        .into_iter()
        .flat_map(|color| position.pieces_of(color))
        .filter(|(_, kind)| *kind != PieceKind::King)
        .map(|(_, kind)| piece_value(kind) as u64)
        .sum();
    10 + material.min(STARTING_MATERIAL) * 30 / STARTING_MATERIAL
}

fn material_phase_budget_ms(remaining_ms: u64, increment_ms: Option<u64>, moves_left: u64) -> u64 {
    // The last 5% of the clock (at most half a second) is never planned for.
    let margin = (remaining_ms / 20).min(500);
    let share = remaining_ms.saturating_sub(margin) / moves_left.max(1);
    let target = share.saturating_add(increment_ms.unwrap_or(0).saturating_mul(3) / 4);
    target.clamp(1, (remaining_ms / 4).max(1))
}
