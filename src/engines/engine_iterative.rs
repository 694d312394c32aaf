use crate::engines::engine_trait::{Engine, EngineError, EngineOutput, GoParams};
use crate::engines::time_management::{resolve_go_params, TimeManagementStrategy};
use crate::game_state::chess_types::{Color, Position};
use crate::game_state::repetition::RepetitionTable;
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::search::board_scoring::{scorer_by_name, BoardScorer, PieceSquareScorer};
use crate::search::move_ordering::{CaptureFirstOrdering, MoveOrderer};
use crate::search::search_clock::StopHandle;
use crate::search::search_engine::{SearchConfig, SearchEngine, SearchResult};

pub const MAX_OPTION_DEPTH: u8 = 12;

pub struct IterativeEngine {
    default_depth: u8,
    use_cache: bool,
    strategy: TimeManagementStrategy,
    search: SearchEngine<Box<dyn BoardScorer>>,
}

impl IterativeEngine {
    pub fn new(default_depth: u8) -> Self {
        Self::with_scorer(default_depth, Box::new(PieceSquareScorer))
    }

    pub fn with_scorer(default_depth: u8, scorer: Box<dyn BoardScorer>) -> Self {
        Self {
            default_depth: default_depth.clamp(1, MAX_OPTION_DEPTH),
            use_cache: true,
            strategy: TimeManagementStrategy::MaterialPhase,
            search: SearchEngine::new(scorer, SearchConfig::default()),
        }
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.search.stop_handle()
    }

    pub fn scorer_name(&self) -> &'static str {
        self.search.scorer().name()
    }

    fn info_lines(&self, position: &Position, result: &SearchResult) -> Vec<String> {
        // UCI scores are from the mover's point of view.
        let sign = match position.side_to_move {
            Color::Light => 1,
            Color::Dark => -1,
        };
        let score = match result.mate_in() {
            Some(moves) => format!("mate {}", moves * sign),
            None => format!("cp {}", result.best_score * sign * 10),
        };
        let mut lines = vec![format!(
            "info depth {} score {} nodes {} time {} nps {}",
            result.reached_depth, score, result.nodes, result.elapsed_ms, result.nps
        )];
        lines.push(format!(
            "info string iterative_engine evaluator {} cache_hits {} cache_stores {} source {:?}",
            self.scorer_name(),
            result.cache_stats.hits,
            result.cache_stats.stores,
            result.source
        ));
        lines
    }
}

impl Default for IterativeEngine {
    fn default() -> Self {
        Self::new(SearchConfig::default().max_depth)
    }
}

impl Engine for IterativeEngine {
    fn name(&self) -> &str {
        "QuinceChess Iterative"
    }

    fn author(&self) -> &str {
        "quince_chess developers"
    }

    fn set_option(&mut self, name: &str, value: &str) -> Result<(), EngineError> {
        let invalid = || EngineError::InvalidOptionValue {
            name: name.to_owned(),
            value: value.to_owned(),
        };
        match name.trim().to_ascii_lowercase().as_str() {
            "depth" => {
                let depth = value.trim().parse::<u8>().map_err(|_| invalid())?;
                if !(1..=MAX_OPTION_DEPTH).contains(&depth) {
                    return Err(invalid());
                }
                self.default_depth = depth;
            }
            "evaluator" => {
                let scorer = scorer_by_name(value).ok_or_else(invalid)?;
                self.search = SearchEngine::new(scorer, self.search.config());
            }
            "usecache" => {
                self.use_cache = match value.trim().to_ascii_lowercase().as_str() {
                    "true" => true,
                    "false" => false,
                    _ => return Err(invalid()),
                };
            }
            _ => return Err(EngineError::UnknownOption(name.to_owned())),
        }
        Ok(())
    }

    fn choose_move(
        &mut self,
        position: &mut Position,
        repetitions: &RepetitionTable,
        params: &GoParams,
    ) -> EngineOutput {
        let resolved = resolve_go_params(position, params, self.strategy);
        self.search.set_config(SearchConfig {
            max_depth: resolved.depth.unwrap_or(self.default_depth).max(1),
            movetime_ms: resolved.movetime_ms,
            use_cache: self.use_cache,
        });

        // The best-ordered legal move is the fallback if no depth completes.
        let mut moves = generate_legal_moves(position);
        CaptureFirstOrdering.order(position, &mut moves);
        let mandatory = moves.first().copied();

        let result = self.search.iterative_deepening(position, repetitions, mandatory);

        EngineOutput {
            best_move: result.best_move,
            info_lines: self.info_lines(position, &result),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::ChessMove;

    #[test]
    fn finds_mate_and_reports_uci_mate_score() {
        let mut engine = IterativeEngine::new(3);
        let mut position = Position::from_fen("r5k1/8/8/8/8/8/5PPP/6K1 b - - 0 1").expect("FEN");
        let out = engine.choose_move(&mut position, &RepetitionTable::new(), &GoParams::default());
        assert_eq!(out.best_move, Some(ChessMove::new(56, 0)));
        assert!(out.info_lines[0].contains("score mate 1"), "{}", out.info_lines[0]);
    }

    #[test]
    fn options_are_validated() {
        let mut engine = IterativeEngine::default();
        assert_eq!(engine.set_option("Depth", "6"), Ok(()));
        assert!(matches!(
            engine.set_option("Depth", "40"),
            Err(EngineError::InvalidOptionValue { .. })
        ));
        assert_eq!(engine.set_option("Evaluator", "mobility"), Ok(()));
        assert_eq!(engine.scorer_name(), "mobility");
        assert!(engine.set_option("Evaluator", "nnue").is_err());
        assert_eq!(engine.set_option("UseCache", "false"), Ok(()));
        assert_eq!(
            engine.set_option("Hash", "64"),
            Err(EngineError::UnknownOption("Hash".to_owned()))
        );
    }

    #[test]
    fn go_depth_overrides_default() {
        let mut engine = IterativeEngine::new(5);
        let mut position = Position::new_game();
        let params = GoParams {
            depth: Some(1),
            ..GoParams::default()
        };
        let out = engine.choose_move(&mut position, &RepetitionTable::new(), &params);
        assert!(out.best_move.is_some());
        assert!(out.info_lines[0].starts_with("info depth 1 "));
    }

    #[test]
    fn drawn_positions_still_produce_bestmove() {
        for fen in ["4k3/8/8/8/8/8/8/4KN2 w - - 0 1", "4k3/8/8/8/8/8/8/R3K3 w - - 100 80"] {
            let mut engine = IterativeEngine::new(3);
            let mut position = Position::from_fen(fen).expect("FEN");
            let out = engine.choose_move(&mut position, &RepetitionTable::new(), &GoParams::default());
            let best = out.best_move.expect("legal moves exist");
            assert!(generate_legal_moves(&mut position).contains(&best));
        }
    }
}
