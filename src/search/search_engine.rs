//! Iterative deepening minimax with fail-hard alpha-beta pruning.
//!
//! Scores are from White's perspective: White maximizes, Black minimizes.
//! Every node consults the terminal-condition oracle before expanding, lines
//! that would repeat a position from the real game score as draws, and the
//! position cache is cleared at the start of each root search.
//!
//! Cancellation is polled once per move iteration at every depth. A cancelled
//! subtree yields [`SearchOutcome::Cancelled`], which every enclosing frame
//! passes straight up; the driver then falls back to the last completed depth
//! or to the caller's mandatory move.

use crate::game_state::chess_types::*;
use crate::game_state::game_status::classify;
use crate::game_state::repetition::RepetitionTable;
use crate::move_generation::legal_move_apply::{apply_move, undo_move};
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::search::board_scoring::{is_mate_score, mate_distance, BoardScorer, MATE_SCORE};
use crate::search::move_ordering::{promote_to_front, CaptureFirstOrdering, MoveOrderer};
use crate::search::position_cache::{Bound, CacheEntry, CacheStats, PositionCache};
use crate::search::search_clock::{SearchClock, StopHandle};

/// Window bound strictly outside every evaluation.
const SEARCH_WINDOW: i32 = MATE_SCORE + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub max_depth: u8,
    pub movetime_ms: Option<u64>,
    pub use_cache: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 4,
            movetime_ms: None,
            use_cache: true,
        }
    }
}

/// Result of searching a subtree: a usable score, or a cancelled branch
/// whose value must not be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome<T = i32> {
    Completed(T),
    Cancelled,
}

impl<T> SearchOutcome<T> {
    pub fn completed(self) -> Option<T> {
        match self {
            SearchOutcome::Completed(value) => Some(value),
            SearchOutcome::Cancelled => None,
        }
    }
}

/// A fully searched root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootReport {
    pub best_move: Option<ChessMove>,
    pub score: i32,
    pub mandatory_score: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveSource {
    /// The deepest requested depth (or a mate) was searched to completion.
    Completed,
    /// Cancelled; the move comes from the last completed depth.
    LastCompletedDepth,
    /// Cancelled before any depth completed; the mandatory move is reported.
    MandatoryMove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<ChessMove>,
    pub best_score: i32,
    pub mandatory_score: Option<i32>,
    pub reached_depth: u8,
    pub nodes: u64,
    pub elapsed_ms: u64,
    pub nps: u64,
    pub cache_stats: CacheStats,
    pub source: MoveSource,
}

impl SearchResult {
    /// Moves to mate, positive when White mates.
    pub fn mate_in(&self) -> Option<i32> {
        mate_distance(self.best_score)
    }
}

pub struct SearchEngine<S: BoardScorer, O: MoveOrderer = CaptureFirstOrdering> {
    scorer: S,
    orderer: O,
    config: SearchConfig,
    cache: PositionCache,
    clock: SearchClock,
    nodes: u64,
}

impl<S: BoardScorer> SearchEngine<S, CaptureFirstOrdering> {
    pub fn new(scorer: S, config: SearchConfig) -> Self {
        Self::with_orderer(scorer, CaptureFirstOrdering, config)
    }
}

impl<S: BoardScorer, O: MoveOrderer> SearchEngine<S, O> {
    pub fn with_orderer(scorer: S, orderer: O, config: SearchConfig) -> Self {
        Self {
            scorer,
            orderer,
            config,
            cache: PositionCache::new(),
            clock: SearchClock::unlimited(),
            nodes: 0,
        }
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }

    pub fn set_config(&mut self, config: SearchConfig) {
        self.config = config;
    }

    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    /// Handle that cancels the search in progress (or the next one, if
    /// taken between searches and triggered after it starts).
    pub fn stop_handle(&self) -> StopHandle {
        self.clock.stop_handle()
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Iterative deepening from depth 1 up to `config.max_depth`.
    ///
    /// Each completed depth's best move is tried first at the next depth.
    /// Deepening stops early once a forced mate is found.
    pub fn iterative_deepening(
        &mut self,
        position: &mut Position,
        repetitions: &RepetitionTable,
        mandatory: Option<ChessMove>,
    ) -> SearchResult {
        self.clock.restart(self.config.movetime_ms);
        self.cache.clear();
        self.nodes = 0;

        let mut completed: Option<(u8, RootReport)> = None;
        let mut cancelled = false;

        for depth in 1..=self.config.max_depth.max(1) {
            let hint = completed.and_then(|(_, report)| report.best_move);
            match self.search_root(position, repetitions, depth, mandatory, hint) {
                SearchOutcome::Completed(report) => {
                    log::debug!(
                        "depth {depth} score {} best {} nodes {} cache hits {}",
                        report.score,
                        report.best_move.map_or_else(|| "none".to_owned(), |mv| mv.to_string()),
                        self.nodes,
                        self.cache.stats().hits
                    );
                    completed = Some((depth, report));
                    if is_mate_score(report.score) {
                        break;
                    }
                }
                SearchOutcome::Cancelled => {
                    cancelled = true;
                    break;
                }
            }
        }

        let elapsed_ms = self.clock.elapsed_ms();
        let nps = if elapsed_ms == 0 {
            0
        } else {
            self.nodes.saturating_mul(1000) / elapsed_ms
        };

        let (best_move, best_score, mandatory_score, reached_depth, source) = match completed {
            Some((depth, report)) => {
                let source = if cancelled {
                    log::info!("search cancelled at depth {}; using depth {depth} result", depth + 1);
                    MoveSource::LastCompletedDepth
                } else {
                    MoveSource::Completed
                };
                (report.best_move, report.score, report.mandatory_score, depth, source)
            }
            None => {
                log::info!("search cancelled before depth 1 completed; using mandatory move");
                (mandatory, 0, None, 0, MoveSource::MandatoryMove)
            }
        };

        SearchResult {
            best_move,
            best_score,
            mandatory_score,
            reached_depth,
            nodes: self.nodes,
            elapsed_ms,
            nps,
            cache_stats: self.cache.stats(),
            source,
        }
    }

    /// One root search at exactly `depth`, without iterative deepening.
    pub fn search_fixed_depth(
        &mut self,
        position: &mut Position,
        repetitions: &RepetitionTable,
        depth: u8,
        mandatory: Option<ChessMove>,
        hint: Option<ChessMove>,
    ) -> SearchOutcome<RootReport> {
        self.clock.restart(self.config.movetime_ms);
        self.cache.clear();
        self.nodes = 0;
        self.search_root(position, repetitions, depth.max(1), mandatory, hint)
    }

    fn search_root(
        &mut self,
        position: &mut Position,
        repetitions: &RepetitionTable,
        depth: u8,
        mandatory: Option<ChessMove>,
        hint: Option<ChessMove>,
    ) -> SearchOutcome<RootReport> {
        self.nodes += 1;
        let mut moves = generate_legal_moves(position);
        let terminal = classify(position, &moves).is_terminal();
        let terminal_score = terminal.then(|| self.scorer.evaluate(position, 0, &moves));

        self.orderer.order(position, &mut moves);
        if let Some(hint) = hint {
            promote_to_front(&mut moves, hint);
        }
        let mandatory = mandatory.filter(|mv| promote_to_front(&mut moves, *mv));

        // Drawn roots can still have legal moves to report.
        if let Some(score) = terminal_score {
            return SearchOutcome::Completed(RootReport {
                best_move: moves.first().copied(),
                score,
                mandatory_score: mandatory.map(|_| score),
            });
        }

        let maximizing = position.side_to_move == Color::Light;
        let mut alpha = -SEARCH_WINDOW;
        let mut beta = SEARCH_WINDOW;
        let mut best_move = None;
        let mut best_score = if maximizing { -SEARCH_WINDOW } else { SEARCH_WINDOW };
        let mut mandatory_score = None;

        for mv in moves {
            if self.clock.expired() {
                return SearchOutcome::Cancelled;
            }

            let outcome = self.search_child(position, repetitions, mv, depth - 1, 1, alpha, beta);
            let SearchOutcome::Completed(score) = outcome else {
                return SearchOutcome::Cancelled;
            };

            if Some(mv) == mandatory {
                mandatory_score = Some(score);
            }

            let improves = if maximizing { score > best_score } else { score < best_score };
            if improves {
                best_score = score;
                best_move = Some(mv);
            }
            if maximizing {
                alpha = alpha.max(score);
            } else {
                beta = beta.min(score);
            }
        }

        SearchOutcome::Completed(RootReport {
            best_move,
            score: best_score,
            mandatory_score,
        })
    }

    /// Applies `mv`, scores the child and undoes it. A child that repeats a
    /// position from the real game is a draw and is not expanded.
    #[allow(clippy::too_many_arguments)]
    fn search_child(
        &mut self,
        position: &mut Position,
        repetitions: &RepetitionTable,
        mv: ChessMove,
        depth: u8,
        ply: u32,
        alpha: i32,
        beta: i32,
    ) -> SearchOutcome {
        let record = apply_move(position, mv);
        let outcome = if repetitions.contains(&position.signature()) {
            self.nodes += 1;
            SearchOutcome::Completed(0i32.clamp(alpha, beta))
        } else {
            self.alpha_beta(position, repetitions, depth, ply, alpha, beta)
        };
        undo_move(position, record);
        outcome
    }

    fn alpha_beta(
        &mut self,
        position: &mut Position,
        repetitions: &RepetitionTable,
        depth: u8,
        ply: u32,
        mut alpha: i32,
        mut beta: i32,
    ) -> SearchOutcome {
        self.nodes += 1;

        let mut moves = generate_legal_moves(position);
        if depth == 0 || classify(position, &moves).is_terminal() {
            let score = self.scorer.evaluate(position, ply, &moves);
            return SearchOutcome::Completed(score.clamp(alpha, beta));
        }

        let key = self.config.use_cache.then(|| position.signature());
        if let Some(key) = &key {
            if let Some(score) = self.cache.probe(key, depth, alpha, beta) {
                return SearchOutcome::Completed(score);
            }
        }

        let (alpha_in, beta_in) = (alpha, beta);
        let maximizing = position.side_to_move == Color::Light;
        self.orderer.order(position, &mut moves);

        for mv in moves {
            if self.clock.expired() {
                return SearchOutcome::Cancelled;
            }

            let outcome = self.search_child(position, repetitions, mv, depth - 1, ply + 1, alpha, beta);
            let SearchOutcome::Completed(score) = outcome else {
                return SearchOutcome::Cancelled;
            };

            if maximizing {
                alpha = alpha.max(score);
            } else {
                beta = beta.min(score);
            }
            if beta <= alpha {
                break;
            }
        }

        let score = if maximizing { alpha } else { beta };
        if let Some(key) = key {
            let bound = if score <= alpha_in {
                Bound::Upper
            } else if score >= beta_in {
                Bound::Lower
            } else {
                Bound::Exact
            };
            self.cache.store(key, CacheEntry { depth, score, bound });
        }
        SearchOutcome::Completed(score)
    }
}
