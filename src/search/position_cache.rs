//! Search-local position cache keyed by [`PositionSignature`].
//!
//! The key is the full structural signature, so a hit is always the same
//! position. Entries only answer a probe made with the same remaining depth,
//! and mate-magnitude scores are never stored: their value depends on the
//! ply at which the position was reached.

use std::collections::HashMap;

use crate::game_state::position_signature::PositionSignature;
use crate::search::board_scoring::is_mate_score;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Exact,
    Lower,
    Upper,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheEntry {
    pub depth: u8,
    pub score: i32,
    pub bound: Bound,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub probes: u64,
    pub hits: u64,
    pub stores: u64,
    pub rejected_mate_scores: u64,
}

/// The signature leaves out the half-move clock, so transpositions on either
/// side of the fifty-move limit share an entry even though `classify` may
/// treat them differently.
#[derive(Debug, Clone, Default)]
pub struct PositionCache {
    entries: HashMap<PositionSignature, CacheEntry>,
    stats: CacheStats,
}

impl PositionCache {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats = CacheStats::default();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Returns a score usable inside the `(alpha, beta)` window, if the cache
    /// holds one for this exact remaining depth.
    pub fn probe(&mut self, key: &PositionSignature, depth: u8, alpha: i32, beta: i32) -> Option<i32> {
        self.stats.probes += 1;
        let entry = self.entries.get(key).filter(|e| e.depth == depth)?;
        let usable = match entry.bound {
            Bound::Exact => true,
            Bound::Lower => entry.score >= beta,
            Bound::Upper => entry.score <= alpha,
        };
        if !usable {
            return None;
        }
        self.stats.hits += 1;
        Some(entry.score.clamp(alpha, beta))
    }

    /// Stores a search result; returns false when the score was a mate score
    /// and therefore not cached.
    pub fn store(&mut self, key: PositionSignature, entry: CacheEntry) -> bool {
        if is_mate_score(entry.score) {
            self.stats.rejected_mate_scores += 1;
            return false;
        }
        self.stats.stores += 1;
        self.entries.insert(key, entry);
        true
    }
}
