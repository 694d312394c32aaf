//! Game-level repetition bookkeeping.
//!
//! Owned by the caller (the UCI front end or a test), never by the search:
//! the search only reads it to spot lines that would repeat a position that
//! already occurred in the real game.

use std::collections::HashMap;

use crate::game_state::chess_types::Position;
use crate::game_state::position_signature::PositionSignature;

#[derive(Debug, Clone, Default)]
pub struct RepetitionTable {
    occurrences: HashMap<PositionSignature, u32>,
}

impl RepetitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.occurrences.clear();
    }

    /// Counts one more occurrence of `position`; returns the new count.
    pub fn record(&mut self, position: &Position) -> u32 {
        let count = self.occurrences.entry(position.signature()).or_insert(0);
        *count += 1;
        *count
    }

    #[inline]
    pub fn count(&self, signature: &PositionSignature) -> u32 {
        self.occurrences.get(signature).copied().unwrap_or(0)
    }

    #[inline]
    pub fn contains(&self, signature: &PositionSignature) -> bool {
        self.occurrences.contains_key(signature)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.occurrences.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::RepetitionTable;
    use crate::game_state::chess_types::Position;

    #[test]
    fn record_counts_occurrences() {
        let mut table = RepetitionTable::new();
        let position = Position::new_game();
        assert!(!table.contains(&position.signature()));
        assert_eq!(table.record(&position), 1);
        assert_eq!(table.record(&position), 2);
        assert_eq!(table.count(&position.signature()), 2);
        assert_eq!(table.len(), 1);
    }
}
