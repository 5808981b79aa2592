//! Knowledge base mapping board identifiers to action tables

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::action_table::ActionTable;
use crate::{
    Error, Result,
    tictactoe::{Board, BoardDigest},
};

/// Learned policy: one [`ActionTable`] per board state ever encountered
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    tables: HashMap<BoardDigest, ActionTable>,
}

impl KnowledgeBase {
    /// Create an empty knowledge base
    pub fn new() -> Self {
        Self::default()
    }

    /// Table for `board`, created from its free positions on first encounter
    pub fn table_for(&mut self, board: &Board) -> (BoardDigest, &ActionTable) {
        let digest = board.identifier();
        let table = self.tables.entry(digest).or_insert_with(|| {
            let actions = board.free_positions();
            trace!(%digest, actions = actions.len(), "new action table");
            ActionTable::new(actions)
        });
        (digest, &*table)
    }

    pub fn get(&self, digest: &BoardDigest) -> Option<&ActionTable> {
        self.tables.get(digest)
    }

    /// Fold a return into a recorded (state, action) pair.
    ///
    /// # Panics
    ///
    /// Panics if `digest` has no table or `index` is outside it. Both mean
    /// the episode buffer refers to something this knowledge base never
    /// produced.
    pub fn record_return(&mut self, digest: &BoardDigest, index: usize, reward: f64) {
        let table = self
            .tables
            .get_mut(digest)
            .unwrap_or_else(|| panic!("no action table for recorded state {digest}"));
        table.record_return(index, reward);
    }

    /// Number of distinct states seen
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Iterate over all (identifier, table) entries in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&BoardDigest, &ActionTable)> {
        self.tables.iter()
    }

    /// Check every table's invariants.
    ///
    /// Used when loading a knowledge base from storage, where a broken table
    /// is a data problem rather than a programming error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CorruptKnowledgeBase`] naming the first broken entry.
    pub fn validate(&self) -> Result<()> {
        for (digest, table) in &self.tables {
            if let Some(reason) = table.invariant_violation() {
                return Err(Error::CorruptKnowledgeBase {
                    digest: digest.to_hex(),
                    reason,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::{Player, Position};

    #[test]
    fn test_table_created_once_per_state() {
        let mut kb = KnowledgeBase::new();
        let board = Board::new();

        let (first, table) = kb.table_for(&board);
        assert_eq!(table.len(), 9);
        let (second, _) = kb.table_for(&board);

        assert_eq!(first, second);
        assert_eq!(kb.len(), 1);
    }

    #[test]
    fn test_table_uses_free_positions_at_first_encounter() {
        let mut kb = KnowledgeBase::new();
        let mut board = Board::new();
        board.place(Player::X, Position::new(1, 1).unwrap()).unwrap();

        let (_, table) = kb.table_for(&board);
        assert_eq!(table.actions(), board.free_positions().as_slice());
        assert!(!table.actions().contains(&Position::new(1, 1).unwrap()));
    }

    #[test]
    fn test_record_return_updates_table() {
        let mut kb = KnowledgeBase::new();
        let board = Board::new();
        let (digest, _) = kb.table_for(&board);

        kb.record_return(&digest, 4, -1.0);

        let table = kb.get(&digest).unwrap();
        assert_eq!(table.visits()[4], 2);
        assert!((table.means()[4] - 0.0).abs() < 1e-12);
    }

    #[test]
    #[should_panic(expected = "no action table")]
    fn test_record_return_for_unknown_state_panics() {
        let mut kb = KnowledgeBase::new();
        let digest = Board::new().identifier();
        kb.record_return(&digest, 0, 1.0);
    }

    #[test]
    fn test_validate_accepts_fresh_tables() {
        let mut kb = KnowledgeBase::new();
        kb.table_for(&Board::new());
        assert!(kb.validate().is_ok());
    }
}
