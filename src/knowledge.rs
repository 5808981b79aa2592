//! Policy/value store: per-state action tables keyed by board identifier
//!
//! The store grows lazily. A state's [`ActionTable`] is created the first
//! time an agent is asked to move from it, with every action seeded at the
//! optimistic prior of one virtual visit worth `1.0`. After that the action
//! set is fixed, because the [`BoardDigest`](crate::tictactoe::BoardDigest)
//! key already encodes which cells are free.

pub mod action_table;
pub mod knowledge_base;

pub use action_table::{ActionTable, OPTIMISTIC_MEAN, OPTIMISTIC_VISITS};
pub use knowledge_base::KnowledgeBase;
