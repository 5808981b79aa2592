//! Tic-Tac-Toe board, outcomes and board identifiers

pub mod board;
pub mod digest;
pub mod game;
pub mod lines;

pub use board::{Board, Cell, Player, Position};
pub use digest::BoardDigest;
pub use game::GameOutcome;
pub use lines::{LineAnalyzer, WINNING_LINES};
