//! Tabular epsilon-greedy reinforcement learning for Tic-Tac-Toe
//!
//! This crate provides:
//! - A 3x3 board with win/draw detection and collision-resistant state digests
//! - A knowledge base of per-state action tables with optimistic initialization
//! - An epsilon-greedy agent that credits every move of an episode with the
//!   terminal reward
//! - Random and human opponents, a training pipeline with observers, and
//!   MessagePack persistence of learned agents

pub mod adapters;
pub mod agents;
pub mod app;
pub mod cli;
pub mod error;
pub mod knowledge;
pub mod pipeline;
pub mod ports;
pub mod serialization;
pub mod tictactoe;

pub use agents::{EpsilonGreedyAgent, ManualAgent, RandomAgent};
pub use error::{Error, Result};
pub use knowledge::{ActionTable, KnowledgeBase};
pub use tictactoe::{Board, GameOutcome, Player, Position};
