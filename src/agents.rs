//! Agents that can take part in a game
//!
//! - [`EpsilonGreedyAgent`]: the tabular learner
//! - [`RandomAgent`]: uniform baseline opponent
//! - [`ManualAgent`]: a person at a terminal

pub mod epsilon_greedy;
pub mod manual;
pub mod random;

pub use epsilon_greedy::{DRAW_REWARD, EpsilonGreedyAgent, LOSS_REWARD, WIN_REWARD};
pub use manual::{ManualAgent, parse_coordinates};
pub use random::RandomAgent;
