//! Run configuration files for CLI commands
//!
//! `train --config run.json` reads a [`RunConfig`]. Every field is optional;
//! explicit command-line flags take precedence over file values, which take
//! precedence over the defaults below.

use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::{app::DEFAULT_EPSILON, tictactoe::Player};

/// Opponent the learner is trained against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OpponentKind {
    /// Uniform random mover
    #[default]
    Random,
    /// A second epsilon-greedy learner
    Greedy,
}

impl OpponentKind {
    pub fn label(self) -> &'static str {
        match self {
            OpponentKind::Random => "random",
            OpponentKind::Greedy => "greedy",
        }
    }
}

/// Training settings loaded from a JSON file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub games: Option<usize>,
    pub epsilon: Option<f64>,
    pub seed: Option<u64>,
    pub agent_player: Option<Player>,
    pub opponent: Option<OpponentKind>,
    pub opponent_epsilon: Option<f64>,
    pub milestone_interval: Option<usize>,
}

impl RunConfig {
    pub const DEFAULT_GAMES: usize = 10_000;
    pub const DEFAULT_MILESTONE_INTERVAL: usize = 5_000;

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn games(&self) -> usize {
        self.games.unwrap_or(Self::DEFAULT_GAMES)
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon.unwrap_or(DEFAULT_EPSILON)
    }

    pub fn agent_player(&self) -> Player {
        self.agent_player.unwrap_or(Player::X)
    }

    pub fn opponent(&self) -> OpponentKind {
        self.opponent.unwrap_or_default()
    }

    pub fn opponent_epsilon(&self) -> f64 {
        self.opponent_epsilon.unwrap_or(DEFAULT_EPSILON)
    }

    pub fn milestone_interval(&self) -> usize {
        self.milestone_interval
            .unwrap_or(Self::DEFAULT_MILESTONE_INTERVAL)
    }

    /// Overlay `overrides` on top of `self`; set fields in `overrides` win
    pub fn merged_with(self, overrides: RunConfig) -> RunConfig {
        RunConfig {
            games: overrides.games.or(self.games),
            epsilon: overrides.epsilon.or(self.epsilon),
            seed: overrides.seed.or(self.seed),
            agent_player: overrides.agent_player.or(self.agent_player),
            opponent: overrides.opponent.or(self.opponent),
            opponent_epsilon: overrides.opponent_epsilon.or(self.opponent_epsilon),
            milestone_interval: overrides.milestone_interval.or(self.milestone_interval),
        }
    }
}
