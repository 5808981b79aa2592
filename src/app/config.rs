//! Configuration types for agent creation.

use serde::{Deserialize, Serialize};

use crate::{Result, agents::epsilon_greedy::validate_epsilon, tictactoe::Player};

/// Exploration rate used when none is configured
pub const DEFAULT_EPSILON: f64 = 0.1;

/// Configuration for creating an epsilon-greedy agent.
///
/// # Examples
///
/// ```
/// use tictactoe_agent::app::AgentConfig;
/// use tictactoe_agent::tictactoe::Player;
///
/// let config = AgentConfig::new(Player::O)
///     .with_epsilon(0.2)
///     .with_seed(42)
///     .with_name("student");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Token the agent plays
    pub player: Player,
    /// Probability of a random move while learning
    pub epsilon: f64,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
    /// Display name; derived from the player when absent
    pub name: Option<String>,
}

impl AgentConfig {
    /// Configuration with `epsilon` = [`DEFAULT_EPSILON`], no seed and a
    /// derived name.
    pub fn new(player: Player) -> Self {
        Self {
            player,
            epsilon: DEFAULT_EPSILON,
            seed: None,
            name: None,
        }
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfiguration`] if epsilon is not a
    /// probability.
    pub fn validate(&self) -> Result<()> {
        validate_epsilon(self.epsilon)
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new(Player::X)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AgentConfig::default();
        assert_eq!(config.player, Player::X);
        assert_eq!(config.epsilon, DEFAULT_EPSILON);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_validate_epsilon() {
        assert!(AgentConfig::new(Player::O).with_epsilon(1.0).validate().is_ok());
        assert!(AgentConfig::new(Player::O).with_epsilon(1.01).validate().is_err());
        assert!(
            AgentConfig::new(Player::O)
                .with_epsilon(f64::INFINITY)
                .validate()
                .is_err()
        );
    }
}
