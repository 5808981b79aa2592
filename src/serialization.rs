//! Versioned save format for trained epsilon-greedy agents

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    agents::EpsilonGreedyAgent,
    knowledge::KnowledgeBase,
    tictactoe::Player,
};

/// Provenance recorded alongside a saved knowledge base
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingMetadata {
    /// Number of games trained, cumulative across resumed runs
    pub games_trained: Option<usize>,
    /// Opponent(s) trained against
    pub opponents: Vec<String>,
    /// Random seed used (if any)
    pub seed: Option<u64>,
    /// Seconds since the Unix epoch when saved
    pub saved_at: Option<String>,
}

/// Serializable snapshot of an [`EpsilonGreedyAgent`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedAgent {
    pub version: u32,
    pub player: Player,
    pub epsilon: f64,
    pub knowledge: KnowledgeBase,
    pub metadata: TrainingMetadata,
}

impl SavedAgent {
    /// Current save format version
    pub const VERSION: u32 = 1;

    /// Snapshot a trained agent
    pub fn from_agent(agent: &EpsilonGreedyAgent, metadata: TrainingMetadata) -> Self {
        use crate::ports::Agent;

        Self {
            version: Self::VERSION,
            player: agent.player(),
            epsilon: agent.epsilon(),
            knowledge: agent.knowledge().clone(),
            metadata,
        }
    }

    /// Check the format version and every stored action table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedVersion`], [`Error::InvalidConfiguration`]
    /// for a bad epsilon, or [`Error::CorruptKnowledgeBase`].
    pub fn validate(&self) -> Result<()> {
        if self.version != Self::VERSION {
            return Err(Error::UnsupportedVersion {
                found: self.version,
                expected: Self::VERSION,
            });
        }
        crate::agents::epsilon_greedy::validate_epsilon(self.epsilon)?;
        self.knowledge.validate()
    }

    /// Rebuild an agent. Learning starts disabled.
    pub fn to_agent(&self) -> Result<EpsilonGreedyAgent> {
        self.validate()?;
        Ok(EpsilonGreedyAgent::new(self.player, self.epsilon)?
            .with_knowledge(self.knowledge.clone()))
    }

    /// Consume the snapshot without cloning the knowledge base
    pub fn into_agent(self) -> Result<EpsilonGreedyAgent> {
        self.validate()?;
        Ok(EpsilonGreedyAgent::new(self.player, self.epsilon)?.with_knowledge(self.knowledge))
    }
}
