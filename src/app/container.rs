//! Dependency injection container for the application.
//!
//! The container owns infrastructure dependencies (the knowledge repository,
//! a default seed) and provides factory methods for domain objects.

use std::{path::Path, sync::Arc};

use super::config::AgentConfig;
use crate::{
    Result,
    adapters::MsgPackRepository,
    agents::EpsilonGreedyAgent,
    ports::KnowledgeRepository,
    serialization::{SavedAgent, TrainingMetadata},
};

/// Application with dependency injection.
///
/// # Examples
///
/// ## Production usage
///
/// ```
/// use tictactoe_agent::app::{App, AgentConfig};
/// use tictactoe_agent::tictactoe::Player;
///
/// let app = App::new();
/// let agent = app.create_agent(AgentConfig::new(Player::X).with_seed(42))?;
/// # Ok::<(), tictactoe_agent::Error>(())
/// ```
///
/// ## Testing with dependency injection
///
/// ```
/// use tictactoe_agent::app::App;
/// use tictactoe_agent::adapters::InMemoryRepository;
///
/// let app = App::for_testing()
///     .with_repository(InMemoryRepository::new())
///     .with_default_seed(42)
///     .build();
/// ```
pub struct App {
    repository: Arc<dyn KnowledgeRepository + Send + Sync>,
    /// Default random seed (None = non-deterministic)
    default_seed: Option<u64>,
}

impl App {
    /// Create a new app backed by [`MsgPackRepository`] with no default seed.
    pub fn new() -> Self {
        Self {
            repository: Arc::new(MsgPackRepository::new()),
            default_seed: None,
        }
    }

    /// Create a builder for constructing an app with custom dependencies.
    pub fn for_testing() -> AppBuilder {
        AppBuilder::new()
    }

    pub fn repository(&self) -> Arc<dyn KnowledgeRepository + Send + Sync> {
        Arc::clone(&self.repository)
    }

    pub fn default_seed(&self) -> Option<u64> {
        self.default_seed
    }

    /// Create a fresh agent with an empty knowledge base.
    ///
    /// The config seed wins over the container default.
    pub fn create_agent(&self, config: AgentConfig) -> Result<EpsilonGreedyAgent> {
        config.validate()?;
        let config = AgentConfig {
            seed: config.seed.or(self.default_seed),
            ..config
        };
        EpsilonGreedyAgent::from_config(&config)
    }

    /// Load an agent and the metadata it was saved with.
    ///
    /// The loaded agent starts with learning disabled.
    ///
    /// ```no_run
    /// use tictactoe_agent::app::App;
    /// use std::path::Path;
    ///
    /// let app = App::new();
    /// let (agent, metadata) = app.load_agent(Path::new("trained_agent.msgpack"))?;
    /// # Ok::<(), tictactoe_agent::Error>(())
    /// ```
    pub fn load_agent(&self, path: &Path) -> Result<(EpsilonGreedyAgent, TrainingMetadata)> {
        let saved = self.repository.load(path)?;
        let metadata = saved.metadata.clone();
        let mut agent = saved.into_agent()?;

        if let Some(seed) = self.default_seed {
            agent = agent.with_seed(seed);
        }

        Ok((agent, metadata))
    }

    /// Save an agent's knowledge base through the configured repository.
    pub fn save_agent(
        &self,
        agent: &EpsilonGreedyAgent,
        metadata: TrainingMetadata,
        path: &Path,
    ) -> Result<()> {
        self.repository
            .save(&SavedAgent::from_agent(agent, metadata), path)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing an app with custom dependencies.
///
/// ```
/// use tictactoe_agent::app::AppBuilder;
/// use tictactoe_agent::adapters::InMemoryRepository;
///
/// let app = AppBuilder::new()
///     .with_repository(InMemoryRepository::new())
///     .with_default_seed(42)
///     .build();
/// ```
pub struct AppBuilder {
    repository: Option<Arc<dyn KnowledgeRepository + Send + Sync>>,
    default_seed: Option<u64>,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self {
            repository: None,
            default_seed: None,
        }
    }

    pub fn with_repository<R: KnowledgeRepository + Send + Sync + 'static>(
        mut self,
        repo: R,
    ) -> Self {
        self.repository = Some(Arc::new(repo));
        self
    }

    /// Set a default random seed for all agents created by this container.
    pub fn with_default_seed(mut self, seed: u64) -> Self {
        self.default_seed = Some(seed);
        self
    }

    /// Build the app. Without a repository, uses [`MsgPackRepository`].
    pub fn build(self) -> App {
        App {
            repository: self
                .repository
                .unwrap_or_else(|| Arc::new(MsgPackRepository::new())),
            default_seed: self.default_seed,
        }
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}
