//! Repository port for saved-agent persistence.

use std::path::Path;

use crate::{Result, serialization::SavedAgent};

/// Port for persisting and loading trained agents.
///
/// This trait abstracts the storage mechanism so that training code does not
/// depend on a particular file format.
///
/// # Examples
///
/// ```no_run
/// use tictactoe_agent::ports::KnowledgeRepository;
/// use tictactoe_agent::serialization::SavedAgent;
/// use std::path::Path;
///
/// fn checkpoint<R: KnowledgeRepository>(
///     repo: &R,
///     saved: &SavedAgent,
///     path: &Path,
/// ) -> tictactoe_agent::Result<()> {
///     repo.save(saved, path)
/// }
/// ```
pub trait KnowledgeRepository {
    /// Save an agent to persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the location cannot be written or serialization
    /// fails.
    fn save(&self, saved: &SavedAgent, path: &Path) -> Result<()>;

    /// Load an agent from persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file does not exist or cannot be read
    /// - Deserialization fails
    /// - The format version is unsupported or the knowledge base is corrupt
    fn load(&self, path: &Path) -> Result<SavedAgent>;
}
