//! In-memory knowledge repository for testing.
//!
//! Snapshots are encoded with rmp_serde exactly as on disk, so tests exercise
//! the same serialization path without touching the file system.

use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, Mutex, MutexGuard},
};

use crate::{Result, error::Error, ports::KnowledgeRepository, serialization::SavedAgent};

/// In-memory repository keyed by path.
///
/// Clones share the same underlying storage.
///
/// # Examples
///
/// ```
/// use tictactoe_agent::adapters::InMemoryRepository;
/// use tictactoe_agent::agents::EpsilonGreedyAgent;
/// use tictactoe_agent::ports::KnowledgeRepository;
/// use tictactoe_agent::serialization::{SavedAgent, TrainingMetadata};
/// use tictactoe_agent::tictactoe::Player;
/// use std::path::Path;
///
/// let repo = InMemoryRepository::new();
/// let agent = EpsilonGreedyAgent::new(Player::X, 0.1)?;
/// let saved = SavedAgent::from_agent(&agent, TrainingMetadata::default());
///
/// repo.save(&saved, Path::new("agent"))?;
/// let loaded = repo.load(Path::new("agent"))?;
/// assert_eq!(loaded, saved);
/// # Ok::<(), tictactoe_agent::Error>(())
/// ```
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    storage: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of snapshots currently stored
    pub fn count(&self) -> usize {
        self.storage().len()
    }

    pub fn clear(&self) {
        self.storage().clear();
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.storage().contains_key(&Self::key(path))
    }

    fn key(path: &Path) -> String {
        path.to_string_lossy().to_string()
    }

    // Entries are inserted whole, so a poisoned map is still consistent.
    fn storage(&self) -> MutexGuard<'_, HashMap<String, Vec<u8>>> {
        self.storage
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KnowledgeRepository for InMemoryRepository {
    fn save(&self, saved: &SavedAgent, path: &Path) -> Result<()> {
        let bytes = rmp_serde::to_vec(saved).map_err(|e| Error::SerializationContext {
            operation: "serialize agent for in-memory storage".to_string(),
            message: e.to_string(),
        })?;

        self.storage().insert(Self::key(path), bytes);
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<SavedAgent> {
        let storage = self.storage();
        let bytes = storage.get(&Self::key(path)).ok_or_else(|| Error::Io {
            operation: format!("load agent from in-memory storage at {path:?}"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "key not found in memory"),
        })?;

        let saved: SavedAgent =
            rmp_serde::from_slice(bytes).map_err(|e| Error::SerializationContext {
                operation: "deserialize agent from in-memory storage".to_string(),
                message: e.to_string(),
            })?;

        saved.validate()?;
        Ok(saved)
    }
}
