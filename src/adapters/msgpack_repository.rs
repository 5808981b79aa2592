//! MessagePack implementation of the knowledge repository.
//!
//! Saved agents are written with rmp_serde. Loading checks the format version
//! and every action table before handing the snapshot back.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use crate::{Result, error::Error, ports::KnowledgeRepository, serialization::SavedAgent};

/// File-backed repository using the MessagePack binary format
///
/// # Examples
///
/// ```no_run
/// use tictactoe_agent::adapters::MsgPackRepository;
/// use tictactoe_agent::ports::KnowledgeRepository;
/// use std::path::Path;
///
/// let repo = MsgPackRepository::new();
/// let saved = repo.load(Path::new("trained.msgpack"))?;
/// let agent = saved.into_agent()?;
/// # Ok::<(), tictactoe_agent::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackRepository;

impl MsgPackRepository {
    pub fn new() -> Self {
        Self
    }
}

impl KnowledgeRepository for MsgPackRepository {
    fn save(&self, saved: &SavedAgent, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        let mut writer = BufWriter::new(file);

        rmp_serde::encode::write(&mut writer, saved).map_err(|e| {
            Error::SerializationContext {
                operation: "serialize agent to MessagePack".to_string(),
                message: e.to_string(),
            }
        })?;

        writer.flush().map_err(|source| Error::Io {
            operation: format!("flush file {path:?}"),
            source,
        })
    }

    fn load(&self, path: &Path) -> Result<SavedAgent> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;

        let saved: SavedAgent = rmp_serde::decode::from_read(BufReader::new(file)).map_err(
            |e| Error::SerializationContext {
                operation: "deserialize agent from MessagePack".to_string(),
                message: e.to_string(),
            },
        )?;

        saved.validate()?;
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::{
        agents::EpsilonGreedyAgent,
        ports::Agent,
        serialization::TrainingMetadata,
        tictactoe::{Board, GameOutcome, Player},
    };

    fn saved_agent() -> SavedAgent {
        let mut agent = EpsilonGreedyAgent::new(Player::X, 0.1).unwrap().with_seed(4);
        agent.set_learning(true);
        agent.next_move(&Board::new()).unwrap();
        agent.learn(GameOutcome::Draw).unwrap();
        SavedAgent::from_agent(&agent, TrainingMetadata::default())
    }

    #[test]
    fn test_msgpack_roundtrip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file_path = temp_dir.path().join("agent.msgpack");

        let repo = MsgPackRepository::new();
        let saved = saved_agent();

        repo.save(&saved, &file_path).expect("Failed to save");
        let loaded = repo.load(&file_path).expect("Failed to load");

        assert_eq!(loaded, saved);
    }

    #[test]
    fn test_load_rejects_wrong_version() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("old.msgpack");

        let mut saved = saved_agent();
        saved.version = 0;
        let repo = MsgPackRepository::new();
        repo.save(&saved, &file_path).unwrap();

        assert!(matches!(
            repo.load(&file_path),
            Err(Error::UnsupportedVersion { found: 0, .. })
        ));
    }

    #[test]
    fn test_load_rejects_garbage() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("garbage.msgpack");
        std::fs::write(&file_path, b"not msgpack at all").unwrap();

        let result = MsgPackRepository::new().load(&file_path);
        assert!(matches!(result, Err(Error::SerializationContext { .. })));
    }

    #[test]
    fn test_load_nonexistent_returns_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = MsgPackRepository::new().load(&temp_dir.path().join("missing.msgpack"));
        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn test_save_to_invalid_path_returns_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("no_such_dir").join("agent.msgpack");
        assert!(MsgPackRepository::new().save(&saved_agent(), &path).is_err());
    }
}
