//! Canonical board identifiers
//!
//! A [`BoardDigest`] is the SHA-256 of the nine cell bytes in row-major
//! order. It is the knowledge-base key, so it only needs equality and hashing;
//! digests are never compared by magnitude.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use sha2::{Digest, Sha256};

use super::Cell;

/// Collision-resistant identifier of a board's full cell contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardDigest([u8; 32]);

impl BoardDigest {
    /// Digest the given cells
    pub fn of_cells(cells: &[Cell; 9]) -> Self {
        let mut hasher = Sha256::new();
        for cell in cells {
            hasher.update([cell.to_byte()]);
        }
        BoardDigest(hasher.finalize().into())
    }

    /// Raw digest bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex encoding (64 characters)
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for BoardDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for BoardDigest {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s, &mut bytes).map_err(|err| crate::Error::CorruptKnowledgeBase {
            digest: s.to_string(),
            reason: format!("malformed digest: {err}"),
        })?;
        Ok(BoardDigest(bytes))
    }
}

impl Serialize for BoardDigest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for BoardDigest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        hex.parse().map_err(de::Error::custom)
    }
}
