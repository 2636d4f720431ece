use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of one chunk of a logical file: `<file_name>-<sequence>`.
///
/// File names may contain `-` themselves, so parsing always splits on the
/// last dash.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct ChunkId(pub String);

impl ChunkId {
    /// Builds the id of the chunk at `sequence` (1-based) of `file_name`.
    pub fn new(file_name: &str, sequence: u64) -> Self {
        Self(format!("{}-{}", file_name, sequence))
    }

    /// Splits the id into its file name and sequence number.
    ///
    /// Returns `None` unless the id ends in `-<digits>` and the digits parse to
    /// a positive integer.
    pub fn parse(&self) -> Option<(&str, u64)> {
        let (file_name, suffix) = self.0.rsplit_once('-')?;
        if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        match suffix.parse::<u64>() {
            Ok(sequence) if sequence > 0 => Some((file_name, sequence)),
            _ => None,
        }
    }

    pub fn sequence(&self) -> Option<u64> {
        self.parse().map(|(_, sequence)| sequence)
    }

    /// True when this id names a chunk of exactly `file_name`.
    ///
    /// `"video-1"` belongs to `"video"` but not to `"vid"`, and `"video2-1"`
    /// does not belong to `"video"`.
    pub fn belongs_to(&self, file_name: &str) -> bool {
        self.parse()
            .map(|(name, _)| name == file_name)
            .unwrap_or(false)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ChunkId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A chunk id together with the bytes a node pushes to its replica holders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub id: ChunkId,
    pub data: Vec<u8>,
}
