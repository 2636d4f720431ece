use crate::chunk::types::ChunkId;

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory chunk table of one node.
///
/// Concurrent fetches share the lock; a store takes it exclusively.
#[derive(Debug, Default)]
pub struct ChunkStore {
    chunks: RwLock<HashMap<ChunkId, Vec<u8>>>,
}

impl ChunkStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Inserts or overwrites a chunk, returning the bytes it replaced.
    pub async fn store(&self, chunk_id: ChunkId, data: Vec<u8>) -> Option<Vec<u8>> {
        self.chunks.write().await.insert(chunk_id, data)
    }

    /// Returns a copy of the chunk bytes, or `None` when this node lacks it.
    pub async fn fetch(&self, chunk_id: &ChunkId) -> Option<Vec<u8>> {
        self.chunks.read().await.get(chunk_id).cloned()
    }

    pub async fn contains(&self, chunk_id: &ChunkId) -> bool {
        self.chunks.read().await.contains_key(chunk_id)
    }

    pub async fn len(&self) -> usize {
        self.chunks.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.chunks.read().await.is_empty()
    }

    /// Stored chunk ids, sorted.
    pub async fn chunk_ids(&self) -> Vec<ChunkId> {
        let mut ids: Vec<ChunkId> = self.chunks.read().await.keys().cloned().collect();
        ids.sort();
        ids
    }
}
