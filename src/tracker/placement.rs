use super::protocol::ChunkMap;
use crate::chunk::types::ChunkId;
use crate::membership::types::NodeId;
use std::collections::HashMap;

/// Chunk id -> nodes currently recorded as holding a replica.
#[derive(Debug, Default)]
pub struct PlacementTable {
    replicas: HashMap<ChunkId, Vec<NodeId>>,
}

/// What a node departure did to the placement table.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RemovalSummary {
    /// Chunks whose replica list contained the node.
    pub stripped: usize,
    /// Chunks deleted because the node was their last holder.
    pub orphaned: Vec<ChunkId>,
}

impl PlacementTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `node_id` to the replica list of `chunk_id`.
    ///
    /// The table does not deduplicate; callers pass nodes not yet holding the chunk.
    pub fn record_assignment(&mut self, chunk_id: &ChunkId, node_id: NodeId) {
        let holders = self.replicas.entry(chunk_id.clone()).or_default();
        debug_assert!(!holders.contains(&node_id), "duplicate replica holder");
        holders.push(node_id);
    }

    /// Current holders of one chunk, empty if unknown.
    pub fn replicas(&self, chunk_id: &ChunkId) -> &[NodeId] {
        self.replicas
            .get(chunk_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every recorded chunk of exactly `file_name`, with its holders.
    pub fn lookup_file(&self, file_name: &str) -> ChunkMap {
        self.replicas
            .iter()
            .filter(|(chunk_id, _)| chunk_id.belongs_to(file_name))
            .map(|(chunk_id, holders)| (chunk_id.clone(), holders.clone()))
            .collect()
    }

    /// Strips `node_id` from every replica list and deletes emptied entries.
    pub fn remove_node(&mut self, node_id: &NodeId) -> RemovalSummary {
        let mut summary = RemovalSummary::default();

        self.replicas.retain(|chunk_id, holders| {
            let before = holders.len();
            holders.retain(|holder| holder != node_id);
            if holders.len() != before {
                summary.stripped += 1;
            }
            if holders.is_empty() {
                summary.orphaned.push(chunk_id.clone());
                return false;
            }
            true
        });

        summary
    }

    pub fn len(&self) -> usize {
        self.replicas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.replicas.is_empty()
    }
}
