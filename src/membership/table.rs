use super::types::NodeId;
use std::collections::HashMap;

/// Known nodes and the number of chunk replicas currently assigned to each.
///
/// Not synchronized on its own: the tracker service owns it behind the same
/// lock as the placement table.
#[derive(Debug, Default)]
pub struct MembershipTable {
    loads: HashMap<NodeId, u64>,
}

impl MembershipTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `node_id` with load 0 unless it is already known.
    ///
    /// Returns `true` when the node was newly admitted.
    pub fn ensure_registered(&mut self, node_id: &NodeId) -> bool {
        if self.loads.contains_key(node_id) {
            return false;
        }
        self.loads.insert(node_id.clone(), 0);
        true
    }

    /// Adds one assigned chunk to the node's load.
    ///
    /// Unknown nodes are ignored; placement only assigns registered nodes.
    pub fn increment_load(&mut self, node_id: &NodeId) {
        match self.loads.get_mut(node_id) {
            Some(load) => *load += 1,
            None => tracing::warn!("Load increment for unknown node {}", node_id),
        }
    }

    /// Removes the node, returning its last load if it was registered.
    pub fn deregister(&mut self, node_id: &NodeId) -> Option<u64> {
        self.loads.remove(node_id)
    }

    pub fn load(&self, node_id: &NodeId) -> Option<u64> {
        self.loads.get(node_id).copied()
    }

    pub fn contains(&self, node_id: &NodeId) -> bool {
        self.loads.contains_key(node_id)
    }

    pub fn len(&self) -> usize {
        self.loads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loads.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, u64)> {
        self.loads.iter().map(|(node_id, load)| (node_id, *load))
    }
}
