use super::error::TrackerError;
use super::placement::PlacementTable;
use super::protocol::{
    Action, ChunkMap, JoinRequest, JoinResponse, LeaveRequest, LeaveResponse, StatsResponse,
};
use super::selection::select_replicas;
use crate::chunk::partitioner::partition;
use crate::membership::table::MembershipTable;
use crate::membership::types::NodeId;

use std::num::NonZeroU64;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

/// Replica holders assigned to every new chunk.
pub const DEFAULT_REPLICA_COUNT: usize = 3;

/// Size of one chunk; one chunk per MB of declared file size.
pub const DEFAULT_CHUNK_SIZE_MB: NonZeroU64 = NonZeroU64::MIN;

#[derive(Debug, Default)]
struct TrackerState {
    membership: MembershipTable,
    placement: PlacementTable,
}

/// The tracker: membership and placement behind a single lock.
///
/// Created once at server start and shared with the HTTP handlers. Each Join
/// or Leave holds the lock for its whole duration, which serializes all
/// placement decisions.
pub struct TrackerService {
    state: Mutex<TrackerState>,
    replica_count: usize,
    chunk_size_mb: NonZeroU64,
}

impl TrackerService {
    pub fn new(replica_count: usize, chunk_size_mb: NonZeroU64) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(TrackerState::default()),
            replica_count,
            chunk_size_mb,
        })
    }

    pub fn replica_count(&self) -> usize {
        self.replica_count
    }

    pub fn chunk_size_mb(&self) -> NonZeroU64 {
        self.chunk_size_mb
    }

    /// Handles a Join: admits the node, then places or looks up the file.
    pub async fn join(&self, req: JoinRequest) -> Result<JoinResponse, TrackerError> {
        validate_join(&req)?;

        let mut state = self.state.lock().await;

        if state.membership.ensure_registered(&req.node_id) {
            info!("Node {} joined the network for action: {}", req.node_id, req.action);
        }

        let response = match req.action {
            Action::Put => state.place_file(
                &req.file_name,
                req.file_size_mb.unwrap_or(0),
                self.chunk_size_mb,
                self.replica_count,
            ),
            Action::Get => state.locate_file(&req.file_name),
            Action::Unknown(action) => {
                tracing::warn!("Node {} sent unknown action '{}'", req.node_id, action);
                JoinResponse::message_only("Unknown action.")
            }
        };

        Ok(response)
    }

    /// Handles a Leave. Always succeeds for a non-empty id, known or not.
    ///
    /// A blank id is rejected with `TrackerError::MissingNodeId` (HTTP 400)
    /// as an extension of the plain always-succeeds contract; nothing is
    /// mutated in that case.
    pub async fn leave(&self, req: LeaveRequest) -> Result<LeaveResponse, TrackerError> {
        if req.node_id.is_empty() {
            return Err(TrackerError::MissingNodeId);
        }

        let mut state = self.state.lock().await;

        state.membership.deregister(&req.node_id);
        let summary = state.placement.remove_node(&req.node_id);

        info!(
            "Node {} left the network and was removed from {} chunk(s)",
            req.node_id, summary.stripped
        );
        if !summary.orphaned.is_empty() {
            tracing::warn!(
                "{} chunk(s) lost their last replica: {:?}",
                summary.orphaned.len(),
                summary.orphaned
            );
        }

        Ok(LeaveResponse {
            message: format!("Node {} disconnected.", req.node_id),
        })
    }

    pub async fn stats(&self) -> StatsResponse {
        let state = self.state.lock().await;

        StatsResponse {
            nodes: state
                .membership
                .iter()
                .map(|(node_id, load)| (node_id.clone(), load))
                .collect(),
            chunk_count: state.placement.len(),
        }
    }

    pub async fn node_load(&self, node_id: &NodeId) -> Option<u64> {
        self.state.lock().await.membership.load(node_id)
    }
}

impl TrackerState {
    /// Assigns replica holders to every chunk of the file.
    ///
    /// A chunk that already has holders (the file was published before) is
    /// only topped up to `replica_count` with nodes not yet holding it.
    fn place_file(
        &mut self,
        file_name: &str,
        file_size_mb: u64,
        chunk_size_mb: NonZeroU64,
        replica_count: usize,
    ) -> JoinResponse {
        let chunk_ids = partition(file_name, file_size_mb, chunk_size_mb);
        let mut chunk_map = ChunkMap::with_capacity(chunk_ids.len());

        for chunk_id in chunk_ids {
            let existing = self.placement.replicas(&chunk_id).to_vec();
            let missing = replica_count.saturating_sub(existing.len());
            let selected = select_replicas(&self.membership, missing, &existing);

            for node_id in selected {
                tracing::debug!("Chunk {} assigned to node {}", chunk_id, node_id);
                self.membership.increment_load(&node_id);
                self.placement.record_assignment(&chunk_id, node_id);
            }

            let holders = self.placement.replicas(&chunk_id).to_vec();
            chunk_map.insert(chunk_id, holders);
        }

        info!(
            "File {} ({} MB) placed as {} chunk(s)",
            file_name,
            file_size_mb,
            chunk_map.len()
        );

        JoinResponse {
            message: format!("File {} uploaded and split successfully.", file_name),
            chunk_map,
        }
    }

    fn locate_file(&self, file_name: &str) -> JoinResponse {
        let chunk_map = self.placement.lookup_file(file_name);

        if chunk_map.is_empty() {
            tracing::debug!("File {} not found", file_name);
            return JoinResponse::message_only("File not found in the network.");
        }

        info!("Found {} chunk(s) for file {}", chunk_map.len(), file_name);
        JoinResponse {
            message: format!("Nodes found for the chunks of file {}", file_name),
            chunk_map,
        }
    }
}

fn validate_join(req: &JoinRequest) -> Result<(), TrackerError> {
    if req.node_id.is_empty() {
        return Err(TrackerError::MissingNodeId);
    }
    if matches!(req.action, Action::Put | Action::Get) && req.file_name.trim().is_empty() {
        return Err(TrackerError::MissingFileName(req.action.to_string()));
    }
    Ok(())
}
