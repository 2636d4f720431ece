use super::client::PeerClient;
use crate::chunk::types::{Chunk, ChunkId};
use crate::membership::types::NodeId;
use crate::tracker::protocol::ChunkMap;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::task::JoinSet;

/// Result of pushing a file's chunks to their assigned holders.
#[derive(Debug, Default)]
pub struct PushReport {
    /// `(chunk, holder)` pairs that acknowledged the store.
    pub delivered: Vec<(ChunkId, NodeId)>,
    /// `(chunk, holder, error)` for pushes that failed in transport.
    pub failed: Vec<(ChunkId, NodeId, String)>,
    /// Chunks the tracker placed but this node has no bytes for.
    pub missing_data: Vec<ChunkId>,
}

impl PushReport {
    pub fn attempted(&self) -> usize {
        self.delivered.len() + self.failed.len()
    }
}

/// Outcome of pulling one chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PullOutcome {
    Received { node_id: NodeId, data: Vec<u8> },
    /// The holder answered but no longer has the chunk.
    NotFound { node_id: NodeId },
    /// The holder could not be reached or answered garbage.
    Failed { node_id: NodeId, error: String },
    /// The tracker listed the chunk without any holder.
    NoHolders,
}

/// Result of pulling a file's chunks, ordered by chunk sequence.
#[derive(Debug, Default)]
pub struct PullReport {
    pub chunks: Vec<(ChunkId, PullOutcome)>,
}

impl PullReport {
    pub fn received(&self) -> usize {
        self.chunks
            .iter()
            .filter(|(_, outcome)| matches!(outcome, PullOutcome::Received { .. }))
            .count()
    }

    /// Sequences in `1..=max` that were not received, where `max` is the
    /// highest sequence the tracker listed. Chunks orphaned by a Leave are
    /// never listed, so they only show up here as gaps.
    pub fn missing_sequences(&self) -> Vec<u64> {
        let received: HashSet<u64> = self
            .chunks
            .iter()
            .filter(|(_, outcome)| matches!(outcome, PullOutcome::Received { .. }))
            .filter_map(|(chunk_id, _)| chunk_id.sequence())
            .collect();
        let max = self
            .chunks
            .iter()
            .filter_map(|(chunk_id, _)| chunk_id.sequence())
            .max()
            .unwrap_or(0);

        (1..=max).filter(|seq| !received.contains(seq)).collect()
    }

    /// Every listed chunk arrived and the sequence has no gaps.
    pub fn is_complete(&self) -> bool {
        !self.chunks.is_empty()
            && self.received() == self.chunks.len()
            && self.missing_sequences().is_empty()
    }

    /// Concatenated chunk bytes in sequence order, if every chunk arrived.
    pub fn assemble(&self) -> Option<Vec<u8>> {
        if !self.is_complete() {
            return None;
        }
        let mut file = Vec::new();
        for (_, outcome) in &self.chunks {
            if let PullOutcome::Received { data, .. } = outcome {
                file.extend_from_slice(data);
            }
        }
        Some(file)
    }
}

/// Pushes every chunk to every holder assigned in `chunk_map`, concurrently.
///
/// Each `(chunk, holder)` push is its own task. Local chunks the tracker did
/// not place are skipped.
pub async fn push_chunks(peers: &PeerClient, chunk_map: &ChunkMap, chunks: Vec<Chunk>) -> PushReport {
    let mut report = PushReport::default();
    let mut local: HashMap<ChunkId, Arc<Chunk>> = chunks
        .into_iter()
        .map(|chunk| (chunk.id.clone(), Arc::new(chunk)))
        .collect();

    let mut pending = HashSet::new();
    let mut tasks = JoinSet::new();
    for (chunk_id, holders) in chunk_map {
        let Some(chunk) = local.remove(chunk_id) else {
            tracing::warn!("No local data for placed chunk {}", chunk_id);
            report.missing_data.push(chunk_id.clone());
            continue;
        };

        for node_id in holders {
            let peers = peers.clone();
            let chunk = chunk.clone();
            let node_id = node_id.clone();
            pending.insert((chunk_id.clone(), node_id.clone()));
            tasks.spawn(async move {
                let result = peers.store_chunk(&node_id, &chunk).await;
                (chunk.id.clone(), node_id, result)
            });
        }
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((chunk_id, node_id, result)) => {
                pending.remove(&(chunk_id.clone(), node_id.clone()));
                match result {
                    Ok(response) => {
                        tracing::debug!("Push {} -> {}: {}", chunk_id, node_id, response.message);
                        report.delivered.push((chunk_id, node_id));
                    }
                    Err(e) => {
                        tracing::error!("Failed to push chunk {} to {}: {}", chunk_id, node_id, e);
                        report.failed.push((chunk_id, node_id, e.to_string()));
                    }
                }
            }
            Err(e) => tracing::error!("Push task aborted: {}", e),
        }
    }

    fail_unfinished_pushes(&mut report, pending);
    report.missing_data.sort_by_key(sequence_key);
    report
}

/// Pulls every chunk in `chunk_map` from its first listed holder, concurrently.
///
/// There is no fallback to the other holders.
pub async fn pull_chunks(peers: &PeerClient, chunk_map: &ChunkMap) -> PullReport {
    let mut report = PullReport::default();
    let mut pending = HashMap::new();
    let mut tasks = JoinSet::new();

    for (chunk_id, holders) in chunk_map {
        let Some(node_id) = holders.first().cloned() else {
            tracing::warn!("No nodes available for chunk {}", chunk_id);
            report.chunks.push((chunk_id.clone(), PullOutcome::NoHolders));
            continue;
        };

        let peers = peers.clone();
        let chunk_id = chunk_id.clone();
        pending.insert(chunk_id.clone(), node_id.clone());
        tasks.spawn(async move {
            let outcome = match peers.request_chunk(&node_id, &chunk_id).await {
                Ok(Some(data)) => PullOutcome::Received { node_id, data },
                Ok(None) => PullOutcome::NotFound { node_id },
                Err(e) => PullOutcome::Failed {
                    node_id,
                    error: e.to_string(),
                },
            };
            (chunk_id, outcome)
        });
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((chunk_id, outcome)) => {
                pending.remove(&chunk_id);
                match &outcome {
                    PullOutcome::Received { node_id, data } => {
                        tracing::info!("Chunk {} received from {} ({} bytes)", chunk_id, node_id, data.len())
                    }
                    PullOutcome::NotFound { node_id } => {
                        tracing::warn!("Chunk {} not found on {}", chunk_id, node_id)
                    }
                    PullOutcome::Failed { node_id, error } => {
                        tracing::error!("Failed to request chunk {} from {}: {}", chunk_id, node_id, error)
                    }
                    PullOutcome::NoHolders => {}
                }
                report.chunks.push((chunk_id, outcome));
            }
            Err(e) => tracing::error!("Pull task aborted: {}", e),
        }
    }

    fail_unfinished_pulls(&mut report, pending);
    report.chunks.sort_by_key(|(chunk_id, _)| sequence_key(chunk_id));
    report
}

const ABORTED: &str = "transfer task aborted";

/// Records every push whose task never reported back as failed.
pub(super) fn fail_unfinished_pushes(report: &mut PushReport, pending: HashSet<(ChunkId, NodeId)>) {
    for (chunk_id, node_id) in pending {
        report.failed.push((chunk_id, node_id, ABORTED.to_string()));
    }
}

/// Records every pull whose task never reported back as failed, so the
/// chunk still counts against completeness.
pub(super) fn fail_unfinished_pulls(report: &mut PullReport, pending: HashMap<ChunkId, NodeId>) {
    for (chunk_id, node_id) in pending {
        report.chunks.push((
            chunk_id,
            PullOutcome::Failed {
                node_id,
                error: ABORTED.to_string(),
            },
        ));
    }
}

fn sequence_key(chunk_id: &ChunkId) -> (u64, ChunkId) {
    (chunk_id.sequence().unwrap_or(u64::MAX), chunk_id.clone())
}
