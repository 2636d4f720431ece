use crate::membership::table::MembershipTable;
use crate::membership::types::NodeId;

/// Picks up to `replica_count` distinct nodes, least-loaded first.
///
/// Nodes in `exclude` are never chosen. The result is shorter than
/// `replica_count` when not enough candidates are registered. Equal loads are
/// ordered by node id; callers must not rely on which tied node wins.
pub fn select_replicas(
    membership: &MembershipTable,
    replica_count: usize,
    exclude: &[NodeId],
) -> Vec<NodeId> {
    let mut candidates: Vec<(u64, &NodeId)> = membership
        .iter()
        .filter(|(node_id, _)| !exclude.contains(node_id))
        .map(|(node_id, load)| (load, node_id))
        .collect();

    candidates.sort_unstable();

    candidates
        .into_iter()
        .take(replica_count)
        .map(|(_, node_id)| node_id.clone())
        .collect()
}
