//! End-to-end tests of a tracker and storage nodes talking over real HTTP.
//!
//! Every server binds to `127.0.0.1:0` so tests can run in parallel.

use p2p_torrent::chunk::types::{Chunk, ChunkId};
use p2p_torrent::membership::types::NodeId;
use p2p_torrent::node::client::{PeerClient, TrackerClient};
use p2p_torrent::node::session::NodeSession;
use p2p_torrent::node::transfer::PullOutcome;
use p2p_torrent::storage::memory::ChunkStore;
use p2p_torrent::tracker::protocol::{Action, JoinRequest};
use p2p_torrent::tracker::service::{DEFAULT_CHUNK_SIZE_MB, DEFAULT_REPLICA_COUNT, TrackerService};
use p2p_torrent::{storage, tracker};

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(2);

async fn spawn_tracker() -> (Arc<TrackerService>, SocketAddr) {
    spawn_tracker_with_replicas(DEFAULT_REPLICA_COUNT).await
}

async fn spawn_tracker_with_replicas(replicas: usize) -> (Arc<TrackerService>, SocketAddr) {
    let service = TrackerService::new(replicas, DEFAULT_CHUNK_SIZE_MB);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = tracker::handlers::router(service.clone());
    tokio::spawn(async move { axum::serve(listener, app).await });
    (service, addr)
}

/// Starts a chunk server and returns its store and the id peers reach it by.
async fn spawn_node() -> (Arc<ChunkStore>, NodeId) {
    let store = ChunkStore::new();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let node_id = NodeId::new(listener.local_addr().unwrap().to_string());
    let app = storage::handlers::router(store.clone());
    tokio::spawn(async move { axum::serve(listener, app).await });
    (store, node_id)
}

fn session(node_id: &NodeId, tracker_addr: SocketAddr) -> NodeSession {
    let http = reqwest::Client::new();
    NodeSession::new(
        node_id.clone(),
        TrackerClient::new(http.clone(), &tracker_addr.to_string(), TIMEOUT),
        PeerClient::new(http, TIMEOUT),
        DEFAULT_CHUNK_SIZE_MB,
    )
}

#[tokio::test]
async fn test_put_then_get_across_three_nodes() {
    let (service, tracker_addr) = spawn_tracker().await;
    let mut nodes = Vec::new();
    for _ in 0..3 {
        nodes.push(spawn_node().await);
    }

    // Register the two passive nodes so placement can use them.
    for (_, node_id) in &nodes[1..] {
        let outcome = session(node_id, tracker_addr).get("nothing").await.unwrap();
        assert_eq!(outcome.response.message, "File not found in the network.");
        assert!(outcome.pull.is_none());
    }

    let publisher = session(&nodes[0].1, tracker_addr);
    let put = publisher.put("movie.mkv", 2).await.unwrap();
    assert_eq!(put.response.chunk_map.len(), 2);
    for holders in put.response.chunk_map.values() {
        assert_eq!(holders.len(), 3);
    }
    assert_eq!(put.push.delivered.len(), 6);
    assert!(put.push.failed.is_empty());

    // Placement recorded one unit of load per assigned replica.
    for (_, node_id) in &nodes {
        assert_eq!(service.node_load(node_id).await, Some(2));
    }

    // Every node now holds both chunks.
    for (store, _) in &nodes {
        assert_eq!(
            store.chunk_ids().await,
            vec![ChunkId::from("movie.mkv-1"), ChunkId::from("movie.mkv-2")]
        );
    }

    let downloader = session(&nodes[2].1, tracker_addr);
    let get = downloader.get("movie.mkv").await.unwrap();
    let pull = get.pull.unwrap();
    assert!(pull.is_complete());
    assert_eq!(
        pull.assemble().unwrap(),
        b"data of chunk movie.mkv-1data of chunk movie.mkv-2".to_vec()
    );
}

#[tokio::test]
async fn test_missing_chunk_is_not_found() {
    let (store, node_id) = spawn_node().await;
    let peers = PeerClient::new(reqwest::Client::new(), TIMEOUT);

    let missing = peers.request_chunk(&node_id, &ChunkId::from("absent-1")).await.unwrap();
    assert_eq!(missing, None);

    // Ids with reserved URL characters survive the path round-trip.
    let chunk = Chunk {
        id: ChunkId::from("my file?#-1"),
        data: vec![0, 1, 2],
    };
    peers.store_chunk(&node_id, &chunk).await.unwrap();
    assert!(store.contains(&chunk.id).await);
    assert_eq!(
        peers.request_chunk(&node_id, &chunk.id).await.unwrap(),
        Some(vec![0, 1, 2])
    );
}

#[tokio::test]
async fn test_invalid_join_is_rejected() {
    let (service, tracker_addr) = spawn_tracker().await;
    let client = TrackerClient::new(reqwest::Client::new(), &tracker_addr.to_string(), TIMEOUT);

    let result = client
        .join(&JoinRequest {
            node_id: NodeId::from(""),
            action: Action::Put,
            file_name: "f".to_string(),
            file_size_mb: Some(3),
        })
        .await;

    assert!(result.is_err());
    let stats = service.stats().await;
    assert!(stats.nodes.is_empty());
    assert_eq!(stats.chunk_count, 0);
}

#[tokio::test]
async fn test_leave_orphans_chunks_and_reports_stats() {
    let (_, tracker_addr) = spawn_tracker().await;
    let (store, node_id) = spawn_node().await;
    let client = TrackerClient::new(reqwest::Client::new(), &tracker_addr.to_string(), TIMEOUT);

    let solo = session(&node_id, tracker_addr);
    let put = solo.put("notes", 3).await.unwrap();
    assert_eq!(put.push.delivered.len(), 3);
    assert_eq!(store.len().await, 3);

    let stats = client.stats().await.unwrap();
    assert_eq!(stats.nodes.get(&node_id), Some(&3));
    assert_eq!(stats.chunk_count, 3);

    assert_eq!(solo.leave().await.unwrap(), format!("Node {} disconnected.", node_id));

    let stats = client.stats().await.unwrap();
    assert!(stats.nodes.is_empty());
    assert_eq!(stats.chunk_count, 0);

    // The tracker forgot the file even though the bytes are still stored.
    let other = NodeId::from("127.0.0.1:9");
    let get = session(&other, tracker_addr).get("notes").await.unwrap();
    assert!(get.response.chunk_map.is_empty());
    assert!(get.pull.is_none());
}

#[tokio::test]
async fn test_get_from_departed_holder_fails_per_chunk() {
    let (_, tracker_addr) = spawn_tracker().await;
    let (_, node_id) = spawn_node().await;

    // A holder that was assigned but never stored the bytes.
    let ghost = session(&NodeId::from("127.0.0.1:1"), tracker_addr);
    ghost.put("ghost", 1).await.unwrap();

    let get = session(&node_id, tracker_addr).get("ghost").await.unwrap();
    let pull = get.pull.unwrap();
    assert_eq!(pull.chunks.len(), 1);
    assert!(matches!(pull.chunks[0].1, PullOutcome::Failed { .. }));
    assert_eq!(pull.assemble(), None);
}

#[tokio::test]
async fn test_get_after_orphaned_chunk_reports_gap() {
    let (_, tracker_addr) = spawn_tracker_with_replicas(1).await;
    let (_, first) = spawn_node().await;
    let (_, second) = spawn_node().await;

    session(&second, tracker_addr).get("nothing").await.unwrap();
    let put = session(&first, tracker_addr).put("album", 3).await.unwrap();
    assert!(put.push.failed.is_empty());

    // With one replica per chunk, least-loaded placement gives the middle
    // chunk to one node and the outer chunks to the other.
    let middle_holder = put.response.chunk_map[&ChunkId::from("album-2")][0].clone();
    for seq in [1, 3] {
        let holders = &put.response.chunk_map[&ChunkId::new("album", seq)];
        assert!(!holders.contains(&middle_holder));
    }
    let survivor = if middle_holder == first { second } else { first };

    session(&middle_holder, tracker_addr).leave().await.unwrap();

    let get = session(&survivor, tracker_addr).get("album").await.unwrap();
    assert_eq!(get.response.chunk_map.len(), 2);
    let pull = get.pull.unwrap();
    assert_eq!(pull.received(), 2);
    assert_eq!(pull.missing_sequences(), vec![2]);
    assert!(!pull.is_complete());
    assert_eq!(pull.assemble(), None);
}
