//! Peer Chunk Protocol
//!
//! Node-to-node calls used to push chunk bytes after a put and to pull them
//! during a get. Bodies are JSON; chunk ids in paths are percent-encoded.

use crate::chunk::types::ChunkId;
use serde::{Deserialize, Serialize};

// --- API Endpoints ---

/// `POST`: store a chunk on the receiving node.
/// `GET /chunks/{chunk_id}`: fetch a chunk from the receiving node.
pub const ENDPOINT_CHUNKS: &str = "/chunks";

// --- Data Transfer Objects ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreChunkRequest {
    pub chunk_id: ChunkId,
    pub chunk_data: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreChunkResponse {
    pub message: String,
}

/// Answer to a chunk fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkResponse {
    /// The chunk bytes. `None` means this node does not hold the chunk.
    pub chunk_data: Option<Vec<u8>>,
    pub message: String,
}
