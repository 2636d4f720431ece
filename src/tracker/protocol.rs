//! Tracker Network Protocol
//!
//! Endpoints and DTOs exchanged between nodes and the tracker. Bodies are JSON.

use crate::chunk::types::ChunkId;
use crate::membership::types::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

// --- API Endpoints ---

/// Join the network to publish (`put`) or locate (`get`) a file.
pub const ENDPOINT_JOIN: &str = "/join";
/// Leave the network; the node is dropped from every replica list.
pub const ENDPOINT_LEAVE: &str = "/leave";
/// Read-only snapshot of membership and placement.
pub const ENDPOINT_STATS: &str = "/stats";

/// Chunk id -> ordered list of the nodes holding a replica.
pub type ChunkMap = HashMap<ChunkId, Vec<NodeId>>;

/// What a node wants from the tracker when joining.
///
/// Travels as a lowercase string. Anything other than `put` or `get` is kept
/// verbatim as `Unknown` and answered with a generic message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Action {
    Put,
    Get,
    Unknown(String),
}

impl From<String> for Action {
    fn from(value: String) -> Self {
        match value.as_str() {
            "put" => Action::Put,
            "get" => Action::Get,
            _ => Action::Unknown(value),
        }
    }
}

impl From<Action> for String {
    fn from(action: Action) -> Self {
        match action {
            Action::Put => "put".to_string(),
            Action::Get => "get".to_string(),
            Action::Unknown(other) => other,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Put => f.write_str("put"),
            Action::Get => f.write_str("get"),
            Action::Unknown(other) => f.write_str(other),
        }
    }
}

// --- Data Transfer Objects ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinRequest {
    /// Address of the joining node; it is also where peers reach its chunk store.
    pub node_id: NodeId,
    pub action: Action,
    pub file_name: String,
    /// Declared file size, only meaningful for `put`. Missing means 0.
    #[serde(default)]
    pub file_size_mb: Option<u64>,
}

/// Answer to a Join.
///
/// `chunk_map` is empty when the file was not found, when the action is
/// unknown, or when a put produced no chunks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinResponse {
    pub message: String,
    #[serde(default)]
    pub chunk_map: ChunkMap,
}

impl JoinResponse {
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            chunk_map: ChunkMap::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveRequest {
    pub node_id: NodeId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveResponse {
    pub message: String,
}

/// Snapshot of the tracker state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsResponse {
    /// Registered nodes and their current load.
    pub nodes: BTreeMap<NodeId, u64>,
    /// Number of chunks with at least one replica holder.
    pub chunk_count: usize,
}
