use crate::chunk::types::{Chunk, ChunkId};
use crate::membership::types::NodeId;
use crate::storage::protocol::{
    ChunkResponse, ENDPOINT_CHUNKS, StoreChunkRequest, StoreChunkResponse,
};
use crate::tracker::protocol::{
    ENDPOINT_JOIN, ENDPOINT_LEAVE, ENDPOINT_STATS, JoinRequest, JoinResponse, LeaveRequest,
    LeaveResponse, StatsResponse,
};

use anyhow::Result;
use std::time::Duration;

/// Timeout applied to every outgoing request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_millis(2000);

/// Client for the tracker's Join/Leave API.
#[derive(Debug, Clone)]
pub struct TrackerClient {
    http_client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl TrackerClient {
    /// `tracker_addr` is either `host:port` or a full `http://` URL.
    pub fn new(http_client: reqwest::Client, tracker_addr: &str, timeout: Duration) -> Self {
        let trimmed = tracker_addr.trim_end_matches('/');
        let base_url = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            trimmed.to_string()
        } else {
            format!("http://{}", trimmed)
        };

        Self {
            http_client,
            base_url,
            timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn join(&self, req: &JoinRequest) -> Result<JoinResponse> {
        let response = self
            .http_client
            .post(format!("{}{}", self.base_url, ENDPOINT_JOIN))
            .json(req)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::BAD_REQUEST {
            let rejected: JoinResponse = response.json().await?;
            return Err(anyhow::anyhow!("Tracker rejected join: {}", rejected.message));
        }
        if !status.is_success() {
            return Err(anyhow::anyhow!("Join failed {}", status));
        }

        Ok(response.json().await?)
    }

    pub async fn leave(&self, node_id: &NodeId) -> Result<LeaveResponse> {
        let payload = LeaveRequest {
            node_id: node_id.clone(),
        };
        let response = self
            .http_client
            .post(format!("{}{}", self.base_url, ENDPOINT_LEAVE))
            .json(&payload)
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!("Leave failed {}", response.status()));
        }

        Ok(response.json().await?)
    }

    pub async fn stats(&self) -> Result<StatsResponse> {
        let response = self
            .http_client
            .get(format!("{}{}", self.base_url, ENDPOINT_STATS))
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!("Stats request failed {}", response.status()));
        }

        Ok(response.json().await?)
    }
}

/// Client for other nodes' chunk stores, addressed by their `NodeId`.
#[derive(Debug, Clone)]
pub struct PeerClient {
    http_client: reqwest::Client,
    timeout: Duration,
}

impl PeerClient {
    pub fn new(http_client: reqwest::Client, timeout: Duration) -> Self {
        Self {
            http_client,
            timeout,
        }
    }

    pub async fn store_chunk(&self, node_id: &NodeId, chunk: &Chunk) -> Result<StoreChunkResponse> {
        let payload = StoreChunkRequest {
            chunk_id: chunk.id.clone(),
            chunk_data: chunk.data.clone(),
        };
        let response = self
            .http_client
            .post(format!("http://{}{}", node_id, ENDPOINT_CHUNKS))
            .json(&payload)
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "StoreChunk {} on {} failed {}",
                chunk.id,
                node_id,
                response.status()
            ));
        }

        Ok(response.json().await?)
    }

    /// Fetches a chunk from `node_id`.
    ///
    /// `Ok(None)` means the peer answered but does not hold the chunk; `Err`
    /// is reserved for transport and protocol failures.
    pub async fn request_chunk(&self, node_id: &NodeId, chunk_id: &ChunkId) -> Result<Option<Vec<u8>>> {
        let url = format!(
            "http://{}{}/{}",
            node_id,
            ENDPOINT_CHUNKS,
            urlencoding::encode(chunk_id.as_str())
        );

        let response = self
            .http_client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(anyhow::anyhow!("RequestChunk failed {}", response.status()));
        }

        let chunk_response: ChunkResponse = response.json().await?;
        Ok(chunk_response.chunk_data)
    }
}
