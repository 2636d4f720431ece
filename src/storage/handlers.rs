use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    routing::{get, post},
};
use std::sync::Arc;

use super::memory::ChunkStore;
use super::protocol::{ChunkResponse, ENDPOINT_CHUNKS, StoreChunkRequest, StoreChunkResponse};
use crate::chunk::types::ChunkId;

/// Routes of a node's chunk server.
pub fn router(store: Arc<ChunkStore>) -> Router {
    Router::new()
        .route(ENDPOINT_CHUNKS, post(handle_store_chunk))
        .route(&format!("{}/:chunk_id", ENDPOINT_CHUNKS), get(handle_request_chunk))
        .layer(Extension(store))
}

pub async fn handle_store_chunk(
    Extension(store): Extension<Arc<ChunkStore>>,
    Json(req): Json<StoreChunkRequest>,
) -> (StatusCode, Json<StoreChunkResponse>) {
    let size = req.chunk_data.len();
    if store.store(req.chunk_id.clone(), req.chunk_data).await.is_some() {
        tracing::debug!("Overwrote chunk {}", req.chunk_id);
    }
    tracing::info!("Stored chunk {} ({} bytes)", req.chunk_id, size);

    (
        StatusCode::OK,
        Json(StoreChunkResponse {
            message: format!("Chunk {} stored successfully", req.chunk_id),
        }),
    )
}

pub async fn handle_request_chunk(
    Extension(store): Extension<Arc<ChunkStore>>,
    Path(chunk_id): Path<String>,
) -> (StatusCode, Json<ChunkResponse>) {
    let chunk_id = ChunkId(chunk_id);

    match store.fetch(&chunk_id).await {
        Some(data) => {
            tracing::info!("Serving chunk {}", chunk_id);
            (
                StatusCode::OK,
                Json(ChunkResponse {
                    chunk_data: Some(data),
                    message: format!("Chunk {} sent successfully", chunk_id),
                }),
            )
        }
        None => {
            tracing::info!("Chunk {} is not available on this node", chunk_id);
            (
                StatusCode::NOT_FOUND,
                Json(ChunkResponse {
                    chunk_data: None,
                    message: format!("Chunk {} is not available", chunk_id),
                }),
            )
        }
    }
}
