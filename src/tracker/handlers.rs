use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    routing::{get, post},
};
use std::sync::Arc;

use super::protocol::{
    ENDPOINT_JOIN, ENDPOINT_LEAVE, ENDPOINT_STATS, JoinRequest, JoinResponse, LeaveRequest,
    LeaveResponse, StatsResponse,
};
use super::service::TrackerService;

/// Routes of the tracker HTTP server.
pub fn router(service: Arc<TrackerService>) -> Router {
    Router::new()
        .route(ENDPOINT_JOIN, post(handle_join))
        .route(ENDPOINT_LEAVE, post(handle_leave))
        .route(ENDPOINT_STATS, get(handle_stats))
        .layer(Extension(service))
}

pub async fn handle_join(
    Extension(service): Extension<Arc<TrackerService>>,
    Json(req): Json<JoinRequest>,
) -> (StatusCode, Json<JoinResponse>) {
    match service.join(req).await {
        Ok(response) => (StatusCode::OK, Json(response)),
        Err(e) => {
            tracing::warn!("Rejected join request: {}", e);
            (
                StatusCode::BAD_REQUEST,
                Json(JoinResponse::message_only(e.to_string())),
            )
        }
    }
}

pub async fn handle_leave(
    Extension(service): Extension<Arc<TrackerService>>,
    Json(req): Json<LeaveRequest>,
) -> (StatusCode, Json<LeaveResponse>) {
    match service.leave(req).await {
        Ok(response) => (StatusCode::OK, Json(response)),
        Err(e) => {
            tracing::warn!("Rejected leave request: {}", e);
            (
                StatusCode::BAD_REQUEST,
                Json(LeaveResponse {
                    message: e.to_string(),
                }),
            )
        }
    }
}

pub async fn handle_stats(
    Extension(service): Extension<Arc<TrackerService>>,
) -> (StatusCode, Json<StatsResponse>) {
    (StatusCode::OK, Json(service.stats().await))
}
