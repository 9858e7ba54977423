//! Assignment snapshot endpoint handlers.
//!
//! Snapshot reads are public: holding the token is enough.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::snapshot::{CreateSnapshotRequest, CreateSnapshotResponse, SnapshotView};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{AppJson, ShareBaseUrl};
use crate::middleware::metrics::record_snapshot_created;

/// POST /api/v1/snapshots
pub async fn create_snapshot(
    State(state): State<AppState>,
    ShareBaseUrl(base_url): ShareBaseUrl,
    AppJson(request): AppJson<CreateSnapshotRequest>,
) -> Result<(StatusCode, Json<CreateSnapshotResponse>), ApiError> {
    let created = state.snapshots.create(request, &base_url).await?;
    record_snapshot_created();
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/v1/snapshots/:token
pub async fn get_snapshot(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<SnapshotView>, ApiError> {
    state
        .snapshots
        .get(&token)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Snapshot not found".to_string()))
}
