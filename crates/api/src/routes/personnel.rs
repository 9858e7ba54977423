//! Personnel endpoint handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::personnel::{CreatePersonnelRequest, UpdatePersonnelRequest};
use domain::models::Personnel;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AppJson;
use crate::middleware::metrics::record_personnel_created;
use crate::routes::{IdResponse, OkResponse};

/// POST /api/v1/personnel
///
/// Fails with 400 `invalid_reference` when `locationId` does not exist.
pub async fn create_personnel(
    State(state): State<AppState>,
    AppJson(request): AppJson<CreatePersonnelRequest>,
) -> Result<(StatusCode, Json<IdResponse>), ApiError> {
    let id = state.personnel.create(request).await?;
    record_personnel_created();
    Ok((StatusCode::CREATED, Json(IdResponse { id })))
}

/// GET /api/v1/personnel/:id
pub async fn get_personnel(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Personnel>, ApiError> {
    state
        .personnel
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Personnel {}", id)))
}

/// PATCH /api/v1/personnel/:id
pub async fn update_personnel(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    AppJson(request): AppJson<UpdatePersonnelRequest>,
) -> Result<Json<OkResponse>, ApiError> {
    state.personnel.update(id, request).await?;
    Ok(Json(OkResponse::default()))
}

/// DELETE /api/v1/personnel/:id
pub async fn delete_personnel(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<OkResponse>, ApiError> {
    state.personnel.delete(id).await?;
    Ok(Json(OkResponse::default()))
}
