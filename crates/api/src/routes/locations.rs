//! Location endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::geometry::GeofenceShape;
use domain::models::location::{
    CreateLocationRequest, Location, LocationWithPersonnel, UpdateLocationRequest,
};
use domain::models::Personnel;
use serde::Deserialize;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AppJson;
use crate::middleware::metrics::record_location_created;
use crate::routes::{IdResponse, OkResponse};

/// Query string of the geofence endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct GeofenceQuery {
    pub zoom: Option<f64>,
}

/// GET /api/v1/locations
pub async fn list_locations(State(state): State<AppState>) -> Result<Json<Vec<Location>>, ApiError> {
    Ok(Json(state.locations.list().await?))
}

/// POST /api/v1/locations
pub async fn create_location(
    State(state): State<AppState>,
    AppJson(request): AppJson<CreateLocationRequest>,
) -> Result<(StatusCode, Json<IdResponse>), ApiError> {
    let id = state.locations.create(request).await?;
    record_location_created();
    Ok((StatusCode::CREATED, Json(IdResponse { id })))
}

/// GET /api/v1/locations/:id
///
/// The location with its personnel.
pub async fn get_location(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<LocationWithPersonnel>, ApiError> {
    state
        .locations
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Location {}", id)))
}

/// PATCH /api/v1/locations/:id
pub async fn update_location(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    AppJson(request): AppJson<UpdateLocationRequest>,
) -> Result<Json<OkResponse>, ApiError> {
    state.locations.update(id, request).await?;
    Ok(Json(OkResponse::default()))
}

/// DELETE /api/v1/locations/:id
///
/// Personnel attached to the location are deleted with it.
pub async fn delete_location(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<OkResponse>, ApiError> {
    state.locations.delete(id).await?;
    Ok(Json(OkResponse::default()))
}

/// GET /api/v1/locations/:id/personnel
pub async fn list_location_personnel(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Personnel>>, ApiError> {
    Ok(Json(state.personnel.list_by_location(id).await?))
}

/// GET /api/v1/locations/:id/geofence?zoom=
pub async fn get_location_geofence(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    query: Result<Query<GeofenceQuery>, axum::extract::rejection::QueryRejection>,
) -> Result<Json<GeofenceShape>, ApiError> {
    let Query(query) = query?;
    Ok(Json(state.locations.geofence(id, query.zoom).await?))
}
