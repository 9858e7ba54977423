//! Geofence preview for unsaved drafts.

use axum::{extract::State, Json};
use domain::geometry::GeofenceShape;
use domain::models::location::GeofencePreviewRequest;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AppJson;

/// POST /api/v1/geofence/preview
///
/// Renders the circle for `{latitude, longitude, radius?, zoom?}` without
/// touching storage.
pub async fn preview_geofence(
    State(state): State<AppState>,
    AppJson(request): AppJson<GeofencePreviewRequest>,
) -> Result<Json<GeofenceShape>, ApiError> {
    Ok(Json(state.locations.preview(&request)?))
}
