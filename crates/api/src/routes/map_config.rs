//! Public map configuration endpoint.
//!
//! Exposes the defaults the map client needs before it loads any data.

use axum::{extract::State, Json};
use domain::style::{LocationStyle, ResolvedStyle};
use serde::Serialize;

use crate::app::AppState;
use crate::config::{MapBounds, MapPoint};

/// Map configuration response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapConfigResponse {
    pub center: MapPoint,
    pub bounds: MapBounds,
    pub default_zoom: f64,
    /// Radius applied when a location is saved without one.
    pub default_radius_meters: i32,
    /// Style used for locations without an explicit style.
    pub default_style: ResolvedStyle,
}

/// GET /api/v1/config/map
pub async fn get_map_config(State(state): State<AppState>) -> Json<MapConfigResponse> {
    let config = &state.config;

    Json(MapConfigResponse {
        center: config.map.center,
        bounds: config.map.bounds,
        default_zoom: config.map.default_zoom,
        default_radius_meters: config.locations.default_radius_meters,
        default_style: LocationStyle::default().resolved(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapConfig;

    #[test]
    fn test_map_config_serialization() {
        let map = MapConfig::default();
        let response = MapConfigResponse {
            center: map.center,
            bounds: map.bounds,
            default_zoom: map.default_zoom,
            default_radius_meters: 100,
            default_style: LocationStyle::default().resolved(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["center"]["latitude"], 24.7423);
        assert_eq!(json["bounds"]["southWest"]["longitude"], 46.5598);
        assert_eq!(json["bounds"]["northEast"]["latitude"], 24.7512);
        assert_eq!(json["defaultZoom"], 14.8);
        assert_eq!(json["defaultRadiusMeters"], 100);
        assert_eq!(json["defaultStyle"]["fillColor"], "#0066ff");
    }
}
