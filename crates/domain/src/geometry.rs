//! Geofence geometry helpers.
//!
//! Turns a centre point and radius into a renderable circle polygon and
//! converts ground distances to screen pixels with the Web-Mercator scale.
//! All functions are pure.

use geo::{Coord, HaversineDestination, LineString, Point, Polygon};
use serde::Serialize;

/// Number of segments used to approximate a circle.
pub const CIRCLE_SEGMENTS: usize = 64;

/// Smallest radius rendered; non-finite or smaller radii are clamped to it.
pub const MIN_RADIUS_METERS: f64 = 1.0;

/// Ground resolution at zoom 0 on the equator, in meters per pixel.
pub const EQUATOR_METERS_PER_PIXEL: f64 = 156_543.033_92;

fn clamp_radius(radius_meters: f64) -> f64 {
    if radius_meters.is_finite() && radius_meters >= MIN_RADIUS_METERS {
        radius_meters
    } else {
        MIN_RADIUS_METERS
    }
}

/// Approximates a circle around (`latitude`, `longitude`) as a closed ring.
///
/// The exterior ring always has `CIRCLE_SEGMENTS + 1` coordinates, the last
/// repeating the first. Coordinates are `x = longitude`, `y = latitude`.
pub fn circle_to_polygon(latitude: f64, longitude: f64, radius_meters: f64) -> Polygon<f64> {
    let radius = clamp_radius(radius_meters);
    let center = Point::new(longitude, latitude);

    let mut coords: Vec<Coord<f64>> = (0..CIRCLE_SEGMENTS)
        .map(|step| {
            let bearing = 360.0 * step as f64 / CIRCLE_SEGMENTS as f64;
            center.haversine_destination(bearing, radius).0
        })
        .collect();
    coords.push(coords[0]);

    Polygon::new(LineString::new(coords), vec![])
}

/// Meters covered by one pixel at `zoom` near `reference_latitude`.
pub fn meters_per_pixel(zoom: f64, reference_latitude: f64) -> f64 {
    EQUATOR_METERS_PER_PIXEL * reference_latitude.to_radians().cos() / 2f64.powf(zoom)
}

/// Converts a ground distance into screen pixels.
///
/// Valid near `reference_latitude`; degrades near the poles and at extreme
/// zoom-out.
pub fn meters_to_pixels(meters: f64, zoom: f64, reference_latitude: f64) -> f64 {
    meters / meters_per_pixel(zoom, reference_latitude)
}

/// GeoJSON polygon geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoJsonPolygon {
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Rings of `[longitude, latitude]` pairs.
    pub coordinates: Vec<Vec<[f64; 2]>>,
}

impl From<&Polygon<f64>> for GeoJsonPolygon {
    fn from(polygon: &Polygon<f64>) -> Self {
        let exterior = polygon
            .exterior()
            .coords()
            .map(|c| [c.x, c.y])
            .collect();
        Self {
            kind: "Polygon",
            coordinates: vec![exterior],
        }
    }
}

/// A geofence circle ready for the map: polygon plus on-screen radius.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeofenceShape {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_meters: f64,
    pub polygon: GeoJsonPolygon,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pixel_radius: Option<f64>,
}

/// Builds the renderable shape of a geofence circle.
///
/// `pixel_radius` is only computed when `zoom` is given.
pub fn geofence_shape(
    latitude: f64,
    longitude: f64,
    radius_meters: f64,
    zoom: Option<f64>,
) -> GeofenceShape {
    let radius = clamp_radius(radius_meters);
    let polygon = circle_to_polygon(latitude, longitude, radius);
    GeofenceShape {
        latitude,
        longitude,
        radius_meters: radius,
        polygon: GeoJsonPolygon::from(&polygon),
        zoom,
        pixel_radius: zoom.map(|z| meters_to_pixels(radius, z, latitude)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::HaversineDistance;

    const GATE_LAT: f64 = 24.7423;
    const GATE_LNG: f64 = 46.5733;

    #[test]
    fn test_ring_is_closed() {
        let polygon = circle_to_polygon(GATE_LAT, GATE_LNG, 50.0);
        let ring: Vec<_> = polygon.exterior().coords().copied().collect();
        assert_eq!(ring.first(), ring.last());
    }

    #[test]
    fn test_vertex_count_is_constant() {
        for radius in [1.0, 5.0, 50.0, 500.0, 25_000.0] {
            let polygon = circle_to_polygon(GATE_LAT, GATE_LNG, radius);
            assert_eq!(polygon.exterior().0.len(), CIRCLE_SEGMENTS + 1);
        }
    }

    #[test]
    fn test_vertices_lie_on_the_circle() {
        let center = Point::new(GATE_LNG, GATE_LAT);
        let polygon = circle_to_polygon(GATE_LAT, GATE_LNG, 120.0);
        for coord in polygon.exterior().coords() {
            let distance = center.haversine_distance(&Point::from(*coord));
            assert!((distance - 120.0).abs() < 0.5, "distance was {}", distance);
        }
    }

    #[test]
    fn test_non_finite_radius_is_clamped() {
        for radius in [f64::NAN, f64::INFINITY, -10.0, 0.0] {
            let shape = geofence_shape(GATE_LAT, GATE_LNG, radius, None);
            assert_eq!(shape.radius_meters, MIN_RADIUS_METERS);
            assert_eq!(shape.polygon.coordinates[0].len(), CIRCLE_SEGMENTS + 1);
        }
    }

    #[test]
    fn test_meters_per_pixel_at_equator() {
        assert!((meters_per_pixel(0.0, 0.0) - EQUATOR_METERS_PER_PIXEL).abs() < 1e-6);
        assert!((meters_per_pixel(1.0, 0.0) - EQUATOR_METERS_PER_PIXEL / 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_meters_to_pixels_doubles_per_zoom_level() {
        let at_14 = meters_to_pixels(100.0, 14.0, GATE_LAT);
        let at_15 = meters_to_pixels(100.0, 15.0, GATE_LAT);
        assert!((at_15 / at_14 - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_pixels_round_trip() {
        let pixels = meters_to_pixels(60.0, 14.8, GATE_LAT);
        let meters = pixels * meters_per_pixel(14.8, GATE_LAT);
        assert!((meters - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_geofence_shape_pixel_radius() {
        let shape = geofence_shape(GATE_LAT, GATE_LNG, 60.0, Some(18.0));
        let expected = meters_to_pixels(60.0, 18.0, GATE_LAT);
        assert_eq!(shape.pixel_radius, Some(expected));

        let shape = geofence_shape(GATE_LAT, GATE_LNG, 60.0, None);
        assert!(shape.pixel_radius.is_none());
    }

    #[test]
    fn test_geojson_serialization() {
        let shape = geofence_shape(GATE_LAT, GATE_LNG, 50.0, None);
        let json = serde_json::to_value(&shape).unwrap();
        assert_eq!(json["polygon"]["type"], "Polygon");
        assert_eq!(json["radiusMeters"], 50.0);
        assert!(json.get("pixelRadius").is_none());
    }
}
