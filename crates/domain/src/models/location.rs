//! Location domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use shared::patch::double_option;
use shared::validation::{
    parse_coordinate, validate_latitude_text, validate_longitude_text, validate_not_blank,
    validate_radius,
};
use validator::Validate;

use crate::error::DomainError;
use crate::geometry::{geofence_shape, GeofenceShape};
use crate::models::personnel::Personnel;
use crate::style::LocationStyle;

/// Kind of site a location represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationType {
    Security,
    Traffic,
    Mixed,
}

impl LocationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationType::Security => "security",
            LocationType::Traffic => "traffic",
            LocationType::Mixed => "mixed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "security" => Some(LocationType::Security),
            "traffic" => Some(LocationType::Traffic),
            "mixed" => Some(LocationType::Mixed),
            _ => None,
        }
    }
}

impl std::fmt::Display for LocationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order in which `list` returns locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListOrder {
    /// Highest id first.
    #[default]
    NewestFirst,
    /// Creation order.
    OldestFirst,
}

/// A coordinate exactly as the client sent it.
///
/// Accepts a JSON string or a JSON number and always serializes as a string,
/// so `"24.74230"` keeps its trailing zero through storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinateText(String);

impl CoordinateText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Serialize for CoordinateText {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CoordinateText {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Number(serde_json::Number),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Text(text) => Ok(CoordinateText::new(text)),
            Repr::Number(number) => Ok(CoordinateText::new(number.to_string())),
        }
    }
}

/// Boolean flag that also accepts `0` and `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveFlag(pub bool);

impl<'de> Deserialize<'de> for ActiveFlag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Bool(bool),
            Int(i64),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Bool(value) => Ok(ActiveFlag(value)),
            Repr::Int(0) => Ok(ActiveFlag(false)),
            Repr::Int(1) => Ok(ActiveFlag(true)),
            Repr::Int(other) => Err(serde::de::Error::custom(format!(
                "isActive must be a boolean, got {}",
                other
            ))),
        }
    }
}

/// A geofenced point of interest.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub latitude: String,
    pub longitude: String,
    pub location_type: LocationType,
    pub radius: Option<i32>,
    pub is_active: bool,
    pub style: LocationStyle,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Location {
    /// Parses the stored coordinates into `(latitude, longitude)`.
    pub fn center(&self) -> Result<(f64, f64), DomainError> {
        let lat = parse_coordinate(&self.latitude)
            .map_err(|e| DomainError::invalid_field("latitude", e))?;
        let lng = parse_coordinate(&self.longitude)
            .map_err(|e| DomainError::invalid_field("longitude", e))?;
        Ok((lat, lng))
    }

    /// Renderable geofence circle; a missing radius falls back to `default_radius`.
    pub fn geofence(
        &self,
        default_radius: i32,
        zoom: Option<f64>,
    ) -> Result<GeofenceShape, DomainError> {
        let (lat, lng) = self.center()?;
        let radius = self.radius.unwrap_or(default_radius);
        Ok(geofence_shape(lat, lng, f64::from(radius), check_zoom(zoom)?))
    }
}

/// Highest zoom level the map widget renders.
pub const MAX_ZOOM: f64 = 22.0;

fn check_zoom(zoom: Option<f64>) -> Result<Option<f64>, DomainError> {
    match zoom {
        Some(z) if !z.is_finite() || !(0.0..=MAX_ZOOM).contains(&z) => Err(
            DomainError::Validation(format!("zoom: Zoom must be between 0 and {}", MAX_ZOOM)),
        ),
        other => Ok(other),
    }
}

/// Draft geofence sent by the map editor while a form is being edited.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeofencePreviewRequest {
    #[serde(alias = "lat")]
    pub latitude: CoordinateText,
    #[serde(alias = "lng")]
    pub longitude: CoordinateText,
    pub radius: Option<f64>,
    pub zoom: Option<f64>,
}

impl GeofencePreviewRequest {
    /// Builds the preview shape. Radius falls back to `default_radius` and is
    /// clamped to at least one meter.
    pub fn shape(&self, default_radius: i32) -> Result<GeofenceShape, DomainError> {
        let lat = parse_coordinate(self.latitude.as_str())
            .and_then(|v| shared::validation::validate_latitude(v).map(|_| v))
            .map_err(|e| DomainError::invalid_field("latitude", e))?;
        let lng = parse_coordinate(self.longitude.as_str())
            .and_then(|v| shared::validation::validate_longitude(v).map(|_| v))
            .map_err(|e| DomainError::invalid_field("longitude", e))?;
        let radius = self.radius.unwrap_or(f64::from(default_radius));
        Ok(geofence_shape(lat, lng, radius, check_zoom(self.zoom)?))
    }
}

/// A location together with the personnel attached to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationWithPersonnel {
    #[serde(flatten)]
    pub location: Location,
    pub personnel: Vec<Personnel>,
}

/// Request payload for creating a location.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLocationRequest {
    #[serde(default)]
    #[validate(length(max = 255, message = "Name must be at most 255 characters"))]
    pub name: String,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    #[serde(alias = "lat")]
    pub latitude: Option<CoordinateText>,

    #[serde(alias = "lng")]
    pub longitude: Option<CoordinateText>,

    pub location_type: Option<LocationType>,

    pub radius: Option<i32>,

    pub is_active: Option<ActiveFlag>,

    pub style: Option<LocationStyle>,

    #[validate(length(max = 4000, message = "Notes must be at most 4000 characters"))]
    pub notes: Option<String>,
}

impl CreateLocationRequest {
    /// Validates the request and fills in defaults.
    pub fn into_new_location(self, default_radius: i32) -> Result<NewLocation, DomainError> {
        self.validate()
            .map_err(|e| DomainError::from_validation(&e))?;

        validate_not_blank(&self.name).map_err(|e| DomainError::invalid_field("name", e))?;

        let latitude = self
            .latitude
            .ok_or_else(|| DomainError::Validation("latitude: Latitude is required".into()))?;
        validate_latitude_text(latitude.as_str())
            .map_err(|e| DomainError::invalid_field("latitude", e))?;

        let longitude = self
            .longitude
            .ok_or_else(|| DomainError::Validation("longitude: Longitude is required".into()))?;
        validate_longitude_text(longitude.as_str())
            .map_err(|e| DomainError::invalid_field("longitude", e))?;

        let location_type = self.location_type.ok_or_else(|| {
            DomainError::Validation("locationType: Location type is required".into())
        })?;

        let radius = self.radius.unwrap_or(default_radius);
        validate_radius(radius).map_err(|e| DomainError::invalid_field("radius", e))?;

        let style = self.style.unwrap_or_default();
        style.validate()?;

        Ok(NewLocation {
            name: self.name.trim().to_string(),
            description: self.description,
            latitude: latitude.into_inner(),
            longitude: longitude.into_inner(),
            location_type,
            radius: Some(radius),
            is_active: self.is_active.map(|f| f.0).unwrap_or(true),
            style,
            notes: self.notes,
        })
    }
}

/// Request payload for a partial location update.
///
/// Absent keys are left untouched; `null` clears nullable columns.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLocationRequest {
    #[serde(default, deserialize_with = "double_option")]
    pub name: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,

    #[serde(default, alias = "lat", deserialize_with = "double_option")]
    pub latitude: Option<Option<CoordinateText>>,

    #[serde(default, alias = "lng", deserialize_with = "double_option")]
    pub longitude: Option<Option<CoordinateText>>,

    #[serde(default, deserialize_with = "double_option")]
    pub location_type: Option<Option<LocationType>>,

    #[serde(default, deserialize_with = "double_option")]
    pub radius: Option<Option<i32>>,

    #[serde(default, deserialize_with = "double_option")]
    pub is_active: Option<Option<ActiveFlag>>,

    #[serde(default, deserialize_with = "double_option")]
    pub style: Option<Option<LocationStyle>>,

    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
}

fn required<T>(field: &str, value: Option<Option<T>>) -> Result<Option<T>, DomainError> {
    match value {
        Some(None) => Err(DomainError::Validation(format!(
            "{}: Value cannot be null",
            field
        ))),
        Some(Some(v)) => Ok(Some(v)),
        None => Ok(None),
    }
}

impl UpdateLocationRequest {
    /// Validates the supplied fields and converts them into a storage patch.
    pub fn into_patch(self) -> Result<LocationPatch, DomainError> {
        let name = required("name", self.name)?;
        if let Some(name) = &name {
            validate_not_blank(name).map_err(|e| DomainError::invalid_field("name", e))?;
        }

        let latitude = required("latitude", self.latitude)?;
        if let Some(lat) = &latitude {
            validate_latitude_text(lat.as_str())
                .map_err(|e| DomainError::invalid_field("latitude", e))?;
        }

        let longitude = required("longitude", self.longitude)?;
        if let Some(lng) = &longitude {
            validate_longitude_text(lng.as_str())
                .map_err(|e| DomainError::invalid_field("longitude", e))?;
        }

        let location_type = required("locationType", self.location_type)?;
        let is_active = required("isActive", self.is_active)?;

        if let Some(Some(radius)) = self.radius {
            validate_radius(radius).map_err(|e| DomainError::invalid_field("radius", e))?;
        }

        let style = self.style.map(Option::unwrap_or_default);
        if let Some(style) = &style {
            style.validate()?;
        }

        Ok(LocationPatch {
            name: name.map(|n| n.trim().to_string()),
            description: self.description,
            latitude: latitude.map(CoordinateText::into_inner),
            longitude: longitude.map(CoordinateText::into_inner),
            location_type,
            radius: self.radius,
            is_active: is_active.map(|f| f.0),
            style,
            notes: self.notes,
        })
    }
}

/// A validated location ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLocation {
    pub name: String,
    pub description: Option<String>,
    pub latitude: String,
    pub longitude: String,
    pub location_type: LocationType,
    pub radius: Option<i32>,
    pub is_active: bool,
    pub style: LocationStyle,
    pub notes: Option<String>,
}

/// A validated partial update.
///
/// `None` leaves a column untouched. For nullable columns `Some(None)`
/// clears the value. An empty `style` clears the stored style.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub location_type: Option<LocationType>,
    pub radius: Option<Option<i32>>,
    pub is_active: Option<bool>,
    pub style: Option<LocationStyle>,
    pub notes: Option<Option<String>>,
}

impl LocationPatch {
    /// Applies the patch to an in-memory record. Does not touch `updated_at`.
    pub fn apply_to(&self, location: &mut Location) {
        if let Some(name) = &self.name {
            location.name = name.clone();
        }
        if let Some(description) = &self.description {
            location.description = description.clone();
        }
        if let Some(latitude) = &self.latitude {
            location.latitude = latitude.clone();
        }
        if let Some(longitude) = &self.longitude {
            location.longitude = longitude.clone();
        }
        if let Some(location_type) = self.location_type {
            location.location_type = location_type;
        }
        if let Some(radius) = self.radius {
            location.radius = radius;
        }
        if let Some(is_active) = self.is_active {
            location.is_active = is_active;
        }
        if let Some(style) = &self.style {
            location.style = style.clone();
        }
        if let Some(notes) = &self.notes {
            location.notes = notes.clone();
        }
    }
}
