//! Location entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::location::{Location, LocationType};
use domain::style;
use sqlx::FromRow;

/// Database row mapping for the locations table.
#[derive(Debug, Clone, FromRow)]
pub struct LocationEntity {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub latitude: String,
    pub longitude: String,
    pub location_type: String,
    pub radius: Option<i32>,
    pub is_active: bool,
    pub style: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<LocationEntity> for Location {
    fn from(entity: LocationEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            latitude: entity.latitude,
            longitude: entity.longitude,
            location_type: LocationType::parse(&entity.location_type)
                .unwrap_or(LocationType::Security),
            radius: entity.radius,
            is_active: entity.is_active,
            style: style::decode(entity.style.as_deref()),
            notes: entity.notes,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
