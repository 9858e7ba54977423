//! Personnel entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::personnel::{Personnel, PersonnelType};
use sqlx::FromRow;

/// Database row mapping for the personnel table.
#[derive(Debug, Clone, FromRow)]
pub struct PersonnelEntity {
    pub id: i64,
    pub location_id: i64,
    pub name: String,
    pub role: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub personnel_type: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PersonnelEntity> for Personnel {
    fn from(entity: PersonnelEntity) -> Self {
        Self {
            id: entity.id,
            location_id: entity.location_id,
            name: entity.name,
            role: entity.role,
            phone: entity.phone,
            email: entity.email,
            personnel_type: PersonnelType::parse(&entity.personnel_type).unwrap_or_default(),
            notes: entity.notes,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
