//! Assignment snapshot entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::snapshot::AssignmentSnapshot;
use serde_json::Value;
use sqlx::types::Json;
use sqlx::FromRow;

/// Database row mapping for the assignment_snapshots table.
#[derive(Debug, Clone, FromRow)]
pub struct SnapshotEntity {
    pub id: i64,
    pub token: String,
    pub data: Json<Value>,
    pub locations: Option<Json<Value>>,
    pub created_at: DateTime<Utc>,
}

impl From<SnapshotEntity> for AssignmentSnapshot {
    fn from(entity: SnapshotEntity) -> Self {
        Self {
            id: entity.id,
            token: entity.token,
            assignments: entity.data.0,
            locations: entity.locations.map(|l| l.0),
            created_at: entity.created_at,
        }
    }
}
