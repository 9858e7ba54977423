//! Location repository for database operations.

use async_trait::async_trait;
use domain::models::location::{ListOrder, Location, LocationPatch, NewLocation};
use domain::store::LocationStore;
use domain::{style, DomainError};
use sqlx::PgPool;

use crate::entities::LocationEntity;
use crate::error::map_sqlx_error;
use crate::metrics::QueryTimer;

const LOCATION_COLUMNS: &str = "id, name, description, latitude, longitude, location_type, \
    radius, is_active, style, notes, created_at, updated_at";

/// Repository for location-related database operations.
#[derive(Clone)]
pub struct LocationRepository {
    pool: PgPool,
}

impl LocationRepository {
    /// Creates a new LocationRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all locations.
    pub async fn list(&self, order: ListOrder) -> Result<Vec<LocationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_locations");
        let direction = match order {
            ListOrder::NewestFirst => "DESC",
            ListOrder::OldestFirst => "ASC",
        };
        let query = format!(
            "SELECT {} FROM locations ORDER BY id {}",
            LOCATION_COLUMNS, direction
        );
        let result = sqlx::query_as::<_, LocationEntity>(&query)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Find location by ID.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<LocationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_location_by_id");
        let query = format!("SELECT {} FROM locations WHERE id = $1", LOCATION_COLUMNS);
        let result = sqlx::query_as::<_, LocationEntity>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Insert a new location and return its ID.
    pub async fn insert(&self, location: &NewLocation) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("insert_location");
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO locations (name, description, latitude, longitude, location_type, radius, is_active, style, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id
            "#,
        )
        .bind(&location.name)
        .bind(location.description.as_deref())
        .bind(&location.latitude)
        .bind(&location.longitude)
        .bind(location.location_type.as_str())
        .bind(location.radius)
        .bind(location.is_active)
        .bind(style::encode_for_storage(&location.style))
        .bind(location.notes.as_deref())
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Apply a partial update. Returns the number of affected rows.
    pub async fn update(&self, id: i64, patch: &LocationPatch) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("update_location");
        let result = sqlx::query(
            r#"
            UPDATE locations
            SET
                name = COALESCE($2, name),
                description = CASE WHEN $3::boolean THEN $4 ELSE description END,
                latitude = COALESCE($5, latitude),
                longitude = COALESCE($6, longitude),
                location_type = COALESCE($7, location_type),
                radius = CASE WHEN $8::boolean THEN $9 ELSE radius END,
                is_active = COALESCE($10, is_active),
                style = CASE WHEN $11::boolean THEN $12 ELSE style END,
                notes = CASE WHEN $13::boolean THEN $14 ELSE notes END,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(patch.name.as_deref())
        .bind(patch.description.is_some())
        .bind(patch.description.clone().flatten())
        .bind(patch.latitude.as_deref())
        .bind(patch.longitude.as_deref())
        .bind(patch.location_type.map(|t| t.as_str()))
        .bind(patch.radius.is_some())
        .bind(patch.radius.flatten())
        .bind(patch.is_active)
        .bind(patch.style.is_some())
        .bind(patch.style.as_ref().and_then(style::encode_for_storage))
        .bind(patch.notes.is_some())
        .bind(patch.notes.clone().flatten())
        .execute(&self.pool)
        .await;
        timer.record();
        Ok(result?.rows_affected())
    }

    /// Delete a location; personnel rows go with it through the foreign key.
    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_location");
        let result = sqlx::query("DELETE FROM locations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected() > 0)
    }
}

#[async_trait]
impl LocationStore for LocationRepository {
    async fn list(&self, order: ListOrder) -> Result<Vec<Location>, DomainError> {
        let entities = LocationRepository::list(self, order)
            .await
            .map_err(|e| map_sqlx_error("list_locations", e))?;
        Ok(entities.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Location>, DomainError> {
        let entity = LocationRepository::find_by_id(self, id)
            .await
            .map_err(|e| map_sqlx_error("find_location_by_id", e))?;
        Ok(entity.map(Into::into))
    }

    async fn insert(&self, location: NewLocation) -> Result<i64, DomainError> {
        LocationRepository::insert(self, &location)
            .await
            .map_err(|e| map_sqlx_error("insert_location", e))
    }

    async fn update(&self, id: i64, patch: LocationPatch) -> Result<bool, DomainError> {
        let affected = LocationRepository::update(self, id, &patch)
            .await
            .map_err(|e| map_sqlx_error("update_location", e))?;
        Ok(affected > 0)
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        LocationRepository::delete(self, id)
            .await
            .map_err(|e| map_sqlx_error("delete_location", e))
    }
}
