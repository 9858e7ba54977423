//! Personnel repository for database operations.

use async_trait::async_trait;
use domain::models::personnel::{NewPersonnel, Personnel, PersonnelPatch};
use domain::store::PersonnelStore;
use domain::DomainError;
use sqlx::PgPool;

use crate::entities::PersonnelEntity;
use crate::error::map_sqlx_error;
use crate::metrics::QueryTimer;

/// Repository for personnel database operations.
#[derive(Clone)]
pub struct PersonnelRepository {
    pool: PgPool,
}

impl PersonnelRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List personnel attached to a location, oldest first.
    pub async fn list_by_location(
        &self,
        location_id: i64,
    ) -> Result<Vec<PersonnelEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_personnel_by_location");
        let result = sqlx::query_as::<_, PersonnelEntity>(
            r#"
            SELECT id, location_id, name, role, phone, email, personnel_type, notes, created_at, updated_at
            FROM personnel
            WHERE location_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(location_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<PersonnelEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_personnel_by_id");
        let result = sqlx::query_as::<_, PersonnelEntity>(
            r#"
            SELECT id, location_id, name, role, phone, email, personnel_type, notes, created_at, updated_at
            FROM personnel
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Insert a personnel record. Fails with a foreign key violation when the
    /// location does not exist.
    pub async fn insert(&self, personnel: &NewPersonnel) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("insert_personnel");
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO personnel (location_id, name, role, phone, email, personnel_type, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(personnel.location_id)
        .bind(&personnel.name)
        .bind(personnel.role.as_deref())
        .bind(personnel.phone.as_deref())
        .bind(personnel.email.as_deref())
        .bind(personnel.personnel_type.as_str())
        .bind(personnel.notes.as_deref())
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn update(&self, id: i64, patch: &PersonnelPatch) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("update_personnel");
        let result = sqlx::query(
            r#"
            UPDATE personnel
            SET
                location_id = COALESCE($2, location_id),
                name = COALESCE($3, name),
                role = CASE WHEN $4::boolean THEN $5 ELSE role END,
                phone = CASE WHEN $6::boolean THEN $7 ELSE phone END,
                email = CASE WHEN $8::boolean THEN $9 ELSE email END,
                personnel_type = COALESCE($10, personnel_type),
                notes = CASE WHEN $11::boolean THEN $12 ELSE notes END,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(patch.location_id)
        .bind(patch.name.as_deref())
        .bind(patch.role.is_some())
        .bind(patch.role.clone().flatten())
        .bind(patch.phone.is_some())
        .bind(patch.phone.clone().flatten())
        .bind(patch.email.is_some())
        .bind(patch.email.clone().flatten())
        .bind(patch.personnel_type.map(|t| t.as_str()))
        .bind(patch.notes.is_some())
        .bind(patch.notes.clone().flatten())
        .execute(&self.pool)
        .await;
        timer.record();
        Ok(result?.rows_affected())
    }

    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_personnel");
        let result = sqlx::query("DELETE FROM personnel WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected() > 0)
    }
}

#[async_trait]
impl PersonnelStore for PersonnelRepository {
    async fn list_by_location(&self, location_id: i64) -> Result<Vec<Personnel>, DomainError> {
        let entities = PersonnelRepository::list_by_location(self, location_id)
            .await
            .map_err(|e| map_sqlx_error("list_personnel_by_location", e))?;
        Ok(entities.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Personnel>, DomainError> {
        let entity = PersonnelRepository::find_by_id(self, id)
            .await
            .map_err(|e| map_sqlx_error("find_personnel_by_id", e))?;
        Ok(entity.map(Into::into))
    }

    async fn insert(&self, personnel: NewPersonnel) -> Result<i64, DomainError> {
        PersonnelRepository::insert(self, &personnel)
            .await
            .map_err(|e| map_sqlx_error("insert_personnel", e))
    }

    async fn update(&self, id: i64, patch: PersonnelPatch) -> Result<bool, DomainError> {
        let affected = PersonnelRepository::update(self, id, &patch)
            .await
            .map_err(|e| map_sqlx_error("update_personnel", e))?;
        Ok(affected > 0)
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        PersonnelRepository::delete(self, id)
            .await
            .map_err(|e| map_sqlx_error("delete_personnel", e))
    }
}
