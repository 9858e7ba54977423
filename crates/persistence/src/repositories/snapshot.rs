//! Assignment snapshot repository for database operations.

use async_trait::async_trait;
use domain::models::snapshot::{AssignmentSnapshot, SnapshotPayload};
use domain::store::SnapshotStore;
use domain::DomainError;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::entities::SnapshotEntity;
use crate::error::map_sqlx_error;
use crate::metrics::QueryTimer;

/// Repository for assignment snapshots. Rows are never updated.
#[derive(Clone)]
pub struct SnapshotRepository {
    pool: PgPool,
}

impl SnapshotRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store a snapshot under `token`.
    pub async fn insert(
        &self,
        token: &str,
        payload: &SnapshotPayload,
    ) -> Result<SnapshotEntity, sqlx::Error> {
        let timer = QueryTimer::new("insert_snapshot");
        let result = sqlx::query_as::<_, SnapshotEntity>(
            r#"
            INSERT INTO assignment_snapshots (token, data, locations)
            VALUES ($1, $2, $3)
            RETURNING id, token, data, locations, created_at
            "#,
        )
        .bind(token)
        .bind(Json(&payload.assignments))
        .bind(payload.locations.as_ref().map(Json))
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a snapshot by its share token.
    pub async fn find_by_token(&self, token: &str) -> Result<Option<SnapshotEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_snapshot_by_token");
        let result = sqlx::query_as::<_, SnapshotEntity>(
            r#"
            SELECT id, token, data, locations, created_at
            FROM assignment_snapshots
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }
}

#[async_trait]
impl SnapshotStore for SnapshotRepository {
    async fn insert(
        &self,
        token: &str,
        payload: SnapshotPayload,
    ) -> Result<AssignmentSnapshot, DomainError> {
        let entity = SnapshotRepository::insert(self, token, &payload)
            .await
            .map_err(|e| map_sqlx_error("insert_snapshot", e))?;
        Ok(entity.into())
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<AssignmentSnapshot>, DomainError> {
        let entity = SnapshotRepository::find_by_token(self, token)
            .await
            .map_err(|e| map_sqlx_error("find_snapshot_by_token", e))?;
        Ok(entity.map(Into::into))
    }
}
