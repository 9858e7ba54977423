//! Database connectivity probe.

use async_trait::async_trait;
use domain::store::StoreHealth;
use domain::DomainError;
use sqlx::PgPool;

use crate::error::map_sqlx_error;
use crate::metrics::{record_pool_metrics, QueryTimer};

/// Health probe backed by the shared pool.
#[derive(Clone)]
pub struct PostgresHealth {
    pool: PgPool,
}

impl PostgresHealth {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StoreHealth for PostgresHealth {
    async fn ping(&self) -> Result<(), DomainError> {
        let timer = QueryTimer::new("health_check");
        let result = sqlx::query("SELECT 1").execute(&self.pool).await;
        timer.record();
        record_pool_metrics(&self.pool);
        result
            .map(|_| ())
            .map_err(|e| map_sqlx_error("health_check", e))
    }
}
