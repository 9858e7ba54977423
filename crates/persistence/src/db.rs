//! Database connection pool management.
//!
//! The pool is created once at process start and handed to every
//! repository.

use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use sqlx::migrate::Migrator;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::PgPool;

/// Ordered, forward-only schema migrations tracked in `_sqlx_migrations`.
pub static MIGRATOR: Migrator = sqlx::migrate!("./src/migrations");

/// Database configuration.
///
/// Either `url` or the discrete `host`/`name` fields must be set. When both
/// are present the URL wins.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub user: String,

    #[serde(default)]
    pub password: String,

    /// libpq `sslmode`; `disable` turns TLS off for local development.
    #[serde(default)]
    pub tls_mode: Option<String>,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
}

fn default_port() -> u16 {
    5432
}
fn default_max_connections() -> u32 {
    20
}
fn default_min_connections() -> u32 {
    1
}
fn default_connect_timeout() -> u64 {
    10
}
fn default_idle_timeout() -> u64 {
    600
}

impl DatabaseConfig {
    /// Returns true when enough is set to open a connection.
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty() || (!self.host.is_empty() && !self.name.is_empty())
    }

    /// Builds connection options from the URL or the discrete fields.
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        let mut options = if self.url.is_empty() {
            let mut options = PgConnectOptions::new()
                .host(&self.host)
                .port(self.port)
                .database(&self.name);
            if !self.user.is_empty() {
                options = options.username(&self.user);
            }
            if !self.password.is_empty() {
                options = options.password(&self.password);
            }
            options
        } else {
            PgConnectOptions::from_str(&self.url)?
        };

        if let Some(mode) = self.tls_mode.as_deref().filter(|m| !m.is_empty()) {
            options = options.ssl_mode(PgSslMode::from_str(mode)?);
        }

        Ok(options)
    }
}

/// Creates a PostgreSQL connection pool with the given configuration.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .connect_with(config.connect_options()?)
        .await
}

/// Applies pending migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}
