//! Translation of driver errors into domain errors.
//!
//! Storage failures are always surfaced; nothing here turns an error into
//! an empty result.

use domain::DomainError;

/// PostgreSQL `foreign_key_violation`.
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Maps a `sqlx` error raised while running `operation`.
pub fn map_sqlx_error(operation: &str, err: sqlx::Error) -> DomainError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.code().as_deref() == Some(FOREIGN_KEY_VIOLATION) {
            tracing::warn!(operation, error = %db_err, "Foreign key violation");
            return DomainError::InvalidReference(db_err.message().to_string());
        }
    }

    tracing::error!(operation, error = %err, "Database operation failed");
    DomainError::StorageUnavailable(format!("{} failed: {}", operation, err))
}
