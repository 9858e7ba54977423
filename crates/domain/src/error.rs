//! Domain error taxonomy.

use thiserror::Error;

/// Errors produced by domain services and storage implementations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Malformed input, detected before any storage access.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The referenced id or token does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A personnel record points at a location that does not exist.
    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    /// The underlying storage could not complete the operation.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Secure token generation failed.
    #[error("Randomness failure: {0}")]
    RandomnessFailure(String),
}

impl DomainError {
    /// Builds a validation error from `validator` output.
    ///
    /// Messages are flattened into `field: message` pairs.
    pub fn from_validation(errors: &validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |err| {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string());
                    format!("{}: {}", field, message)
                })
            })
            .collect();
        messages.sort();
        DomainError::Validation(messages.join(", "))
    }

    /// Builds a validation error for a single field.
    pub fn invalid_field(field: &str, err: validator::ValidationError) -> Self {
        let message = err
            .message
            .map(|m| m.to_string())
            .unwrap_or_else(|| err.code.to_string());
        DomainError::Validation(format!("{}: {}", field, message))
    }
}

impl From<shared::crypto::RandomnessError> for DomainError {
    fn from(err: shared::crypto::RandomnessError) -> Self {
        DomainError::RandomnessFailure(err.to_string())
    }
}
