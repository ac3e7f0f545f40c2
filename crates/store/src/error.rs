//! Store error model.

use thiserror::Error;

use dishstock_auth::PasswordError;
use dishstock_core::DomainError;

/// Result type used across the data-access layer.
pub type StoreResult<T> = Result<T, StoreError>;

/// Failure in the data-access layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A domain rule rejected the operation (validation, insufficient stock,
    /// not found, conflict).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The underlying database failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored credential could not be hashed or verified.
    #[error("credential error: {0}")]
    Credential(#[from] PasswordError),
}
