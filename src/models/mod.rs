pub mod company;
pub mod job;
pub mod user;

use thiserror::Error;

use crate::sql::SqlBuildError;

/// Errors from the data-access layer.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Duplicate(String),

    #[error("Invalid username/password")]
    InvalidCredentials,

    #[error(transparent)]
    Build(#[from] SqlBuildError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error("Password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}
