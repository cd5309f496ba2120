use thiserror::Error;

use crate::document::Collection;
use crate::query::QueryError;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Malformed document: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("{} not found", .0.singular())]
    NotFound(Collection),

    #[error("{0}")]
    InvalidIdentifier(String),

    #[error("{0}")]
    Validation(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Credential error: {0}")]
    Credentials(String),

    #[error("Invalid credentials")]
    InvalidCredentials,
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23505")
        )
    }

    /// Whether the database rejected the write on the named constraint.
    pub fn violates(&self, constraint: &str) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.constraint() == Some(constraint)
        )
    }
}
