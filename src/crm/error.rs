/// Storage and validation errors for CRM records

use thiserror::Error;

/// Input rejected before it reaches the database
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("invalid reference: {0}")]
    InvalidReference(String),
    #[error(transparent)]
    Database(sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if db.is_unique_violation() {
                return StoreError::Conflict(db.message().to_string());
            }
            if db.is_foreign_key_violation() {
                return StoreError::InvalidReference(db.message().to_string());
            }
        }
        StoreError::Database(err)
    }
}

impl StoreError {
    /// Re-read a delete failure: a foreign key hit there means "still in use"
    pub fn on_delete(self, what: &str) -> Self {
        match self {
            StoreError::InvalidReference(_) => {
                StoreError::Conflict(format!("{what} is still referenced"))
            }
            other => other,
        }
    }
}
