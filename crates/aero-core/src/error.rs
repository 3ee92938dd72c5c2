//! Centralized error types for aero domain logic.

use thiserror::Error;

/// Main error type for mapping operations.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Database error: {0}")]
    Database(#[from] aero_db::DbError),
}

/// Result type for mapping operations.
pub type CoreResult<T> = Result<T, CoreError>;
