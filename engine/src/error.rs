//! Error types for the Shelf engine.

use crate::book::FieldErrors;
use thiserror::Error;

/// All possible errors from the Shelf engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    // Validation errors
    #[error("invalid book: {0}")]
    InvalidBook(FieldErrors),

    // Parse errors
    #[error("unknown sort key: {0}")]
    UnknownSortKey(String),

    #[error("unknown sort field: {0}")]
    UnknownSortField(String),

    #[error("unknown sort direction: {0}")]
    UnknownDirection(String),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
