//! Unified error handling for the client.

use crate::config::ConfigError;

/// Why a backend call did not produce a usable response.
///
/// Every variant means the same thing to the sync adapter: the remote
/// operation is unavailable and the local fallback applies. The variants
/// only exist so logs can say what went wrong.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{method} {path} returned {status}")]
    Status {
        method: &'static str,
        path: String,
        status: reqwest::StatusCode,
    },

    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Engine(#[from] shelf_engine::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("No book with id {0}")]
    NotFound(shelf_engine::BookId),
}

impl Error {
    /// Per-field validation messages, if this is a rejected book.
    pub fn field_errors(&self) -> Option<&shelf_engine::FieldErrors> {
        match self {
            Error::Engine(shelf_engine::Error::InvalidBook(fields)) => Some(fields),
            _ => None,
        }
    }
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, Error>;
