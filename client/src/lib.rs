//! Shelf Client - book manager with offline fallback.
//!
//! Talks to a REST backend exposing `/books`, keeps a local
//! [`shelf_engine::BookStore`] in step with it, and keeps working against
//! local state when the backend cannot be reached.

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod render;
pub mod sync;

pub use api::{BooksApi, HttpBooksApi};
pub use config::{Config, ConfigError};
pub use controller::{Controller, Frame, Notice, NoticeLevel};
pub use error::{ApiError, Error, Result};
pub use sync::{RemoteSync, SyncOutcome, SyncStatus};

/// Build a controller wired to the configured HTTP backend.
pub fn connect(config: &Config) -> Result<Controller<HttpBooksApi>> {
    let api = HttpBooksApi::new(config)?;
    Ok(Controller::new(RemoteSync::new(api), config.page_size))
}
