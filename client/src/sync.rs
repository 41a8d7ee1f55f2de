//! Remote sync adapter.
//!
//! Each operation makes exactly one backend call. Whatever happens, the
//! result carries a [`Change`] for the store: the server's version on
//! success, or a locally built one when the call failed. Nothing is
//! retried and no operation fails outright.
//!
//! Operations take `&self` and never touch the store, so several can be in
//! flight at once. The caller applies each outcome's change when it
//! resolves; on conflicting updates the last one applied wins.

use crate::api::BooksApi;
use serde::Serialize;
use shelf_engine::{demo_books, Book, BookDraft, BookId, BookStore, Change};
use tracing::{info, warn};

/// Source of ids for books created while the backend is unreachable.
pub type IdClock = fn() -> BookId;

/// Current wall-clock time in milliseconds.
///
/// Two fallback creates within the same millisecond get the same id.
pub fn millis_now() -> BookId {
    chrono::Utc::now().timestamp_millis()
}

/// Whether the backend confirmed the operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    /// The backend accepted the operation
    Ok,
    /// Applied locally only; the backend was unreachable or refused
    Degraded,
}

/// Result of a sync operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncOutcome<T> {
    pub status: SyncStatus,
    /// The record(s) the operation produced
    pub data: T,
    /// Human-readable summary for the status line or toast
    pub message: String,
    /// Store mutation to apply when this outcome is handled
    pub change: Change,
}

impl<T> SyncOutcome<T> {
    fn ok(data: T, message: impl Into<String>, change: Change) -> Self {
        Self {
            status: SyncStatus::Ok,
            data,
            message: message.into(),
            change,
        }
    }

    fn degraded(data: T, message: impl Into<String>, change: Change) -> Self {
        Self {
            status: SyncStatus::Degraded,
            data,
            message: message.into(),
            change,
        }
    }

    /// True if the operation was applied locally only.
    pub fn is_degraded(&self) -> bool {
        self.status == SyncStatus::Degraded
    }

    /// Apply this outcome's change to `store` and hand back the data.
    pub fn apply_to(self, store: &mut BookStore) -> T {
        store.apply(self.change);
        self.data
    }
}

/// Bridges user-requested mutations to the backend.
#[derive(Debug, Clone)]
pub struct RemoteSync<A> {
    api: A,
    id_clock: IdClock,
}

impl<A: BooksApi> RemoteSync<A> {
    /// Create an adapter that synthesizes fallback ids from the wall clock.
    pub fn new(api: A) -> Self {
        Self {
            api,
            id_clock: millis_now,
        }
    }

    /// Replace the fallback id source.
    pub fn with_id_clock(mut self, id_clock: IdClock) -> Self {
        self.id_clock = id_clock;
        self
    }

    /// The underlying API.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Fetch every book. Falls back to the demo dataset.
    pub async fn load(&self) -> SyncOutcome<Vec<Book>> {
        match self.api.list().await {
            Ok(books) => {
                info!("Loaded {} books from {}", books.len(), self.api.base_url());
                SyncOutcome::ok(
                    books.clone(),
                    String::new(),
                    Change::Load { books },
                )
            }
            Err(e) => {
                warn!("API unreachable, using demo data: {}", e);
                let books = demo_books();
                SyncOutcome::degraded(
                    books.clone(),
                    format!(
                        "Using demo data (API unreachable). Start your backend at {} to enable live CRUD.",
                        self.api.base_url()
                    ),
                    Change::Load { books },
                )
            }
        }
    }

    /// Create a book. Falls back to a locally numbered record.
    ///
    /// `draft` is sent as given; validate it first.
    pub async fn create(&self, draft: BookDraft) -> SyncOutcome<Book> {
        match self.api.create(&draft).await {
            Ok(book) => {
                info!("Created book {}", book.id);
                SyncOutcome::ok(
                    book.clone(),
                    "Book added",
                    Change::Insert { book },
                )
            }
            Err(e) => {
                let book = Book::from_draft((self.id_clock)(), draft);
                warn!("Create failed, adding book {} locally: {}", book.id, e);
                SyncOutcome::degraded(
                    book.clone(),
                    "Book added locally (API unreachable)",
                    Change::Insert { book },
                )
            }
        }
    }

    /// Update a book. Falls back to the locally supplied values.
    ///
    /// On success the record matching the *returned* id is replaced.
    pub async fn update(&self, id: BookId, draft: BookDraft) -> SyncOutcome<Book> {
        let local = Book::from_draft(id, draft);
        match self.api.update(&local).await {
            Ok(book) => {
                info!("Updated book {}", book.id);
                SyncOutcome::ok(
                    book.clone(),
                    "Book updated",
                    Change::Replace { id: book.id, book },
                )
            }
            Err(e) => {
                warn!("Update of book {} failed, applying locally: {}", id, e);
                SyncOutcome::degraded(
                    local.clone(),
                    "Book updated locally (API unreachable)",
                    Change::Replace { id, book: local },
                )
            }
        }
    }

    /// Delete a book. The record is removed locally either way.
    pub async fn delete(&self, id: BookId) -> SyncOutcome<BookId> {
        match self.api.delete(id).await {
            Ok(()) => {
                info!("Deleted book {}", id);
                SyncOutcome::ok(id, "Book deleted", Change::Remove { id })
            }
            Err(e) => {
                warn!("Delete of book {} failed, removing locally: {}", id, e);
                SyncOutcome::degraded(
                    id,
                    "Book deleted locally (API unreachable)",
                    Change::Remove { id },
                )
            }
        }
    }
}
