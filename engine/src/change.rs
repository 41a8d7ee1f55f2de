//! Change values describing store mutations.
//!
//! The client never mutates the store while a request is in flight. It
//! computes a [`Change`] from the response (or from the fallback path) and
//! hands it to [`crate::BookStore::apply`] when the request resolves.

use crate::{Book, BookId};
use serde::{Deserialize, Serialize};

/// A mutation that can be applied to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Change {
    /// Replace the whole collection
    Load { books: Vec<Book> },
    /// Append a record
    Insert { book: Book },
    /// Replace the record with `id`
    Replace { id: BookId, book: Book },
    /// Remove the record with `id`
    Remove { id: BookId },
}

impl Change {
    /// The record id this change targets, if it targets a single record.
    pub fn book_id(&self) -> Option<BookId> {
        match self {
            Change::Load { .. } => None,
            Change::Insert { book } => Some(book.id),
            Change::Replace { id, .. } => Some(*id),
            Change::Remove { id } => Some(*id),
        }
    }

    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Change::Load { .. } => "load",
            Change::Insert { .. } => "insert",
            Change::Replace { .. } => "replace",
            Change::Remove { .. } => "remove",
        }
    }
}
