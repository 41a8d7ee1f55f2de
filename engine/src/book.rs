//! Book records and the validation applied before they are submitted.

use crate::{error::Result, BookId, Error};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum title length, counted in characters after trimming.
pub const MIN_TITLE_LEN: usize = 2;

/// Minimum author length, counted in characters after trimming.
pub const MIN_AUTHOR_LEN: usize = 3;

/// A book record in the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Book {
    /// Unique identifier, server-assigned or synthesized locally
    pub id: BookId,
    /// Book title
    pub title: String,
    /// Book author
    pub author: String,
}

impl Book {
    /// Create a new book record.
    pub fn new(id: BookId, title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
        }
    }

    /// Build a record from a draft and an id.
    pub fn from_draft(id: BookId, draft: BookDraft) -> Self {
        Self {
            id,
            title: draft.title,
            author: draft.author,
        }
    }

    /// Whether the lowercased needle occurs in the title or author.
    ///
    /// The needle must already be trimmed and lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.title.to_lowercase().contains(needle)
            || self.author.to_lowercase().contains(needle)
    }
}

/// The user-editable part of a book, as submitted by the add/edit form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
}

impl BookDraft {
    /// Create a draft from raw form input.
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
        }
    }

    /// Trim both fields and check their minimum lengths.
    ///
    /// Returns the trimmed draft, or every failing field at once.
    pub fn validate(self) -> Result<Self> {
        let title = self.title.trim().to_string();
        let author = self.author.trim().to_string();

        let mut errors = FieldErrors::default();
        if title.chars().count() < MIN_TITLE_LEN {
            errors.title = Some(format!(
                "Title must be at least {} characters",
                MIN_TITLE_LEN
            ));
        }
        if author.chars().count() < MIN_AUTHOR_LEN {
            errors.author = Some(format!(
                "Author must be at least {} characters",
                MIN_AUTHOR_LEN
            ));
        }

        if errors.is_empty() {
            Ok(Self { title, author })
        } else {
            Err(Error::InvalidBook(errors))
        }
    }
}

/// Per-field validation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl FieldErrors {
    /// True when no field failed.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::with_capacity(2);
        if let Some(msg) = &self.title {
            parts.push(format!("title: {}", msg));
        }
        if let Some(msg) = &self.author {
            parts.push(format!("author: {}", msg));
        }
        write!(f, "{}", parts.join("; "))
    }
}
