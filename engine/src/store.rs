//! Store - the in-memory book collection.
//!
//! The store holds every book for the current session in load/insertion
//! order. All mutations are total: they never fail, and none of them can
//! leave two records with the same id.

use crate::{Book, BookId, Change};
use serde::{Deserialize, Serialize};

/// The ordered collection of books.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Book>", into = "Vec<Book>")]
pub struct BookStore {
    books: Vec<Book>,
}

impl BookStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self { books: Vec::new() }
    }

    /// Replace the whole collection.
    ///
    /// Repeated ids keep the position of their first occurrence and the
    /// value of their last.
    pub fn load(&mut self, books: impl IntoIterator<Item = Book>) {
        self.books.clear();
        for book in books {
            self.insert(book);
        }
    }

    /// Append a record, or overwrite in place if its id is already present.
    pub fn insert(&mut self, book: Book) {
        match self.position(book.id) {
            Some(idx) => self.books[idx] = book,
            None => self.books.push(book),
        }
    }

    /// Replace the record with `id`. Does nothing if `id` is absent.
    ///
    /// If the new record carries a different id that belongs to another
    /// record, that other record is dropped.
    pub fn replace(&mut self, id: BookId, book: Book) {
        let Some(idx) = self.position(id) else {
            return;
        };
        let new_id = book.id;
        self.books[idx] = book;
        if new_id != id {
            let mut pos = 0;
            self.books.retain(|b| {
                let keep = pos == idx || b.id != new_id;
                pos += 1;
                keep
            });
        }
    }

    /// Remove the record with `id`. Does nothing if `id` is absent.
    pub fn remove(&mut self, id: BookId) {
        self.books.retain(|b| b.id != id);
    }

    /// Apply a change computed by the sync adapter.
    pub fn apply(&mut self, change: Change) {
        match change {
            Change::Load { books } => self.load(books),
            Change::Insert { book } => self.insert(book),
            Change::Replace { id, book } => self.replace(id, book),
            Change::Remove { id } => self.remove(id),
        }
    }

    /// Get a record by id.
    pub fn get(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    /// Check if a record exists.
    pub fn contains(&self, id: BookId) -> bool {
        self.position(id).is_some()
    }

    /// All records in store order.
    pub fn as_slice(&self) -> &[Book] {
        &self.books
    }

    /// Iterate records in store order.
    pub fn iter(&self) -> impl Iterator<Item = &Book> {
        self.books.iter()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Check if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    fn position(&self, id: BookId) -> Option<usize> {
        self.books.iter().position(|b| b.id == id)
    }
}

impl From<Vec<Book>> for BookStore {
    fn from(books: Vec<Book>) -> Self {
        let mut store = Self::new();
        store.load(books);
        store
    }
}

impl From<BookStore> for Vec<Book> {
    fn from(store: BookStore) -> Self {
        store.books
    }
}
