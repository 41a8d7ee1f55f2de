//! The fallback dataset shown when the backend cannot be reached at load time.

use crate::Book;

/// Ten placeholder books, ids 1 through 10.
pub fn demo_books() -> Vec<Book> {
    vec![
        Book::new(1, "The Pragmatic Programmer", "Andrew Hunt"),
        Book::new(2, "Clean Code", "Robert C. Martin"),
        Book::new(3, "You Don\u{2019}t Know JS", "Kyle Simpson"),
        Book::new(4, "Eloquent JavaScript", "Marijn Haverbeke"),
        Book::new(5, "Design Patterns", "Erich Gamma"),
        Book::new(6, "Refactoring", "Martin Fowler"),
        Book::new(7, "The Hobbit", "J.R.R. Tolkien"),
        Book::new(8, "1984", "George Orwell"),
        Book::new(9, "The Clean Coder", "Robert C. Martin"),
        Book::new(10, "Cracking the Coding Interview", "Gayle Laakmann McDowell"),
    ]
}
