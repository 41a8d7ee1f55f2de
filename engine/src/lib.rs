//! # Shelf Engine
//!
//! The IO-free core of the Shelf book manager.
//!
//! This crate holds the book records for a session, the view state the user
//! is looking through, and the projection that turns the two into the page
//! of books that gets rendered. Network access and fallback behavior live in
//! `shelf-client`; everything here is synchronous and deterministic.
//!
//! ## Design Principles
//!
//! - **No IO**: Engine has no knowledge of files, network, or platform
//! - **Total store**: Store mutations never fail and never leave duplicate ids
//! - **Pure projection**: The same store and view state always produce the same page
//!
//! ## Core Concepts
//!
//! ### Books
//!
//! A [`Book`] is an `{id, title, author}` record. Ids are assigned by the
//! backend, or synthesized locally when the backend is unreachable.
//!
//! ### Changes
//!
//! Every store mutation can be expressed as a [`Change`] and applied with
//! [`BookStore::apply`]. The client computes a change while a request is in
//! flight and applies it once the request resolves.
//!
//! ### Projection
//!
//! [`project`] filters by the view query, sorts by the view's [`SortKey`]
//! and slices out the current page.
//!
//! ## Quick Start
//!
//! ```rust
//! use shelf_engine::{demo_books, project, BookStore, ViewState};
//!
//! let mut store = BookStore::new();
//! store.load(demo_books());
//!
//! let mut view = ViewState::default();
//! view.search("clean");
//! view.set_sort("title-asc".parse().unwrap());
//!
//! let projection = project(store.as_slice(), &view);
//! let titles: Vec<_> = projection.items.iter().map(|b| b.title.as_str()).collect();
//! assert_eq!(titles, ["Clean Code", "The Clean Coder"]);
//! ```

pub mod book;
pub mod change;
pub mod collate;
pub mod demo;
pub mod error;
pub mod intent;
pub mod projection;
pub mod store;
pub mod view;

// Re-export main types at crate root
pub use book::{Book, BookDraft, FieldErrors, MIN_AUTHOR_LEN, MIN_TITLE_LEN};
pub use change::Change;
pub use collate::{locale_compare, Collation};
pub use demo::demo_books;
pub use error::Error;
pub use intent::Intent;
pub use projection::{project, Projection};
pub use store::BookStore;
pub use view::{Direction, SortField, SortKey, ViewState, DEFAULT_PAGE_SIZE};

/// Type aliases for clarity
pub type BookId = i64;
pub type PageNumber = u32;
