//! Projection of the store through a view state.
//!
//! # Algorithm
//!
//! 1. Filter by the trimmed, lowercased query against title and author
//! 2. Stable-sort by the view's sort key
//! 3. Clamp the page to `[1, total_pages]` and slice it out
//!
//! The projection borrows from the store and never mutates anything.

use crate::{collate::Collation, Book, Direction, PageNumber, SortField, SortKey, ViewState};
use std::cmp::Ordering;

/// One page of books derived from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection<'a> {
    /// Books on the current page, in display order
    pub items: Vec<&'a Book>,
    /// The page actually shown, after clamping
    pub page: PageNumber,
    /// Always at least 1
    pub total_pages: PageNumber,
    /// Books matching the query across all pages
    pub filtered_count: usize,
}

impl Projection<'_> {
    /// True when the current page has nothing to show.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Clone the page's books out of the store borrow.
    pub fn to_owned_items(&self) -> Vec<Book> {
        self.items.iter().map(|b| (*b).clone()).collect()
    }
}

/// Filter, sort and paginate `books` according to `view`.
pub fn project<'a>(books: &'a [Book], view: &ViewState) -> Projection<'a> {
    let mut filtered = filter(books, &view.needle());
    sort(&mut filtered, view.sort);

    let filtered_count = filtered.len();
    let page_size = view.page_size.max(1) as usize;
    let total_pages = filtered_count.div_ceil(page_size).max(1);
    let page = (view.page.max(1) as usize).min(total_pages);

    let start = (page - 1) * page_size;
    let items = filtered.into_iter().skip(start).take(page_size).collect();

    Projection {
        items,
        page: page as PageNumber,
        total_pages: total_pages as PageNumber,
        filtered_count,
    }
}

/// Keep the books whose title or author contains `needle`.
///
/// `needle` must already be trimmed and lowercased; empty keeps everything.
pub fn filter<'a>(books: &'a [Book], needle: &str) -> Vec<&'a Book> {
    books.iter().filter(|b| b.matches(needle)).collect()
}

/// Stable sort by `key`.
pub fn sort(books: &mut [&Book], key: SortKey) {
    let mut collation = Collation::new();
    books.sort_by(|a, b| {
        let ord = compare(&mut collation, a, b, key.field);
        match key.direction {
            Direction::Asc => ord,
            Direction::Desc => ord.reverse(),
        }
    });
}

fn compare(collation: &mut Collation, a: &Book, b: &Book, field: SortField) -> Ordering {
    match field {
        SortField::Id => a.id.cmp(&b.id),
        SortField::Title => collation.compare(&a.title, &b.title),
        SortField::Author => collation.compare(&a.author, &b.author),
    }
}
