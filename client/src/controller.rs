//! Controller - owns the session state and turns intents into frames.
//!
//! The controller holds the [`BookStore`] and [`ViewState`] that the
//! presentation layer would otherwise keep in globals. Every intent ends
//! with the projection being recomputed into a [`Frame`].

use crate::api::BooksApi;
use crate::error::Result;
use crate::sync::{RemoteSync, SyncOutcome, SyncStatus};
use serde::Serialize;
use shelf_engine::{
    project, Book, BookDraft, BookId, BookStore, Intent, PageNumber, SortKey, ViewState,
};
use tracing::debug;

/// Status line text while the initial load is in flight.
pub const LOADING_MESSAGE: &str = "Loading books\u{2026}";

/// How a notice should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Degraded,
    Loading,
}

/// A message for the status line or a toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn loading() -> Self {
        Self {
            level: NoticeLevel::Loading,
            message: LOADING_MESSAGE.to_string(),
        }
    }

    fn from_outcome<T>(outcome: &SyncOutcome<T>) -> Self {
        let level = match outcome.status {
            SyncStatus::Ok => NoticeLevel::Success,
            SyncStatus::Degraded => NoticeLevel::Degraded,
        };
        Self {
            level,
            message: outcome.message.clone(),
        }
    }
}

/// Everything the presentation layer needs after a recomputation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    /// Books on the current page
    pub items: Vec<Book>,
    pub page: PageNumber,
    pub total_pages: PageNumber,
    pub filtered_count: usize,
    /// Persistent status line (loading, or demo-data warning)
    pub status: Option<Notice>,
    /// One-shot message from the last mutation
    pub toast: Option<Notice>,
}

/// Owns the book store and view state for one session.
#[derive(Debug)]
pub struct Controller<A> {
    sync: RemoteSync<A>,
    store: BookStore,
    view: ViewState,
    default_page_size: u32,
    status: Option<Notice>,
    toast: Option<Notice>,
}

impl<A: BooksApi> Controller<A> {
    /// Create a controller with an empty store.
    pub fn new(sync: RemoteSync<A>, default_page_size: u32) -> Self {
        let view = ViewState::with_page_size(default_page_size);
        Self {
            sync,
            store: BookStore::new(),
            default_page_size: view.page_size,
            view,
            status: None,
            toast: None,
        }
    }

    pub fn store(&self) -> &BookStore {
        &self.store
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn sync(&self) -> &RemoteSync<A> {
        &self.sync
    }

    /// Look up a book, e.g. to prefill an edit form.
    pub fn book(&self, id: BookId) -> Option<&Book> {
        self.store.get(id)
    }

    /// Show the loading status line. Called before [`Controller::load`].
    pub fn mark_loading(&mut self) -> Frame {
        self.status = Some(Notice::loading());
        self.frame()
    }

    /// Load every book from the backend, or the demo data if unreachable.
    pub async fn load(&mut self) -> Frame {
        self.status = Some(Notice::loading());
        let outcome = self.sync.load().await;
        self.status = match outcome.status {
            SyncStatus::Ok => None,
            SyncStatus::Degraded => Some(Notice::from_outcome(&outcome)),
        };
        self.store.apply(outcome.change);
        self.frame()
    }

    /// Handle any intent.
    pub async fn dispatch(&mut self, intent: Intent) -> Result<Frame> {
        debug!("Dispatching {:?}", intent);
        match intent {
            Intent::RequestCreate { draft } => {
                self.request_create(&draft.title, &draft.author).await
            }
            Intent::RequestUpdate { id, draft } => {
                self.request_update(id, &draft.title, &draft.author).await
            }
            Intent::RequestDelete { id } => Ok(self.request_delete(id).await),
            Intent::Reset => Ok(self.reset()),
            view_intent => {
                view_intent.apply_to_view(&mut self.view);
                Ok(self.frame())
            }
        }
    }

    pub fn search(&mut self, text: &str) -> Frame {
        self.view.search(text);
        self.frame()
    }

    pub fn clear_search(&mut self) -> Frame {
        self.view.clear_search();
        self.frame()
    }

    pub fn set_sort(&mut self, sort: SortKey) -> Frame {
        self.view.set_sort(sort);
        self.frame()
    }

    pub fn set_page(&mut self, page: PageNumber) -> Frame {
        self.view.set_page(page);
        self.frame()
    }

    pub fn set_page_size(&mut self, page_size: u32) -> Frame {
        self.view.set_page_size(page_size);
        self.frame()
    }

    /// Restore the default query, sort and page, and the configured page size.
    pub fn reset(&mut self) -> Frame {
        self.view = ViewState::with_page_size(self.default_page_size);
        self.frame()
    }

    /// Validate and create a book. Invalid input never reaches the backend.
    pub async fn request_create(&mut self, title: &str, author: &str) -> Result<Frame> {
        let draft = BookDraft::new(title, author).validate()?;
        let outcome = self.sync.create(draft).await;
        Ok(self.apply(outcome))
    }

    /// Validate and update a book. Invalid input never reaches the backend.
    pub async fn request_update(&mut self, id: BookId, title: &str, author: &str) -> Result<Frame> {
        let draft = BookDraft::new(title, author).validate()?;
        let outcome = self.sync.update(id, draft).await;
        Ok(self.apply(outcome))
    }

    /// Delete a book.
    pub async fn request_delete(&mut self, id: BookId) -> Frame {
        let outcome = self.sync.delete(id).await;
        self.apply(outcome)
    }

    /// Apply an outcome obtained directly from [`Controller::sync`].
    ///
    /// Outcomes are applied in the order they are handed in.
    pub fn apply<T>(&mut self, outcome: SyncOutcome<T>) -> Frame {
        self.toast = Some(Notice::from_outcome(&outcome));
        debug!("Applying {} change", outcome.change.kind());
        self.store.apply(outcome.change);
        self.frame()
    }

    /// Recompute the projection.
    ///
    /// The clamped page is written back into the view state, and any
    /// pending toast is handed out exactly once.
    pub fn frame(&mut self) -> Frame {
        let projection = project(self.store.as_slice(), &self.view);
        self.view.page = projection.page;

        Frame {
            items: projection.to_owned_items(),
            page: projection.page,
            total_pages: projection.total_pages,
            filtered_count: projection.filtered_count,
            status: self.status.clone(),
            toast: self.toast.take(),
        }
    }
}
