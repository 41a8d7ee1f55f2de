//! Intents raised by the presentation layer.
//!
//! View intents are resolved here against a [`ViewState`]. Mutation intents
//! need the network, so [`Intent::apply_to_view`] leaves them to the caller.

use crate::{BookDraft, BookId, PageNumber, SortKey, ViewState};
use serde::{Deserialize, Serialize};

/// Something the user asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Intent {
    Search { text: String },
    ClearSearch,
    SetSort { sort: SortKey },
    SetPage { page: PageNumber },
    SetPageSize { page_size: u32 },
    Reset,
    RequestCreate { draft: BookDraft },
    RequestUpdate { id: BookId, draft: BookDraft },
    RequestDelete { id: BookId },
}

impl Intent {
    /// Whether this intent changes the store (and so needs the backend).
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Intent::RequestCreate { .. } | Intent::RequestUpdate { .. } | Intent::RequestDelete { .. }
        )
    }

    /// Apply a view intent to `view`.
    ///
    /// Returns `false` without touching `view` for mutation intents.
    pub fn apply_to_view(&self, view: &mut ViewState) -> bool {
        match self {
            Intent::Search { text } => view.search(text.clone()),
            Intent::ClearSearch => view.clear_search(),
            Intent::SetSort { sort } => view.set_sort(*sort),
            Intent::SetPage { page } => view.set_page(*page),
            Intent::SetPageSize { page_size } => view.set_page_size(*page_size),
            Intent::Reset => view.reset(),
            Intent::RequestCreate { .. }
            | Intent::RequestUpdate { .. }
            | Intent::RequestDelete { .. } => return false,
        }
        true
    }
}
