//! View state: what the user is searching for, how the list is sorted,
//! and which page is showing.

use crate::{error::Result, Error, PageNumber};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Page size used until the user picks another one.
pub const DEFAULT_PAGE_SIZE: u32 = 8;

/// Field to sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Id,
    Title,
    Author,
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortField::Id => write!(f, "id"),
            SortField::Title => write!(f, "title"),
            SortField::Author => write!(f, "author"),
        }
    }
}

impl FromStr for SortField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "id" => Ok(SortField::Id),
            "title" => Ok(SortField::Title),
            "author" => Ok(SortField::Author),
            other => Err(Error::UnknownSortField(other.to_string())),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    /// The opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Asc => write!(f, "asc"),
            Direction::Desc => write!(f, "desc"),
        }
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "asc" => Ok(Direction::Asc),
            "desc" => Ok(Direction::Desc),
            other => Err(Error::UnknownDirection(other.to_string())),
        }
    }
}

/// A sort field paired with a direction.
///
/// The textual form is `<field>-<direction>`, e.g. `title-asc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SortKey {
    pub field: SortField,
    pub direction: Direction,
}

impl SortKey {
    pub fn new(field: SortField, direction: Direction) -> Self {
        Self { field, direction }
    }
}

impl Default for SortKey {
    /// Newest first.
    fn default() -> Self {
        Self::new(SortField::Id, Direction::Desc)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.field, self.direction)
    }
}

impl FromStr for SortKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (field, direction) = s
            .split_once('-')
            .ok_or_else(|| Error::UnknownSortKey(s.to_string()))?;
        Ok(Self::new(field.parse()?, direction.parse()?))
    }
}

impl TryFrom<String> for SortKey {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<SortKey> for String {
    fn from(key: SortKey) -> Self {
        key.to_string()
    }
}

/// Current query, sort and page selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    /// Raw search text as typed
    pub query: String,
    pub sort: SortKey,
    /// 1-based page number
    pub page: PageNumber,
    pub page_size: u32,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }
}

impl ViewState {
    /// Default view state with a custom page size (minimum 1).
    pub fn with_page_size(page_size: u32) -> Self {
        Self {
            query: String::new(),
            sort: SortKey::default(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Set the search text and go back to the first page.
    pub fn search(&mut self, text: impl Into<String>) {
        self.query = text.into();
        self.page = 1;
    }

    /// Clear the search text. The page is left alone; projection clamps it.
    pub fn clear_search(&mut self) {
        self.query.clear();
    }

    /// Change the sort order, keeping the current page.
    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
    }

    /// Jump to a page. Page 0 is treated as page 1.
    pub fn set_page(&mut self, page: PageNumber) {
        self.page = page.max(1);
    }

    /// Change the page size and go back to the first page.
    pub fn set_page_size(&mut self, page_size: u32) {
        self.page_size = page_size.max(1);
        self.page = 1;
    }

    /// Restore every default, including the default page size.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The query as used for matching: trimmed and lowercased.
    pub fn needle(&self) -> String {
        self.query.trim().to_lowercase()
    }
}
