//! Text collation for title and author sorting.
//!
//! Uses the Unicode Collation Algorithm with the CLDR root tailoring.
//! Accents and case only break ties between strings that are otherwise
//! equal, lowercase sorts before uppercase, and punctuation is
//! non-ignorable, so `’Salem's Lot` sorts ahead of any letter.

use feruca::{Collator, Locale, Tailoring};
use std::cmp::Ordering;

/// A reusable collator for sorting many strings.
pub struct Collation {
    collator: Collator,
}

impl Collation {
    pub fn new() -> Self {
        Self {
            collator: Collator::new(Tailoring::Cldr(Locale::Root), false, true),
        }
    }

    pub fn compare(&mut self, a: &str, b: &str) -> Ordering {
        self.collator.collate(a, b)
    }
}

impl Default for Collation {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Collation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Collation(root)")
    }
}

/// Compare two strings in root-locale order.
///
/// Builds a fresh collator per call; use [`Collation`] when sorting.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    Collation::new().compare(a, b)
}
