//! Case-insensitive substring search over entries.
//!
//! # Responsibility
//! - Match a query against entry title and content.
//! - Return owned copies in original collection order.
//!
//! # Invariants
//! - Results never reorder the collection; there is no ranking.
//! - An empty query matches every entry.
//! - Search never mutates its input.

use crate::model::entry::Entry;

/// Search options for keyword lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// User query text, matched verbatim after case folding.
    pub text: String,
    /// Maximum number of hits to return; `None` returns all hits.
    pub limit: Option<usize>,
}

impl SearchQuery {
    /// Creates an unlimited query.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            limit: None,
        }
    }

    /// Caps the number of returned hits.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Returns every entry whose title or content contains `query`.
///
/// Matching is case-insensitive and uses Unicode lowercasing on both sides.
pub fn search_entries(entries: &[Entry], query: &str) -> Vec<Entry> {
    search_with_query(entries, &SearchQuery::new(query))
}

/// Runs a [`SearchQuery`], applying its optional hit limit.
pub fn search_with_query(entries: &[Entry], query: &SearchQuery) -> Vec<Entry> {
    let needle = query.text.to_lowercase();
    let hits = entries.iter().filter(|entry| entry.matches(&needle));
    match query.limit {
        Some(limit) => hits.take(limit).cloned().collect(),
        None => hits.cloned().collect(),
    }
}
