//! Knowledge entry record.
//!
//! # Responsibility
//! - Define the canonical `{title, content}` record.
//! - Provide validation and keyword matching helpers.
//!
//! # Invariants
//! - A persisted entry always has non-empty `title` and `content`.
//! - Serialized shape is a two-field object with no extra metadata.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One title/content pair held by the knowledge store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Short heading shown in listings.
    pub title: String,
    /// Free-form body, usually markdown.
    pub content: String,
}

/// Field-level validation failure for [`Entry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryValidationError {
    EmptyTitle,
    EmptyContent,
}

impl Display for EntryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "entry title must not be empty"),
            Self::EmptyContent => write!(f, "entry content must not be empty"),
        }
    }
}

impl Error for EntryValidationError {}

impl Entry {
    /// Creates an entry without validating it.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Checks that both fields are present.
    ///
    /// Only zero-length values are rejected; whitespace-only text is kept
    /// as-is.
    pub fn validate(&self) -> Result<(), EntryValidationError> {
        if self.title.is_empty() {
            return Err(EntryValidationError::EmptyTitle);
        }
        if self.content.is_empty() {
            return Err(EntryValidationError::EmptyContent);
        }
        Ok(())
    }

    /// Returns whether `needle` occurs in the lowercased title or content.
    ///
    /// `needle` must already be lowercased by the caller.
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.content.to_lowercase().contains(needle)
    }
}
