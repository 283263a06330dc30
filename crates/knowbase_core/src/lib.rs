//! Core domain logic for knowbase.
//! This crate owns the knowledge store contract and document extraction.

pub mod extract;
pub mod faq;
pub mod logging;
pub mod model;
pub mod preview;
pub mod repo;
pub mod search;
pub mod service;

pub use extract::document::{
    extract_text, extract_text_for_mime, DocumentKind, ExtractError, PDF_MIME, PLAIN_TEXT_MIME,
};
pub use faq::{faq_items, FaqItem};
pub use logging::{default_log_level, init_logging, LoggingError};
pub use model::entry::{Entry, EntryValidationError};
pub use preview::derive_preview;
pub use repo::entry_repo::{EntryRepository, JsonFileEntryRepository, RepoError, RepoResult};
pub use search::keyword::{search_entries, search_with_query, SearchQuery};
pub use service::knowledge_store::{
    KnowledgeStore, StoreConfig, StoreError, DEFAULT_BACKING_FILE,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
