//! Knowledge store use-case service.
//!
//! # Responsibility
//! - Own the in-memory entry collection for one process.
//! - Mirror every accepted write to the backing repository.
//! - Answer keyword queries from memory only.
//!
//! # Invariants
//! - After a successful `load` or `add`, memory and backing file hold the
//!   same entries in the same order.
//! - A failed `add` leaves the in-memory collection unchanged.
//! - A failed `load` leaves the in-memory collection unchanged.
//! - `search` and `list_all` never touch the backing file.

use crate::model::entry::{Entry, EntryValidationError};
use crate::repo::entry_repo::{EntryRepository, JsonFileEntryRepository, RepoError};
use crate::search::keyword::{search_entries, search_with_query, SearchQuery};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// File name used when no backing path is configured.
pub const DEFAULT_BACKING_FILE: &str = "knowledge_data.json";

/// Service error for knowledge store use-cases.
#[derive(Debug)]
pub enum StoreError {
    /// Required field is missing on add.
    Validation(EntryValidationError),
    /// Backing file exists but cannot be parsed.
    CorruptState(RepoError),
    /// Backing file cannot be read or written.
    Persistence(RepoError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "invalid entry: {err}"),
            Self::CorruptState(err) => write!(f, "{err}"),
            Self::Persistence(err) => write!(f, "failed to persist entries: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::CorruptState(err) => Some(err),
            Self::Persistence(err) => Some(err),
        }
    }
}

impl From<EntryValidationError> for StoreError {
    fn from(value: EntryValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        match value {
            err @ RepoError::CorruptState { .. } => Self::CorruptState(err),
            err @ RepoError::Io { .. } => Self::Persistence(err),
        }
    }
}

/// Startup configuration for a file-backed store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Backing file holding the serialized collection.
    pub backing_path: PathBuf,
}

impl StoreConfig {
    pub fn new(backing_path: impl Into<PathBuf>) -> Self {
        Self {
            backing_path: backing_path.into(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BACKING_FILE)
    }
}

/// In-memory entry collection mirrored to a repository.
pub struct KnowledgeStore<R: EntryRepository> {
    repo: R,
    entries: Vec<Entry>,
}

impl KnowledgeStore<JsonFileEntryRepository> {
    /// Opens a JSON-file-backed store and loads its current contents.
    ///
    /// # Errors
    /// - `StoreError::CorruptState` when the backing file is unparsable.
    /// - `StoreError::Persistence` when the backing file cannot be read.
    pub fn open(config: &StoreConfig) -> Result<Self, StoreError> {
        let mut store = Self::with_repository(JsonFileEntryRepository::new(
            config.backing_path.clone(),
        ));
        store.load()?;
        Ok(store)
    }

    /// Path of the backing file.
    pub fn backing_path(&self) -> PathBuf {
        self.repo.path().to_path_buf()
    }
}

impl<R: EntryRepository> KnowledgeStore<R> {
    /// Creates an empty store over `repo` without reading it.
    ///
    /// Call [`KnowledgeStore::load`] to adopt persisted entries.
    pub fn with_repository(repo: R) -> Self {
        Self {
            repo,
            entries: Vec::new(),
        }
    }

    /// Replaces in-memory state with the persisted collection.
    ///
    /// A missing backing file yields an empty collection. A corrupt one is
    /// reported to the caller and the current state is kept.
    pub fn load(&mut self) -> Result<(), StoreError> {
        match self.repo.load_entries() {
            Ok(Some(entries)) => {
                self.entries = entries;
                Ok(())
            }
            Ok(None) => {
                self.entries.clear();
                Ok(())
            }
            Err(err) => {
                warn!("event=store_init module=service status=error error={err}");
                Err(err.into())
            }
        }
    }

    /// Appends one entry and persists the full collection.
    ///
    /// # Errors
    /// - `StoreError::Validation` when either field is empty; nothing is
    ///   written.
    /// - `StoreError::Persistence` when the write fails; the append is
    ///   rolled back.
    pub fn add(
        &mut self,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Entry, StoreError> {
        let entry = Entry::new(title, content);
        if let Err(err) = entry.validate() {
            info!("event=entry_add module=service status=rejected reason={err}");
            return Err(err.into());
        }

        self.entries.push(entry.clone());
        if let Err(err) = self.repo.save_entries(&self.entries) {
            self.entries.pop();
            error!(
                "event=entry_add module=service status=error rollback=true entries={} error={}",
                self.entries.len(),
                err
            );
            return Err(StoreError::Persistence(err));
        }

        info!(
            "event=entry_add module=service status=ok entries={} title_len={} content_len={}",
            self.entries.len(),
            entry.title.len(),
            entry.content.len()
        );
        Ok(entry)
    }

    /// Returns entries whose title or content contains `query`, ignoring
    /// case. An empty query returns every entry.
    pub fn search(&self, query: &str) -> Vec<Entry> {
        search_entries(&self.entries, query)
    }

    /// Runs a query with an optional hit limit.
    pub fn search_with(&self, query: &SearchQuery) -> Vec<Entry> {
        search_with_query(&self.entries, query)
    }

    /// Returns the full collection in insertion order.
    pub fn list_all(&self) -> Vec<Entry> {
        self.entries.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
