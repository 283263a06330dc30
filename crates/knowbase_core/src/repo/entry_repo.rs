//! Entry repository contract and JSON file implementation.
//!
//! # Responsibility
//! - Read the full entry collection from the backing file.
//! - Replace the backing file with a new full collection.
//!
//! # Invariants
//! - A missing backing file is reported as `Ok(None)`, never as an error.
//! - Loaded entries pass `Entry::validate()`; a file holding an empty title or
//!   content is corrupt.
//! - A save either fully replaces the backing file or leaves it untouched.
//! - Persisted layout is one JSON array of `{title, content}` objects.

use crate::model::entry::Entry;
use log::{error, info};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

const JSON_INDENT: &[u8] = b"    ";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for backing-file reads and writes.
#[derive(Debug)]
pub enum RepoError {
    /// Backing file exists but is not a valid entry sequence.
    CorruptState { path: PathBuf, message: String },
    /// File-system failure while reading or writing.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CorruptState { path, message } => {
                write!(f, "corrupt backing file `{}`: {message}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "i/o failure on `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CorruptState { .. } => None,
            Self::Io { source, .. } => Some(source),
        }
    }
}

/// Persistence contract used by the knowledge store.
pub trait EntryRepository {
    /// Reads the full collection, or `None` when nothing has been persisted.
    fn load_entries(&self) -> RepoResult<Option<Vec<Entry>>>;
    /// Replaces the persisted collection with `entries`.
    fn save_entries(&self, entries: &[Entry]) -> RepoResult<()>;
}

/// Backing-file repository storing the collection as a JSON array.
#[derive(Debug, Clone)]
pub struct JsonFileEntryRepository {
    path: PathBuf,
}

impl JsonFileEntryRepository {
    /// Creates a repository bound to one backing file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|value| value.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, path: &Path, source: std::io::Error) -> RepoError {
        RepoError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl EntryRepository for JsonFileEntryRepository {
    fn load_entries(&self) -> RepoResult<Option<Vec<Entry>>> {
        let started_at = Instant::now();
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    "event=store_load module=repo status=ok source=absent path={}",
                    self.path.display()
                );
                return Ok(None);
            }
            Err(err) => {
                error!(
                    "event=store_load module=repo status=error error_code=read_failed path={} error={}",
                    self.path.display(),
                    err
                );
                return Err(self.io_error(&self.path, err));
            }
        };

        let entries: Vec<Entry> = serde_json::from_slice(&raw).map_err(|err| {
            error!(
                "event=store_load module=repo status=error error_code=corrupt_state path={} error={}",
                self.path.display(),
                err
            );
            RepoError::CorruptState {
                path: self.path.clone(),
                message: err.to_string(),
            }
        })?;

        if let Some((index, err)) = entries
            .iter()
            .enumerate()
            .find_map(|(index, entry)| entry.validate().err().map(|err| (index, err)))
        {
            error!(
                "event=store_load module=repo status=error error_code=invalid_entry path={} index={}",
                self.path.display(),
                index
            );
            return Err(RepoError::CorruptState {
                path: self.path.clone(),
                message: format!("entry {index}: {err}"),
            });
        }

        info!(
            "event=store_load module=repo status=ok source=file path={} entries={} duration_ms={}",
            self.path.display(),
            entries.len(),
            started_at.elapsed().as_millis()
        );
        Ok(Some(entries))
    }

    fn save_entries(&self, entries: &[Entry]) -> RepoResult<()> {
        let started_at = Instant::now();
        let payload = encode_entries(entries).map_err(|err| RepoError::Io {
            path: self.path.clone(),
            source: err.into(),
        })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| self.io_error(parent, err))?;
        }

        let temp_path = self.temp_path();
        let write_result = fs::write(&temp_path, &payload)
            .map_err(|err| self.io_error(&temp_path, err))
            .and_then(|()| {
                fs::rename(&temp_path, &self.path).map_err(|err| self.io_error(&self.path, err))
            });

        if let Err(err) = write_result {
            let _ = fs::remove_file(&temp_path);
            error!(
                "event=store_save module=repo status=error error_code=write_failed path={} error={}",
                self.path.display(),
                err
            );
            return Err(err);
        }

        info!(
            "event=store_save module=repo status=ok path={} entries={} bytes={} duration_ms={}",
            self.path.display(),
            entries.len(),
            payload.len(),
            started_at.elapsed().as_millis()
        );
        Ok(())
    }
}

fn encode_entries(entries: &[Entry]) -> serde_json::Result<Vec<u8>> {
    let mut payload = Vec::new();
    let formatter = PrettyFormatter::with_indent(JSON_INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut payload, formatter);
    entries.serialize(&mut serializer)?;
    Ok(payload)
}
