//! Logging bootstrap for the knowbase process.
//!
//! # Responsibility
//! - Route `log` records to stderr, or to rolling files when a directory is
//!   configured.
//! - Capture panics as single-line diagnostic events.
//!
//! # Invariants
//! - A process installs at most one logger; later calls fail with
//!   `LoggingError::AlreadyInitialized`.
//! - Initialization never panics.
//! - Entry titles, entry content and document text are never logged.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info};
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

const LOG_FILE_BASENAME: &str = "knowbase";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 4 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;
const MAX_PANIC_PAYLOAD_CHARS: usize = 160;

static LOGGER: OnceCell<LoggerHandle> = OnceCell::new();

/// Logging bootstrap failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoggingError {
    /// Level string is not one of `off|trace|debug|info|warn|error`.
    InvalidLevel(String),
    /// Log directory is relative or cannot be created.
    InvalidLogDir(String),
    /// A logger is already active in this process.
    AlreadyInitialized,
    /// `flexi_logger` refused to start.
    Backend(String),
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLevel(level) => write!(
                f,
                "unsupported log level `{level}`; expected off|trace|debug|info|warn|error"
            ),
            Self::InvalidLogDir(message) => write!(f, "invalid log directory: {message}"),
            Self::AlreadyInitialized => write!(f, "logging is already initialized"),
            Self::Backend(message) => write!(f, "failed to start logger: {message}"),
        }
    }
}

impl Error for LoggingError {}

/// Starts the process logger.
///
/// With `log_dir = None` records go to stderr. With a directory, records go
/// to size-rotated `knowbase_*.log` files inside it; the directory must be
/// absolute and is created when missing.
pub fn init_logging(level: &str, log_dir: Option<&Path>) -> Result<(), LoggingError> {
    let level = normalize_level(level)?;
    if LOGGER.get().is_some() {
        return Err(LoggingError::AlreadyInitialized);
    }

    let logger =
        Logger::try_with_str(level).map_err(|err| LoggingError::Backend(err.to_string()))?;
    let handle = match log_dir {
        Some(dir) => {
            validate_log_dir(dir)?;
            logger
                .log_to_file(
                    FileSpec::default()
                        .directory(dir)
                        .basename(LOG_FILE_BASENAME),
                )
                .rotate(
                    Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                    Naming::Numbers,
                    Cleanup::KeepLogFiles(MAX_LOG_FILES),
                )
                .write_mode(WriteMode::BufferAndFlush)
                .append()
                .format_for_files(flexi_logger::detailed_format)
                .start()
        }
        None => logger
            .log_to_stderr()
            .format_for_stderr(flexi_logger::default_format)
            .start(),
    }
    .map_err(|err| LoggingError::Backend(err.to_string()))?;

    if LOGGER.set(handle).is_err() {
        return Err(LoggingError::AlreadyInitialized);
    }
    install_panic_hook();

    info!(
        "event=logging_init module=logging status=ok level={} target={} version={}",
        level,
        log_dir.map_or_else(|| "stderr".to_string(), |dir| dir.display().to_string()),
        env!("CARGO_PKG_VERSION")
    );
    Ok(())
}

/// Default level for file logging: `debug` in debug builds, `info` otherwise.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn normalize_level(level: &str) -> Result<&'static str, LoggingError> {
    match level.trim().to_ascii_lowercase().as_str() {
        "off" => Ok("off"),
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        _ => Err(LoggingError::InvalidLevel(level.to_string())),
    }
}

fn validate_log_dir(dir: &Path) -> Result<(), LoggingError> {
    if !dir.is_absolute() {
        return Err(LoggingError::InvalidLogDir(format!(
            "`{}` is not an absolute path",
            dir.display()
        )));
    }
    std::fs::create_dir_all(dir)
        .map_err(|err| LoggingError::InvalidLogDir(format!("`{}`: {err}", dir.display())))
}

// Called once, right after the logger handle is stored.
fn install_panic_hook() {
    let previous_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());
        let payload = panic_info
            .payload()
            .downcast_ref::<&str>()
            .map(|message| (*message).to_string())
            .or_else(|| panic_info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());
        error!(
            "event=panic_captured module=logging status=error location={} payload={}",
            location,
            single_line(&payload, MAX_PANIC_PAYLOAD_CHARS)
        );
        previous_hook(panic_info);
    }));
}

fn single_line(value: &str, max_chars: usize) -> String {
    let flattened = value.replace(['\n', '\r'], " ");
    if flattened.chars().count() <= max_chars {
        return flattened;
    }
    let mut truncated = flattened.chars().take(max_chars).collect::<String>();
    truncated.push_str("...");
    truncated
}
