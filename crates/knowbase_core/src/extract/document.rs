//! PDF and plain-text extraction.
//!
//! # Responsibility
//! - Map declared MIME types and file extensions to [`DocumentKind`].
//! - Extract PDF text through `pdf-extract`, decode text files as UTF-8.
//!
//! # Invariants
//! - PDF pages are concatenated in page order with no added separators.
//! - Plain text is returned verbatim; invalid UTF-8 is an error, not lossy.
//! - Library panics on malformed PDFs are reported as `DocumentParse`.

use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;
use std::time::Instant;

pub const PDF_MIME: &str = "application/pdf";
pub const PLAIN_TEXT_MIME: &str = "text/plain";

/// Supported upload document types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    PlainText,
}

impl DocumentKind {
    /// Resolves a declared MIME type.
    ///
    /// Parameters (`; charset=...`) and ASCII case are ignored.
    pub fn from_mime(mime: &str) -> Result<Self, ExtractError> {
        let essence = mime
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            PDF_MIME => Ok(Self::Pdf),
            PLAIN_TEXT_MIME => Ok(Self::PlainText),
            _ => Err(ExtractError::UnsupportedFileType(mime.to_string())),
        }
    }

    /// Resolves a file path by its `.pdf` or `.txt` extension.
    pub fn from_path(path: &Path) -> Result<Self, ExtractError> {
        let ext = path
            .extension()
            .and_then(|value| value.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Ok(Self::Pdf),
            "txt" => Ok(Self::PlainText),
            _ => Err(ExtractError::UnsupportedFileType(path.display().to_string())),
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            Self::Pdf => PDF_MIME,
            Self::PlainText => PLAIN_TEXT_MIME,
        }
    }
}

impl Display for DocumentKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pdf => write!(f, "pdf"),
            Self::PlainText => write!(f, "plain_text"),
        }
    }
}

/// Extraction error for uploaded documents.
#[derive(Debug)]
pub enum ExtractError {
    /// Content does not decode as the declared type.
    DocumentParse { kind: DocumentKind, message: String },
    /// Declared type is outside the supported set.
    UnsupportedFileType(String),
}

impl Display for ExtractError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DocumentParse { kind, message } => {
                write!(f, "failed to parse {kind} document: {message}")
            }
            Self::UnsupportedFileType(declared) => write!(
                f,
                "unsupported file type `{declared}`; expected {PDF_MIME} or {PLAIN_TEXT_MIME}"
            ),
        }
    }
}

impl Error for ExtractError {}

/// Extracts plain text from `bytes` interpreted as `kind`.
pub fn extract_text(bytes: &[u8], kind: DocumentKind) -> Result<String, ExtractError> {
    let started_at = Instant::now();
    let result = match kind {
        DocumentKind::Pdf => extract_pdf_text(bytes),
        DocumentKind::PlainText => decode_plain_text(bytes),
    };

    match &result {
        Ok(text) => info!(
            "event=document_extract module=extract status=ok kind={} bytes={} chars={} duration_ms={}",
            kind,
            bytes.len(),
            text.chars().count(),
            started_at.elapsed().as_millis()
        ),
        Err(err) => warn!(
            "event=document_extract module=extract status=error kind={} bytes={} error={}",
            kind,
            bytes.len(),
            err
        ),
    }
    result
}

/// Extracts text using a declared MIME type.
pub fn extract_text_for_mime(bytes: &[u8], mime: &str) -> Result<String, ExtractError> {
    let kind = DocumentKind::from_mime(mime)?;
    extract_text(bytes, kind)
}

fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractError> {
    // pdf-extract panics on some malformed inputs instead of returning errors.
    let outcome = catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes)));
    match outcome {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(err)) => Err(ExtractError::DocumentParse {
            kind: DocumentKind::Pdf,
            message: err.to_string(),
        }),
        Err(payload) => {
            let detail = if let Some(message) = payload.downcast_ref::<&str>() {
                (*message).to_string()
            } else if let Some(message) = payload.downcast_ref::<String>() {
                message.clone()
            } else {
                "non-string panic payload".to_string()
            };
            Err(ExtractError::DocumentParse {
                kind: DocumentKind::Pdf,
                message: format!("pdf decoder panicked: {detail}"),
            })
        }
    }
}

fn decode_plain_text(bytes: &[u8]) -> Result<String, ExtractError> {
    String::from_utf8(bytes.to_vec()).map_err(|err| ExtractError::DocumentParse {
        kind: DocumentKind::PlainText,
        message: err.to_string(),
    })
}
