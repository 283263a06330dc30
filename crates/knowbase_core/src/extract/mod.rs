//! Document text extraction for uploaded files.
//!
//! # Responsibility
//! - Turn PDF or plain-text bytes into displayable text.
//! - Reject declared types outside the supported set.
//!
//! # Invariants
//! - Extraction is stateless and never touches the knowledge store.

pub mod document;
