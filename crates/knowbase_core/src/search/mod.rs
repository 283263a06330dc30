//! Keyword search entry points.
//!
//! # Responsibility
//! - Expose case-insensitive substring search over entry collections.
//! - Keep result shaping inside core.

pub mod keyword;
