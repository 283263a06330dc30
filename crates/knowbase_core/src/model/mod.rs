//! Domain model for knowledge entries.
//!
//! # Responsibility
//! - Define the title/content record stored by the knowledge store.
//! - Own field-level validation rules shared by every write path.
//!
//! # Invariants
//! - Entries carry no identity; duplicates are legal.
//! - Collection order is insertion order.

pub mod entry;
