//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the load/save contract for the backing file.
//! - Isolate serialization and file-system details from the store.
//!
//! # Invariants
//! - Saves always rewrite the whole collection.
//! - Loads reject unparsable content instead of masking it.

pub mod entry_repo;
