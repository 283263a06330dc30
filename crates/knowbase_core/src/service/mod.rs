//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep the interaction layer decoupled from storage details.

pub mod knowledge_store;
