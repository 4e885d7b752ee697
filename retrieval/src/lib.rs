//! # Retrieval
//!
//! The retrieval-augmented-generation side of the chat core.
//!
//! [`IndexBuilder`] populates the vector index from the knowledge catalogue
//! exactly once per process; [`ContextRetriever`] turns a free-text query
//! into a ranked set of plant-knowledge snippets and renders them as a
//! prompt-ready context block. Retrieval is best-effort: every failure path
//! degrades to "no context" rather than surfacing an error, because chat
//! works without it.

mod builder;
mod retriever;

pub use builder::IndexBuilder;
pub use retriever::ContextRetriever;

/// Collection name holding the plant knowledge base.
pub const KNOWLEDGE_COLLECTION: &str = "plant_knowledge_base";

/// Matches retrieved per context block; favors prompt brevity over recall.
pub const DEFAULT_TOP_K: usize = 2;
