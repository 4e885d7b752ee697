//! # Vector Index
//!
//! Abstraction over nearest-neighbor search for the retrieval pipeline.
//!
//! The [`VectorIndex`] trait covers what the retrieval core needs from a
//! vector storage engine: named collections, document upsert, and k-NN query
//! returning matches ordered by ascending distance. How an engine indexes or
//! persists vectors is its own business; [`InMemoryVectorIndex`] is the
//! in-process implementation used here.

use async_trait::async_trait;

mod inmemory;
mod types;

pub use inmemory::InMemoryVectorIndex;
pub use types::{DocumentMetadata, IndexedDocument, ScoredMatch};

/// Trait for vector index backends.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Returns true if the named collection exists.
    async fn collection_exists(&self, name: &str) -> Result<bool, anyhow::Error>;

    /// Creates the named collection if it does not exist yet.
    async fn ensure_collection(&self, name: &str) -> Result<(), anyhow::Error>;

    /// Inserts or replaces a document (keyed by its id) in the collection.
    async fn upsert(&self, collection: &str, document: IndexedDocument)
        -> Result<(), anyhow::Error>;

    /// Returns up to `k` matches ordered by ascending distance (closest first).
    async fn query(
        &self,
        collection: &str,
        embedding: &[f32],
        k: usize,
    ) -> Result<Vec<ScoredMatch>, anyhow::Error>;
}
