//! Document and match types exchanged with the vector index.

use serde::{Deserialize, Serialize};

/// Metadata stored alongside each indexed document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Plant/crop display name.
    pub name: String,
    /// Record kind; currently always "crop".
    pub kind: String,
    /// Short description (truncated by the knowledge store, ≤200 chars).
    pub description: String,
}

/// A document held by the vector index: embedding plus the text it was built from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexedDocument {
    /// Unique key, same as the source knowledge record id.
    pub id: String,
    /// Embedding produced from `document`.
    pub embedding: Vec<f32>,
    pub metadata: DocumentMetadata,
    /// Full synthesized text used to produce the embedding.
    pub document: String,
}

/// One ranked query result.
#[derive(Debug, Clone)]
pub struct ScoredMatch {
    pub id: String,
    pub name: String,
    pub description: String,
    pub document: String,
    /// Cosine distance to the query; smaller is closer.
    pub distance: f32,
}
