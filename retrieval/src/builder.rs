//! One-time population of the vector index from the knowledge catalogue.

use std::sync::Arc;

use anyhow::Result;
use embedding::EmbeddingService;
use knowledge::{metadata_description, KnowledgeStore};
use tokio::sync::Mutex;
use tracing::{info, warn};
use vector_index::{DocumentMetadata, IndexedDocument, VectorIndex};

use crate::KNOWLEDGE_COLLECTION;

/// Populates the vector index from the knowledge store, at most once per process.
///
/// An existing collection is treated as authoritative: `ensure_index` never
/// reconciles staleness. Rebuilding the index means starting over with a
/// fresh index backend.
pub struct IndexBuilder {
    knowledge: KnowledgeStore,
    embedding: Arc<dyn EmbeddingService>,
    index: Arc<dyn VectorIndex>,
    collection: String,
    initialized: Mutex<bool>,
}

impl IndexBuilder {
    pub fn new(
        knowledge: KnowledgeStore,
        embedding: Arc<dyn EmbeddingService>,
        index: Arc<dyn VectorIndex>,
    ) -> Self {
        Self {
            knowledge,
            embedding,
            index,
            collection: KNOWLEDGE_COLLECTION.to_string(),
            initialized: Mutex::new(false),
        }
    }

    /// Uses a different collection name (tests, side-by-side indexes).
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Idempotent index bootstrap.
    ///
    /// Concurrent first calls serialize on the internal guard; once one call
    /// has completed, later calls return immediately. If the collection
    /// already exists in the index backend it is left untouched. Otherwise
    /// the collection is created and every knowledge record is embedded and
    /// upserted; individual record failures are logged and skipped, an empty
    /// catalogue is an error.
    pub async fn ensure_index(&self) -> Result<()> {
        let mut initialized = self.initialized.lock().await;
        if *initialized {
            return Ok(());
        }

        if self.index.collection_exists(&self.collection).await? {
            info!(
                collection = %self.collection,
                "Vector index collection already exists, skipping population"
            );
            *initialized = true;
            return Ok(());
        }

        info!(
            collection = %self.collection,
            "Creating vector index collection and embedding knowledge records"
        );
        self.index.ensure_collection(&self.collection).await?;

        let records = self.knowledge.load()?;
        if records.is_empty() {
            anyhow::bail!(
                "Knowledge catalogue {} has no records; cannot build index",
                self.knowledge.path().display()
            );
        }

        info!(count = records.len(), "Embedding plant records");

        let mut indexed = 0usize;
        for record in &records {
            let text = record.embedding_text();

            let embedding = match self.embedding.embed(&text).await {
                Ok(embedding) => embedding,
                Err(e) => {
                    warn!(id = %record.id, error = %e, "Failed to embed record, skipping");
                    continue;
                }
            };

            let document = IndexedDocument {
                id: record.id.clone(),
                embedding,
                metadata: DocumentMetadata {
                    name: record.name.clone(),
                    kind: "crop".to_string(),
                    description: metadata_description(&record.description),
                },
                document: text,
            };

            if let Err(e) = self.index.upsert(&self.collection, document).await {
                warn!(id = %record.id, error = %e, "Failed to upsert record, skipping");
                continue;
            }
            indexed += 1;
        }

        info!(
            collection = %self.collection,
            indexed,
            total = records.len(),
            "Knowledge records embedded and added to vector index"
        );

        *initialized = true;
        Ok(())
    }
}
