//! In-memory vector index.
//!
//! Named collections in a `HashMap`, ranked by cosine distance. Data is lost
//! on restart; suitable for a single-process knowledge base of modest size.
//!
//! ## Thread Safety
//!
//! The index uses `Arc<RwLock<>>` to ensure thread-safe concurrent access.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::anyhow;
use tokio::sync::RwLock;
use tracing::info;

use crate::types::{IndexedDocument, ScoredMatch};
use crate::VectorIndex;

type Collection = HashMap<String, IndexedDocument>;

/// In-memory vector index with cosine-distance ranking.
#[derive(Debug, Clone, Default)]
pub struct InMemoryVectorIndex {
    collections: Arc<RwLock<HashMap<String, Collection>>>,
}

impl InMemoryVectorIndex {
    /// Creates a new empty index with no collections.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of documents in the named collection (0 if absent).
    pub async fn len(&self, collection: &str) -> usize {
        let collections = self.collections.read().await;
        collections.get(collection).map(|c| c.len()).unwrap_or(0)
    }

    /// Returns true if the named collection holds no documents.
    pub async fn is_empty(&self, collection: &str) -> bool {
        self.len(collection).await == 0
    }

    /// Cosine distance: 1 - cosine similarity, so smaller is closer.
    /// Degenerate vectors (empty or zero norm) get the maximum distance 1.0.
    fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
        if a.is_empty() || b.is_empty() {
            return 1.0;
        }

        let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
        let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

        if norm_a == 0.0 || norm_b == 0.0 {
            return 1.0;
        }

        1.0 - dot_product / (norm_a * norm_b)
    }
}

#[async_trait::async_trait]
impl VectorIndex for InMemoryVectorIndex {
    async fn collection_exists(&self, name: &str) -> Result<bool, anyhow::Error> {
        let collections = self.collections.read().await;
        Ok(collections.contains_key(name))
    }

    async fn ensure_collection(&self, name: &str) -> Result<(), anyhow::Error> {
        let mut collections = self.collections.write().await;
        if !collections.contains_key(name) {
            info!(collection = %name, "Creating vector index collection");
            collections.insert(name.to_string(), Collection::new());
        }
        Ok(())
    }

    async fn upsert(
        &self,
        collection: &str,
        document: IndexedDocument,
    ) -> Result<(), anyhow::Error> {
        info!(
            collection = %collection,
            id = %document.id,
            dimension = document.embedding.len(),
            "Writing document to in-memory vector index"
        );

        let mut collections = self.collections.write().await;
        let entries = collections
            .get_mut(collection)
            .ok_or_else(|| anyhow!("Collection not found: {}", collection))?;
        entries.insert(document.id.clone(), document);
        Ok(())
    }

    async fn query(
        &self,
        collection: &str,
        embedding: &[f32],
        k: usize,
    ) -> Result<Vec<ScoredMatch>, anyhow::Error> {
        info!(
            collection = %collection,
            dimension = embedding.len(),
            k = k,
            "Querying in-memory vector index"
        );

        let collections = self.collections.read().await;
        let entries = collections
            .get(collection)
            .ok_or_else(|| anyhow!("Collection not found: {}", collection))?;

        let mut matches: Vec<ScoredMatch> = entries
            .values()
            .map(|doc| ScoredMatch {
                id: doc.id.clone(),
                name: doc.metadata.name.clone(),
                description: doc.metadata.description.clone(),
                document: doc.document.clone(),
                distance: Self::cosine_distance(embedding, &doc.embedding),
            })
            .collect();

        matches.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        matches.truncate(k);

        info!(
            collection = %collection,
            count = matches.len(),
            "In-memory vector index query returned"
        );
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DocumentMetadata;

    fn doc(id: &str, name: &str, embedding: Vec<f32>) -> IndexedDocument {
        IndexedDocument {
            id: id.to_string(),
            embedding,
            metadata: DocumentMetadata {
                name: name.to_string(),
                kind: "crop".to_string(),
                description: format!("{} description", name),
            },
            document: format!("Plant: {}", name),
        }
    }

    #[tokio::test]
    async fn ensure_collection_is_idempotent() {
        let index = InMemoryVectorIndex::new();
        index.ensure_collection("plants").await.unwrap();
        index
            .upsert("plants", doc("1", "Tomato", vec![1.0, 0.0]))
            .await
            .unwrap();

        index.ensure_collection("plants").await.unwrap();
        assert_eq!(index.len("plants").await, 1);
    }

    #[tokio::test]
    async fn upsert_replaces_by_id() {
        let index = InMemoryVectorIndex::new();
        index.ensure_collection("plants").await.unwrap();
        index
            .upsert("plants", doc("1", "Tomato", vec![1.0, 0.0]))
            .await
            .unwrap();
        index
            .upsert("plants", doc("1", "Rose", vec![0.0, 1.0]))
            .await
            .unwrap();

        assert_eq!(index.len("plants").await, 1);
        let results = index.query("plants", &[0.0, 1.0], 1).await.unwrap();
        assert_eq!(results[0].name, "Rose");
    }

    #[tokio::test]
    async fn upsert_into_missing_collection_fails() {
        let index = InMemoryVectorIndex::new();
        let result = index.upsert("plants", doc("1", "Tomato", vec![1.0])).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn query_orders_by_ascending_distance() {
        let index = InMemoryVectorIndex::new();
        index.ensure_collection("plants").await.unwrap();
        index
            .upsert("plants", doc("1", "Tomato", vec![1.0, 0.0, 0.0]))
            .await
            .unwrap();
        index
            .upsert("plants", doc("2", "Rose", vec![0.0, 1.0, 0.0]))
            .await
            .unwrap();
        index
            .upsert("plants", doc("3", "Cherry tomato", vec![0.9, 0.1, 0.0]))
            .await
            .unwrap();

        let results = index.query("plants", &[1.0, 0.0, 0.0], 2).await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].name, "Tomato");
        assert_eq!(results[1].name, "Cherry tomato");
        assert!(results[0].distance <= results[1].distance);
    }

    #[tokio::test]
    async fn query_missing_collection_fails() {
        let index = InMemoryVectorIndex::new();
        let result = index.query("plants", &[1.0], 2).await;
        assert!(result.is_err());
    }

    #[test]
    fn cosine_distance_basics() {
        // Identical vectors
        let a = vec![1.0, 2.0, 3.0];
        let b = vec![1.0, 2.0, 3.0];
        assert!(InMemoryVectorIndex::cosine_distance(&a, &b).abs() < 1e-6);

        // Orthogonal vectors
        let c = vec![1.0, 0.0, 0.0];
        let d = vec![0.0, 1.0, 0.0];
        assert!((InMemoryVectorIndex::cosine_distance(&c, &d) - 1.0).abs() < 1e-6);

        // Empty vectors rank last
        let e: Vec<f32> = vec![];
        assert_eq!(InMemoryVectorIndex::cosine_distance(&e, &a), 1.0);
    }
}
