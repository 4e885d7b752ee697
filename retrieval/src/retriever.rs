//! Context retrieval: semantic search plus prompt-ready formatting.

use std::sync::Arc;

use embedding::EmbeddingService;
use prompt::{SECTION_CHAT_CONTEXT, SECTION_DIAGNOSIS_CONTEXT};
use tracing::{debug, warn};
use vector_index::{ScoredMatch, VectorIndex};

use crate::{DEFAULT_TOP_K, KNOWLEDGE_COLLECTION};

/// Number of sentence fragments kept in a diagnosis "Key details" line.
const KEY_DETAIL_SENTENCES: usize = 3;

/// Retrieves plant-knowledge snippets for a query and renders context blocks.
pub struct ContextRetriever {
    embedding: Arc<dyn EmbeddingService>,
    index: Arc<dyn VectorIndex>,
    collection: String,
}

impl ContextRetriever {
    pub fn new(embedding: Arc<dyn EmbeddingService>, index: Arc<dyn VectorIndex>) -> Self {
        Self {
            embedding,
            index,
            collection: KNOWLEDGE_COLLECTION.to_string(),
        }
    }

    /// Uses a different collection name (tests, side-by-side indexes).
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Returns up to `k` matches ordered by ascending distance.
    ///
    /// Best-effort: embedding or query failures are logged and yield an
    /// empty result, never an error. Chat continues without context.
    pub async fn retrieve(&self, query: &str, k: usize) -> Vec<ScoredMatch> {
        let query_embedding = match self.embedding.embed(query).await {
            Ok(embedding) => embedding,
            Err(e) => {
                warn!(error = %e, "Embedding failed, skipping retrieval");
                return Vec::new();
            }
        };

        match self.index.query(&self.collection, &query_embedding, k).await {
            Ok(matches) => {
                debug!(count = matches.len(), "Retrieval returned matches");
                matches
            }
            Err(e) => {
                warn!(error = %e, "Vector index query failed, skipping retrieval");
                Vec::new()
            }
        }
    }

    /// Context block for chat prompts: top matches as a bulleted
    /// `- name: description` list under a fixed header. Empty string when
    /// nothing was retrieved.
    pub async fn context_for_chat(&self, user_message: &str) -> String {
        let matches = self.retrieve(user_message, DEFAULT_TOP_K).await;

        if matches.is_empty() {
            return String::new();
        }

        let mut context_parts = vec![SECTION_CHAT_CONTEXT.to_string()];
        for result in &matches {
            context_parts.push(format!("\n- {}: {}", result.name, result.description));
        }

        context_parts.join("\n")
    }

    /// Context block for diagnosis prompts.
    ///
    /// The query joins whichever of plant name and symptoms are present;
    /// with neither there is nothing to search and the result is empty. Each
    /// match additionally carries a "Key details" line holding the first
    /// three sentences of the indexed document.
    pub async fn context_for_diagnosis(
        &self,
        plant_name: Option<&str>,
        symptoms: Option<&str>,
    ) -> String {
        let query_parts: Vec<&str> = [plant_name, symptoms]
            .into_iter()
            .flatten()
            .filter(|s| !s.trim().is_empty())
            .collect();

        if query_parts.is_empty() {
            return String::new();
        }

        let query = query_parts.join(" ");
        let matches = self.retrieve(&query, DEFAULT_TOP_K).await;

        if matches.is_empty() {
            return String::new();
        }

        let mut context_parts = vec![SECTION_DIAGNOSIS_CONTEXT.to_string()];
        for result in &matches {
            context_parts.push(format!("\n- {}: {}", result.name, result.description));
            if !result.document.is_empty() {
                let doc_parts: Vec<&str> = result.document.split(". ").collect();
                let key_info = doc_parts
                    .into_iter()
                    .take(KEY_DETAIL_SENTENCES)
                    .collect::<Vec<_>>()
                    .join(". ");
                context_parts.push(format!("  Key details: {}", key_info));
            }
        }

        context_parts.join("\n")
    }
}
