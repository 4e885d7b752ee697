//! Shared test utilities for retrieval integration tests.
//!
//! Provides deterministic and failing `EmbeddingService` implementations and
//! a knowledge-catalogue fixture, so tests never touch external embedding
//! APIs.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use embedding::EmbeddingService;
use knowledge::KnowledgeStore;

/// Embedding service that scores texts on three fixed keywords, so queries
/// mentioning "tomato" land closest to the tomato record and so on. Counts
/// `embed` calls for idempotency assertions.
pub struct KeywordEmbedding {
    pub embed_calls: AtomicUsize,
}

impl KeywordEmbedding {
    pub fn new() -> Self {
        Self {
            embed_calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.embed_calls.load(Ordering::SeqCst)
    }

    fn vectorize(text: &str) -> Vec<f32> {
        let lower = text.to_lowercase();
        let score = |word: &str| lower.matches(word).count() as f32;
        vec![score("tomato"), score("rose"), score("basil")]
    }
}

#[async_trait]
impl EmbeddingService for KeywordEmbedding {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, anyhow::Error> {
        self.embed_calls.fetch_add(1, Ordering::SeqCst);
        Ok(Self::vectorize(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, anyhow::Error> {
        Ok(texts.iter().map(|t| Self::vectorize(t)).collect())
    }
}

/// Embedding service that always fails; used for soft-fail paths.
pub struct FailingEmbedding;

#[async_trait]
impl EmbeddingService for FailingEmbedding {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>, anyhow::Error> {
        Err(anyhow::anyhow!("embedding provider unavailable"))
    }

    async fn embed_batch(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>, anyhow::Error> {
        Err(anyhow::anyhow!("embedding provider unavailable"))
    }
}

const CATALOGUE: &str = r#"[
    {
        "id": "tomato",
        "name": "Tomato",
        "description": "A warm-season fruiting crop with tomato flavor.",
        "common_diseases": ["Early blight"],
        "treatments": ["Remove affected leaves. Spray fungicide. Water evenly. Mulch well."]
    },
    {
        "id": "rose",
        "name": "Rose",
        "description": "A flowering shrub, the classic rose.",
        "common_diseases": ["Black spot"]
    },
    {
        "id": "basil",
        "name": "Basil",
        "description": "A fragrant basil herb for the kitchen."
    }
]"#;

/// Writes the three-record test catalogue and returns a store over it.
/// The temp file must stay alive as long as the store is used.
#[allow(dead_code)]
pub fn knowledge_fixture() -> (KnowledgeStore, tempfile::NamedTempFile) {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CATALOGUE.as_bytes()).unwrap();
    let store = KnowledgeStore::new(file.path());
    (store, file)
}

/// Writes an empty catalogue and returns a store over it.
#[allow(dead_code)]
pub fn empty_knowledge_fixture() -> (KnowledgeStore, tempfile::NamedTempFile) {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"[]").unwrap();
    let store = KnowledgeStore::new(file.path());
    (store, file)
}
