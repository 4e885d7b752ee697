//! Shared test utilities for chat integration tests.
//!
//! Provides a scripted `CompletionService` that records every model-facing
//! window, plus a populated retriever over the in-memory vector index, so
//! tests exercise the full send flow without external providers.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use embedding::EmbeddingService;
use knowledge::KnowledgeStore;
use llm_client::CompletionService;
use prompt::ChatMessage;
use retrieval::{ContextRetriever, IndexBuilder};
use vector_index::InMemoryVectorIndex;

/// Completion service that replies with a fixed string and records each
/// received message window. Flip `fail` to simulate a provider outage.
pub struct MockCompletion {
    pub fail: AtomicBool,
    pub windows: Mutex<Vec<Vec<ChatMessage>>>,
    reply: String,
}

impl MockCompletion {
    pub fn new(reply: &str) -> Self {
        Self {
            fail: AtomicBool::new(false),
            windows: Mutex::new(Vec::new()),
            reply: reply.to_string(),
        }
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// The last window passed to `complete`.
    pub fn last_window(&self) -> Vec<ChatMessage> {
        self.windows
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("complete was called at least once")
    }
}

#[async_trait]
impl CompletionService for MockCompletion {
    async fn complete(&self, messages: Vec<ChatMessage>) -> anyhow::Result<String> {
        self.windows.lock().unwrap().push(messages);
        if self.fail.load(Ordering::SeqCst) {
            anyhow::bail!("completion provider unavailable");
        }
        Ok(self.reply.clone())
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

/// Keyword-scored embedding so tomato queries hit the tomato record.
pub struct KeywordEmbedding;

impl KeywordEmbedding {
    fn vectorize(text: &str) -> Vec<f32> {
        let lower = text.to_lowercase();
        let score = |word: &str| lower.matches(word).count() as f32;
        vec![score("tomato"), score("rose"), score("basil")]
    }
}

#[async_trait]
impl EmbeddingService for KeywordEmbedding {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, anyhow::Error> {
        Ok(Self::vectorize(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, anyhow::Error> {
        Ok(texts.iter().map(|t| Self::vectorize(t)).collect())
    }
}

const CATALOGUE: &str = r#"[
    {
        "id": "tomato",
        "name": "Tomato",
        "description": "A warm-season fruiting crop with tomato flavor.",
        "common_diseases": ["Early blight"]
    },
    {
        "id": "rose",
        "name": "Rose",
        "description": "A flowering shrub, the classic rose."
    }
]"#;

/// Builds a retriever over a freshly populated in-memory index.
#[allow(dead_code)]
pub async fn populated_retriever() -> Arc<ContextRetriever> {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CATALOGUE.as_bytes()).unwrap();
    let knowledge = KnowledgeStore::new(file.path());

    let embedding = Arc::new(KeywordEmbedding);
    let index = Arc::new(InMemoryVectorIndex::new());

    let builder = IndexBuilder::new(knowledge, embedding.clone(), index.clone());
    builder.ensure_index().await.unwrap();

    Arc::new(ContextRetriever::new(embedding, index))
}
