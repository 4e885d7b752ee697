//! Embedding configuration: trait and env-based implementation.

use anyhow::Result;
use std::env;

/// Embedding service configuration interface.
pub trait EmbeddingConfig: Send + Sync {
    /// API key for OpenAI-compatible embedding (OPENAI_API_KEY).
    fn api_key(&self) -> &str;
    /// Embedding model name; `None` means the provider default.
    fn model(&self) -> Option<&str>;
    /// Optional base URL for OpenAI-compatible embedding endpoints (OPENAI_BASE_URL).
    fn base_url(&self) -> Option<&str>;
}

/// Embedding config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvEmbeddingConfig {
    pub openai_api_key: String,
    pub embedding_model: Option<String>,
    pub openai_base_url: Option<String>,
}

impl EmbeddingConfig for EnvEmbeddingConfig {
    fn api_key(&self) -> &str {
        &self.openai_api_key
    }
    fn model(&self) -> Option<&str> {
        self.embedding_model.as_deref()
    }
    fn base_url(&self) -> Option<&str> {
        self.openai_base_url.as_deref().filter(|s| !s.is_empty())
    }
}

impl EnvEmbeddingConfig {
    /// Load from environment variables.
    pub fn from_env() -> Result<Self> {
        let openai_api_key = env::var("OPENAI_API_KEY").unwrap_or_default();
        let embedding_model = env::var("EMBEDDING_MODEL")
            .ok()
            .filter(|s| !s.trim().is_empty());
        let openai_base_url = env::var("OPENAI_BASE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty());
        Ok(Self {
            openai_api_key,
            embedding_model,
            openai_base_url,
        })
    }

    /// Validate config: embedding calls need an API key.
    pub fn validate(&self) -> Result<()> {
        if self.openai_api_key.is_empty() {
            anyhow::bail!("OPENAI_API_KEY is required for embedding requests");
        }
        Ok(())
    }
}
