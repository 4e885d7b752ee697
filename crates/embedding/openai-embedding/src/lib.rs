//! # OpenAI Embedding Service
//!
//! Implementation of the `EmbeddingService` trait using OpenAI's embedding API.
//!
//! ## Supported Models
//!
//! - `text-embedding-3-small`: 1536 dimensions, cost-effective (default)
//! - `text-embedding-3-large`: 3072 dimensions, higher accuracy
//! - `text-embedding-ada-002`: 1536 dimensions (legacy model)
//!
//! The API key can be provided directly or via the `OPENAI_API_KEY`
//! environment variable; an optional base URL supports OpenAI-compatible
//! endpoints.

use async_openai::{types::CreateEmbeddingRequestArgs, Client};
use async_trait::async_trait;
use embedding::EmbeddingService;
use tracing::{debug, info, instrument, warn};

/// Default embedding model.
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

/// OpenAI embedding service implementation. Holds the async-openai client and model name.
#[derive(Debug, Clone)]
pub struct OpenAIEmbedding {
    /// OpenAI client used for embeddings API calls.
    client: Client<async_openai::config::OpenAIConfig>,
    /// Embedding model name (e.g. "text-embedding-3-small").
    model: String,
}

impl OpenAIEmbedding {
    /// Creates a new OpenAI embedding service.
    ///
    /// If `api_key` is empty, the `OPENAI_API_KEY` environment variable is used.
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_base_url(api_key, model, None)
    }

    /// Creates a new OpenAI embedding service with an optional base URL for
    /// OpenAI-compatible endpoints. When `base_url` is `Some`, requests go to
    /// that URL instead of the default OpenAI API.
    pub fn new_with_base_url(api_key: String, model: String, base_url: Option<&str>) -> Self {
        let api_key = if api_key.is_empty() {
            std::env::var("OPENAI_API_KEY").unwrap_or_default()
        } else {
            api_key
        };

        let mut openai_config = async_openai::config::OpenAIConfig::new().with_api_key(api_key);
        if let Some(url) = base_url.filter(|s| !s.is_empty()) {
            openai_config = openai_config.with_api_base(url);
        }
        let client = Client::with_config(openai_config);

        Self { client, model }
    }

    /// Creates a new OpenAI embedding service with the default model.
    pub fn with_api_key(api_key: String) -> Self {
        Self::new(api_key, DEFAULT_EMBEDDING_MODEL.to_string())
    }

    /// Sets a different embedding model.
    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    /// Returns the embedding model name (for tests and diagnostics).
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl EmbeddingService for OpenAIEmbedding {
    /// Generates an embedding vector for a single text string using OpenAI's API.
    ///
    /// Vector dimensions depend on the configured model (1536 for
    /// text-embedding-3-small). Fails if the API key is invalid, the request
    /// fails or times out, or the response carries no embedding data.
    #[instrument(skip(self, text), fields(model = %self.model, text_len = text.len()))]
    async fn embed(&self, text: &str) -> Result<Vec<f32>, anyhow::Error> {
        // Timeout for a single embed request (connect + request + response).
        const EMBED_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);
        const LOG_PREVIEW_LEN: usize = 200;
        let text_preview = if text.len() <= LOG_PREVIEW_LEN {
            text.to_string()
        } else {
            let safe_len = text
                .char_indices()
                .nth(LOG_PREVIEW_LEN)
                .map(|(idx, _)| idx)
                .unwrap_or(text.len());
            format!("{}...", &text[..safe_len])
        };

        info!(
            model = %self.model,
            text_preview = %text_preview,
            text_len = text.len(),
            "OpenAI embed request"
        );

        let request = CreateEmbeddingRequestArgs::default()
            .model(self.model.clone())
            .input(vec![text])
            .build()?;

        let embeddings = self.client.embeddings();
        let create_future = embeddings.create(request);
        let response = match tokio::time::timeout(EMBED_TIMEOUT, create_future).await {
            Ok(Ok(r)) => {
                debug!("OpenAI embed response received");
                r
            }
            Ok(Err(e)) => {
                warn!(error = %e, "OpenAI embed request failed");
                return Err(e.into());
            }
            Err(_) => {
                warn!(
                    timeout_secs = EMBED_TIMEOUT.as_secs(),
                    "OpenAI embed request timed out"
                );
                return Err(anyhow::anyhow!(
                    "OpenAI embed request timed out after {} seconds",
                    EMBED_TIMEOUT.as_secs()
                ));
            }
        };

        let embedding = match response.data.first() {
            Some(item) => item.embedding.clone(),
            None => {
                warn!("OpenAI embed response has no embedding data");
                return Err(anyhow::anyhow!("No embedding in response"));
            }
        };

        info!(dimension = embedding.len(), "OpenAI embed done");
        Ok(embedding)
    }

    /// Generates embedding vectors for multiple texts in a single API call.
    ///
    /// All texts go out in one request; the response must contain exactly one
    /// embedding per input, in order.
    #[instrument(skip(self, texts), fields(model = %self.model, batch_size = texts.len()))]
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, anyhow::Error> {
        if texts.is_empty() {
            debug!("OpenAI embed_batch empty input, skipping");
            return Ok(vec![]);
        }

        info!(
            model = %self.model,
            batch_size = texts.len(),
            "OpenAI embed_batch request"
        );

        // Timeout for batch request (longer than single embed due to larger payload).
        const EMBED_BATCH_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(60);

        let inputs: Vec<&str> = texts.iter().map(|s| s.as_str()).collect();

        let request = CreateEmbeddingRequestArgs::default()
            .model(self.model.clone())
            .input(inputs)
            .build()?;

        let embeddings = self.client.embeddings();
        let create_future = embeddings.create(request);
        let response = match tokio::time::timeout(EMBED_BATCH_TIMEOUT, create_future).await {
            Ok(Ok(r)) => {
                debug!("OpenAI embed_batch response received");
                r
            }
            Ok(Err(e)) => {
                warn!(error = %e, "OpenAI embed_batch request failed");
                return Err(e.into());
            }
            Err(_) => {
                warn!(
                    timeout_secs = EMBED_BATCH_TIMEOUT.as_secs(),
                    "OpenAI embed_batch request timed out"
                );
                return Err(anyhow::anyhow!(
                    "OpenAI embed_batch request timed out after {} seconds",
                    EMBED_BATCH_TIMEOUT.as_secs()
                ));
            }
        };

        let embeddings: Vec<Vec<f32>> = response
            .data
            .into_iter()
            .map(|item| item.embedding)
            .collect();

        if embeddings.len() != texts.len() {
            warn!(
                expected = texts.len(),
                got = embeddings.len(),
                "OpenAI embed_batch response count mismatch"
            );
            return Err(anyhow::anyhow!(
                "Expected {} embeddings, got {}",
                texts.len(),
                embeddings.len()
            ));
        }

        let dimension = embeddings.first().map(|v| v.len()).unwrap_or(0);
        info!(
            count = embeddings.len(),
            dimension = dimension,
            "OpenAI embed_batch done"
        );
        Ok(embeddings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_model_via_with_api_key() {
        let service = OpenAIEmbedding::with_api_key("sk-test".to_string());
        assert_eq!(service.model(), DEFAULT_EMBEDDING_MODEL);
    }

    #[test]
    fn with_model_overrides() {
        let service = OpenAIEmbedding::with_api_key("sk-test".to_string())
            .with_model("text-embedding-3-large".to_string());
        assert_eq!(service.model(), "text-embedding-3-large");
    }
}
