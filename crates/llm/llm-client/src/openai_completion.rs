//! OpenAI implementation of [`CompletionService`]: wraps openai-client.

use anyhow::Result;
use async_trait::async_trait;
use prompt::ChatMessage;
use tracing::instrument;

use super::{chat_message_to_openai, CompletionService};

/// Default chat model when none is configured.
pub const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo";

/// CompletionService implementation based on openai-client.
#[derive(Clone)]
pub struct OpenAICompletion {
    client: openai_client::OpenAIClient,
    model: String,
}

impl OpenAICompletion {
    pub fn new(api_key: String) -> Self {
        Self {
            client: openai_client::OpenAIClient::new(api_key),
            model: DEFAULT_CHAT_MODEL.to_string(),
        }
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: openai_client::OpenAIClient::with_base_url(api_key, base_url),
            model: DEFAULT_CHAT_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }
}

#[async_trait]
impl CompletionService for OpenAICompletion {
    #[instrument(skip(self, messages))]
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let mut openai_messages: Vec<openai_client::ChatCompletionRequestMessage> =
            Vec::with_capacity(messages.len());
        for msg in &messages {
            openai_messages.push(chat_message_to_openai(msg)?);
        }
        self.client.chat_completion(&self.model, openai_messages).await
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
