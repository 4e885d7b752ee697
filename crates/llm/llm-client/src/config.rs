//! Completion configuration: trait and env-based implementation.

use anyhow::{Context, Result};
use std::env;

/// Completion configuration interface for OpenAI-compatible APIs.
pub trait CompletionConfig: Send + Sync {
    fn api_key(&self) -> &str;
    fn base_url(&self) -> &str;
    fn model(&self) -> &str;
}

/// Completion config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvCompletionConfig {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub chat_model: String,
}

impl CompletionConfig for EnvCompletionConfig {
    fn api_key(&self) -> &str {
        &self.openai_api_key
    }
    fn base_url(&self) -> &str {
        &self.openai_base_url
    }
    fn model(&self) -> &str {
        &self.chat_model
    }
}

impl EnvCompletionConfig {
    /// Load from environment variables.
    pub fn from_env() -> Result<Self> {
        let openai_api_key =
            env::var("OPENAI_API_KEY").context("OPENAI_API_KEY not set")?;
        let openai_base_url = env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
        let chat_model = env::var("CHAT_MODEL")
            .unwrap_or_else(|_| super::openai_completion::DEFAULT_CHAT_MODEL.to_string());
        Ok(Self {
            openai_api_key,
            openai_base_url,
            chat_model,
        })
    }
}
