//! # Completion client abstraction
//!
//! Defines the [`CompletionService`] trait and an OpenAI implementation.
//! Transport-agnostic; the chat orchestrator owns message assembly (system
//! instruction, history window, current question), so implementations send
//! the given messages as-is.

use anyhow::Result;
use async_trait::async_trait;
use openai_client::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
};
use prompt::{ChatMessage, MessageRole};

mod config;
mod openai_completion;

pub use config::{CompletionConfig, EnvCompletionConfig};
pub use openai_completion::OpenAICompletion;

/// Completion client interface: request a reply from an ordered list of messages.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Returns the model reply text for the given messages (system/user/assistant).
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String>;

    /// Name of the underlying model, for reporting in replies.
    fn model_name(&self) -> &str;
}

/// Converts a single [`ChatMessage`] into OpenAI API message format.
pub(crate) fn chat_message_to_openai(msg: &ChatMessage) -> Result<ChatCompletionRequestMessage> {
    let content = msg.content.clone();
    let openai_msg: ChatCompletionRequestMessage = match msg.role {
        MessageRole::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        MessageRole::User => ChatCompletionRequestUserMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        MessageRole::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
            .content(content)
            .build()?
            .into(),
    };
    Ok(openai_msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_all_roles() {
        for msg in [
            ChatMessage::system("s"),
            ChatMessage::user("u"),
            ChatMessage::assistant("a"),
        ] {
            assert!(chat_message_to_openai(&msg).is_ok());
        }
    }
}
