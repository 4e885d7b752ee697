//! # Prompt
//!
//! Message types shared by the conversation store and the completion client,
//! plus the fixed plant-care assistant instruction.
//!
//! ## External interactions
//!
//! - **AI models**: `ChatMessage` maps one-to-one onto an element of the
//!   OpenAI Chat Completions `messages` array.

use serde::{Deserialize, Serialize};

/// Role of a message, one-to-one with OpenAI Chat Completions API `role` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instruction (API `role: "system"`).
    System,
    /// User message (API `role: "user"`).
    User,
    /// Assistant message (API `role: "assistant"`).
    Assistant,
}

/// A single chat message, one-to-one with one element of OpenAI `messages` array.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Fixed system instruction sent as the first message of every completion call.
pub const PLANT_SYSTEM_PROMPT: &str = "You are a helpful plant care assistant. You can answer questions about:\n\
- Plant identification\n\
- Plant care and maintenance\n\
- Common plant problems and solutions\n\
- Growing tips and advice\n\
- Plant diseases and pests\n\n\
Be friendly, informative, and practical in your responses. If you're unsure about something, \
recommend consulting with a local plant expert or nursery.";

/// Header line for retrieved context in chat prompts.
pub const SECTION_CHAT_CONTEXT: &str = "Relevant information from local plant database:";

/// Header line for retrieved context in diagnosis prompts.
pub const SECTION_DIAGNOSIS_CONTEXT: &str = "Relevant plant information from local database:";
