//! Error taxonomy for the conversation and retrieval core.
//!
//! Provider-facing traits (embedding, completion, vector index) stay on
//! `anyhow::Error`; the chat core converts those into the typed variants here
//! before they reach callers.

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum ChatError {
    /// Empty or malformed user input; user-correctable, never retried.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A caller-supplied conversation id that does not exist.
    #[error("Conversation not found: {0}")]
    ConversationNotFound(Uuid),

    /// Chat completion provider failure.
    #[error("Completion error: {0}")]
    Completion(String),

    /// Embedding provider failure.
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Vector index failure (create, upsert, or query).
    #[error("Index error: {0}")]
    Index(String),

    /// The knowledge catalogue could not be read or parsed.
    #[error("Knowledge data unavailable: {0}")]
    DataUnavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ChatError>;
