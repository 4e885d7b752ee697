//! Conversation, turn, and summary types.

use chrono::{DateTime, Utc};
use prompt::MessageRole;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Owner used when the caller supplies none.
pub const DEFAULT_OWNER: &str = "anonymous";

/// One role-tagged message within a conversation. Immutable once appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// A conversation transcript: id, owner, timestamps, and ordered turns
/// (oldest first).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: Uuid,
    pub owner: String,
    pub created_at: DateTime<Utc>,
    pub last_activity_at: DateTime<Utc>,
    pub turns: Vec<Turn>,
}

impl Conversation {
    /// Creates an empty conversation with a fresh id; both timestamps are now.
    pub fn new(owner: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner: owner.into(),
            created_at: now,
            last_activity_at: now,
            turns: Vec::new(),
        }
    }

    /// Summary view used for per-owner listings.
    pub fn summary(&self) -> ConversationSummary {
        ConversationSummary {
            id: self.id,
            created_at: self.created_at,
            last_activity_at: self.last_activity_at,
            message_count: self.turns.len(),
            last_message: self.turns.last().map(|t| t.content.clone()),
        }
    }
}

/// Lightweight conversation listing entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub last_activity_at: DateTime<Utc>,
    pub message_count: usize,
    pub last_message: Option<String>,
}
