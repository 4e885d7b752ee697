//! Conversation store: owns the id → conversation mapping.
//!
//! ## Thread Safety
//!
//! The store uses `Arc<RwLock<>>` so it can be cloned into the orchestrator
//! and queried concurrently. Appends for the same conversation must be
//! serialized by the caller (the orchestrator holds a per-id lock); the store
//! itself only guarantees that each `append_exchange` lands atomically.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use plantbot_core::{ChatError, Result};
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::types::{Conversation, ConversationSummary, Turn, DEFAULT_OWNER};

/// In-memory conversation store.
#[derive(Debug, Clone, Default)]
pub struct ConversationStore {
    conversations: Arc<RwLock<HashMap<Uuid, Conversation>>>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new conversation and returns a snapshot of it.
    /// `None` owner falls back to the anonymous sentinel.
    pub async fn create(&self, owner: Option<String>) -> Conversation {
        let owner = owner
            .filter(|o| !o.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_OWNER.to_string());
        let conversation = Conversation::new(owner);

        info!(
            conversation_id = %conversation.id,
            owner = %conversation.owner,
            "Created conversation"
        );

        let mut conversations = self.conversations.write().await;
        conversations.insert(conversation.id, conversation.clone());
        conversation
    }

    /// Returns a snapshot of the conversation, or `ConversationNotFound`.
    pub async fn get(&self, id: Uuid) -> Result<Conversation> {
        let conversations = self.conversations.read().await;
        conversations
            .get(&id)
            .cloned()
            .ok_or(ChatError::ConversationNotFound(id))
    }

    /// Appends a user/assistant turn pair under one write lock and bumps
    /// `last_activity_at`. Both turns land or neither does.
    pub async fn append_exchange(
        &self,
        id: Uuid,
        user_turn: Turn,
        assistant_turn: Turn,
    ) -> Result<()> {
        let mut conversations = self.conversations.write().await;
        let conversation = conversations
            .get_mut(&id)
            .ok_or(ChatError::ConversationNotFound(id))?;

        conversation.turns.push(user_turn);
        conversation.turns.push(assistant_turn);
        conversation.last_activity_at = Utc::now();

        info!(
            conversation_id = %id,
            message_count = conversation.turns.len(),
            "Appended exchange to conversation"
        );
        Ok(())
    }

    /// Lists conversations for an owner, most recently active first.
    pub async fn list_by_owner(&self, owner: &str) -> Vec<ConversationSummary> {
        let conversations = self.conversations.read().await;
        let mut summaries: Vec<ConversationSummary> = conversations
            .values()
            .filter(|c| c.owner == owner)
            .map(|c| c.summary())
            .collect();

        summaries.sort_by(|a, b| b.last_activity_at.cmp(&a.last_activity_at));
        summaries
    }

    /// Removes a conversation. Returns true if it existed.
    pub async fn delete(&self, id: Uuid) -> bool {
        let mut conversations = self.conversations.write().await;
        let removed = conversations.remove(&id).is_some();
        info!(conversation_id = %id, removed, "Delete conversation");
        removed
    }

    /// Removes all conversations and returns how many there were.
    pub async fn clear(&self) -> usize {
        let mut conversations = self.conversations.write().await;
        let count = conversations.len();
        conversations.clear();
        info!(count, "Cleared all conversations");
        count
    }

    /// Number of stored conversations.
    pub async fn len(&self) -> usize {
        let conversations = self.conversations.read().await;
        conversations.len()
    }

    /// Returns true if no conversations are stored.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
