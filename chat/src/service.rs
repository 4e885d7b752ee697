//! Chat service: the send-message flow and the conversation surface.

use std::collections::HashMap;
use std::sync::Arc;

use conversation::{Conversation, ConversationStore, ConversationSummary, Turn};
use llm_client::CompletionService;
use plantbot_core::{ChatError, Result};
use prompt::{ChatMessage, PLANT_SYSTEM_PROMPT};
use retrieval::ContextRetriever;
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::reply::Reply;

/// Maximum stored turns included in the model-facing window (5 exchanges).
/// Older turns stay in the store but are excluded from completion input.
pub const MAX_MODEL_WINDOW_TURNS: usize = 10;

/// Response body returned when the completion provider fails.
pub const FALLBACK_RESPONSE: &str =
    "I'm sorry, I'm having trouble responding right now. Please try again later.";

/// Orchestrates conversations: state resolution, context retrieval, model
/// window assembly, completion, and transcript append.
pub struct ChatService {
    store: ConversationStore,
    completion: Arc<dyn CompletionService>,
    retriever: Option<Arc<ContextRetriever>>,
    /// Per-conversation locks serializing concurrent sends on the same id,
    /// so each accepted call appends exactly one user/assistant pair.
    locks: Mutex<HashMap<Uuid, Arc<Mutex<()>>>>,
}

impl ChatService {
    pub fn new(
        store: ConversationStore,
        completion: Arc<dyn CompletionService>,
        retriever: Option<Arc<ContextRetriever>>,
    ) -> Self {
        Self {
            store,
            completion,
            retriever,
            locks: Mutex::new(HashMap::new()),
        }
    }

    async fn lock_for(&self, id: Uuid) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks.entry(id).or_default().clone()
    }

    async fn drop_lock(&self, id: Uuid) {
        let mut locks = self.locks.lock().await;
        locks.remove(&id);
    }

    /// Handles one user message.
    ///
    /// Without a conversation id a new conversation is created; a supplied
    /// but unknown id is an error, never an implicit new conversation. The
    /// asymmetry is deliberate and part of the contract.
    #[instrument(skip(self, message, owner), fields(conversation_id = ?conversation_id))]
    pub async fn send_message(
        &self,
        message: &str,
        conversation_id: Option<Uuid>,
        owner: Option<String>,
    ) -> Result<Reply> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ChatError::InvalidInput(
                "No message provided. Please include a message in your request.".to_string(),
            ));
        }

        let id = match conversation_id {
            Some(id) => {
                // Existence check up front; unknown ids never create state.
                self.store.get(id).await?.id
            }
            None => self.store.create(owner).await.id,
        };

        let lock = self.lock_for(id).await;
        let _guard = lock.lock().await;

        // Snapshot under the per-id lock so the window reflects every
        // previously accepted exchange.
        let transcript = self.store.get(id).await?;
        let messages = self.assemble_window(&transcript, message).await;
        let rag_context_used = messages.rag_context_used;

        info!(
            conversation_id = %id,
            window_len = messages.window.len(),
            rag_context_used,
            "Requesting chat completion"
        );

        let reply_text = match self.completion.complete(messages.window).await {
            Ok(text) => text,
            Err(e) => {
                warn!(conversation_id = %id, error = %e, "Chat completion failed");
                // No partial turn is persisted on failure.
                return Ok(Reply {
                    success: false,
                    conversation_id: id,
                    response: FALLBACK_RESPONSE.to_string(),
                    rag_context_used,
                    model_used: self.completion.model_name().to_string(),
                    error: Some(format!("Chat error: {}", e)),
                });
            }
        };

        self.store
            .append_exchange(id, Turn::user(message), Turn::assistant(reply_text.clone()))
            .await?;

        Ok(Reply {
            success: true,
            conversation_id: id,
            response: reply_text,
            rag_context_used,
            model_used: self.completion.model_name().to_string(),
            error: None,
        })
    }

    /// Builds the outbound message list: system instruction (with retrieval
    /// context folded in when present), the bounded history window, then the
    /// new user message.
    async fn assemble_window(&self, transcript: &Conversation, message: &str) -> AssembledWindow {
        let context = match &self.retriever {
            Some(retriever) => retriever.context_for_chat(message).await,
            None => String::new(),
        };
        let rag_context_used = !context.is_empty();

        let system_content = if rag_context_used {
            format!("{}\n\n{}", PLANT_SYSTEM_PROMPT, context)
        } else {
            PLANT_SYSTEM_PROMPT.to_string()
        };

        let mut window = Vec::with_capacity(transcript.turns.len().min(MAX_MODEL_WINDOW_TURNS) + 2);
        window.push(ChatMessage::system(system_content));

        let skip = transcript.turns.len().saturating_sub(MAX_MODEL_WINDOW_TURNS);
        for turn in transcript.turns.iter().skip(skip) {
            window.push(ChatMessage {
                role: turn.role,
                content: turn.content.clone(),
            });
        }

        window.push(ChatMessage::user(message));

        AssembledWindow {
            window,
            rag_context_used,
        }
    }

    /// Full transcript for a conversation id.
    pub async fn get_conversation(&self, id: Uuid) -> Result<Conversation> {
        self.store.get(id).await
    }

    /// Conversation summaries for an owner, most recently active first.
    pub async fn list_conversations(&self, owner: &str) -> Vec<ConversationSummary> {
        self.store.list_by_owner(owner).await
    }

    /// Deletes one conversation; true if it existed.
    pub async fn delete_conversation(&self, id: Uuid) -> bool {
        let removed = self.store.delete(id).await;
        if removed {
            self.drop_lock(id).await;
        }
        removed
    }

    /// Deletes all conversations and returns the pre-clear count.
    pub async fn clear_conversations(&self) -> usize {
        let count = self.store.clear().await;
        self.locks.lock().await.clear();
        count
    }
}

struct AssembledWindow {
    window: Vec<ChatMessage>,
    rag_context_used: bool,
}
