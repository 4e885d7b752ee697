//! # Conversation
//!
//! Multi-turn conversation state for the chat core.
//!
//! A [`Conversation`] is an ordered transcript of [`Turn`]s tied to one id
//! and owner. [`ConversationStore`] owns the id → state mapping for the
//! process lifetime; state is transient and lost on restart. Only the chat
//! orchestrator mutates conversations, and always by appending a full
//! user/assistant pair, so transcripts stay even-length between requests.

mod store;
mod types;

pub use store::ConversationStore;
pub use types::{Conversation, ConversationSummary, Turn, DEFAULT_OWNER};
