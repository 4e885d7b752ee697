//! # Chat
//!
//! The top-level conversation orchestrator.
//!
//! [`ChatService`] resolves or creates conversation state, optionally pulls
//! retrieval context from the plant knowledge base, assembles the bounded
//! model-facing message window, invokes the completion provider, and appends
//! the resulting turn pair to the conversation store. Completion failures
//! leave the store untouched and surface as an unsuccessful [`Reply`] with a
//! fallback message.

mod reply;
mod service;

pub use reply::Reply;
pub use service::{ChatService, FALLBACK_RESPONSE, MAX_MODEL_WINDOW_TURNS};
