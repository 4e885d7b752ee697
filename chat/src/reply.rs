//! Reply type returned from `send_message`.

use serde::Serialize;
use uuid::Uuid;

/// Outcome of one chat exchange.
///
/// `success: false` means the completion provider failed; `response` then
/// carries the fallback apology and `error` the sanitized provider error.
/// Validation and unknown-id failures are typed errors instead, not replies.
#[derive(Debug, Clone, Serialize)]
pub struct Reply {
    pub success: bool,
    pub conversation_id: Uuid,
    pub response: String,
    /// True iff retrieved knowledge was folded into the prompt.
    pub rag_context_used: bool,
    pub model_used: String,
    pub error: Option<String>,
}
