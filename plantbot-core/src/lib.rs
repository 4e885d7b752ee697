//! # Plantbot Core
//!
//! Shared building blocks for the plantbot workspace: the error taxonomy used
//! by the conversation/chat core and the global tracing initialization.

pub mod error;
pub mod logger;

pub use error::{ChatError, Result};
pub use logger::init_tracing;
