//! chat_core - Core types and fixed reply content for the chat engine
//!
//! This crate provides the foundational pieces used across the chat crates:
//! - `message` - ChatMessage, Role, MessageId and its generator
//! - `prompt` - persona preamble and remote prompt assembly
//! - `replies` - greeting, apology, and the keyword-matched fallback replies

pub mod message;
pub mod prompt;
pub mod replies;

// Re-export commonly used types
pub use message::{ChatMessage, IdGenerator, MessageId, Role};
pub use prompt::{build_prompt, CONTEXT_PLACEHOLDER, XIAOLIN_SYSTEM_PROMPT};
pub use replies::{find_fallback_reply, greeting, APOLOGY, GENERIC_FALLBACK, GREETING, GREETING_NO_KEY};
