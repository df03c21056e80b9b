//! gemini_client - Google Gemini remote model collaborator
//!
//! One opaque prompt string in, one opaque text reply out, over a single
//! non-streaming `generateContent` call. The API credential is passed per
//! call rather than held by the client, so the caller stays in charge of
//! the credential lifecycle.

mod client;
mod error;
mod protocol;

pub use client::{GeminiClient, ModelClient, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use error::{ModelError, Result};
pub use protocol::{GeminiCandidate, GeminiContent, GeminiPart, GeminiRequest, GeminiResponse};
