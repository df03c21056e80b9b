//! Gemini wire format, trimmed to the text-only subset this engine uses.
//!
//! Gemini calls messages "contents", each holding an array of "parts", and
//! the assistant role is "model" rather than "assistant".
//!
//! # Example request
//! ```json
//! {
//!   "contents": [
//!     {
//!       "role": "user",
//!       "parts": [{"text": "Hello"}]
//!     }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Gemini request format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiRequest {
    pub contents: Vec<GeminiContent>,
}

/// Gemini message/content format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiContent {
    /// "user" or "model" (not "assistant")
    pub role: String,
    pub parts: Vec<GeminiPart>,
}

/// Gemini content part
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Gemini response format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
}

/// Gemini response candidate
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiCandidate {
    pub content: GeminiContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

impl GeminiRequest {
    /// A single-turn request carrying the whole prompt as one user message.
    pub fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![GeminiContent {
                role: "user".to_string(),
                parts: vec![GeminiPart {
                    text: Some(prompt.to_string()),
                }],
            }],
        }
    }
}

impl GeminiResponse {
    /// Text of the first candidate, `None` when the response carries none.
    pub fn into_text(self) -> Option<String> {
        let candidate = self.candidates.into_iter().next()?;
        let text: String = candidate
            .content
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect();

        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}
