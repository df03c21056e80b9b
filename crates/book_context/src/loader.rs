use crate::error::{ContextLoadError, Result};
use async_trait::async_trait;
use reqwest::Client;

/// Well-known path of the book document, relative to the deployed app.
pub const DEFAULT_DOCUMENT: &str = "book.md";

/// Character budget for the reference context supplied to remote prompts.
pub const MAX_CONTEXT_CHARS: usize = 15_000;

/// Source of the reference context text.
#[async_trait]
pub trait ReferenceLoader: Send + Sync {
    async fn load(&self) -> Result<String>;
}

/// Fetches the book document over HTTP and truncates it to the budget.
pub struct BookContextLoader {
    client: Client,
    base_url: String,
    document: String,
    char_limit: usize,
}

impl BookContextLoader {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            document: DEFAULT_DOCUMENT.to_string(),
            char_limit: MAX_CONTEXT_CHARS,
        }
    }

    /// Fetch a different document name under the same base URL.
    pub fn with_document(mut self, name: impl Into<String>) -> Self {
        self.document = name.into();
        self
    }

    /// Override the character budget.
    pub fn with_char_limit(mut self, limit: usize) -> Self {
        self.char_limit = limit;
        self
    }

    fn document_url(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), self.document)
    }
}

#[async_trait]
impl ReferenceLoader for BookContextLoader {
    async fn load(&self) -> Result<String> {
        let url = self.document_url();
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(ContextLoadError::Status(response.status()));
        }

        let text = response.text().await?;
        let truncated = truncate_chars(&text, self.char_limit);

        tracing::info!(
            url = %url,
            chars = truncated.chars().count(),
            "reference document loaded"
        );

        Ok(truncated)
    }
}

/// Keeps the first `limit` characters, respecting char boundaries.
pub fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
