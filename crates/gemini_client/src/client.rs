//! Google Gemini API client.

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{ModelError, Result};
use crate::protocol::{GeminiRequest, GeminiResponse};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Remote model seam: one opaque prompt in, one text reply out.
///
/// The credential travels with each call so that a key change never
/// requires rebuilding the client.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn generate(&self, api_key: &str, prompt: &str) -> Result<String>;
}

/// Google Gemini API client.
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Set a custom base URL (e.g., for proxies or alternative endpoints).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the model name (e.g., "gemini-2.0-flash").
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

impl Default for GeminiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ModelClient for GeminiClient {
    async fn generate(&self, api_key: &str, prompt: &str) -> Result<String> {
        let request = GeminiRequest::from_prompt(prompt);

        // Query-param authentication, as the Gemini API expects
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, api_key
        );

        log::debug!("Gemini request using model '{}'", self.model);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(ModelError::Http)?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.map_err(ModelError::Http)?;

            if status == 401 || status == 403 {
                return Err(ModelError::Auth(format!(
                    "Gemini authentication failed: {}. Please check your API key.",
                    text
                )));
            }

            return Err(ModelError::Api(format!(
                "Gemini API error: HTTP {}: {}",
                status, text
            )));
        }

        let parsed: GeminiResponse = response.json().await.map_err(ModelError::Http)?;

        parsed.into_text().ok_or(ModelError::EmptyResponse)
    }
}
