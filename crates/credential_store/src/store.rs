//! Credential store with read precedence over an environment default

use crate::error::Result;
use crate::storage::CredentialStorage;

/// Environment variable consulted when no credential is stored.
pub const DEFAULT_ENV_KEY: &str = "GEMINI_API_KEY";

/// Process-wide credential accessor.
///
/// Read precedence: explicitly stored value, then the environment default,
/// else absent.
pub struct CredentialStore<S: CredentialStorage> {
    storage: S,
    env_key: String,
}

impl<S: CredentialStorage> CredentialStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            env_key: DEFAULT_ENV_KEY.to_string(),
        }
    }

    /// Override the environment variable consulted as the default.
    pub fn with_env_key(mut self, name: impl Into<String>) -> Self {
        self.env_key = name.into();
        self
    }

    /// Resolve the current credential, if any.
    ///
    /// An unreadable store is treated as absent so a corrupt credential
    /// file can never take the session down.
    pub async fn get(&self) -> Option<String> {
        match self.storage.load().await {
            Ok(Some(value)) if !value.is_empty() => return Some(value),
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(error = %err, "failed to load stored credential, treating as absent");
            }
        }

        std::env::var(&self.env_key)
            .ok()
            .filter(|value| !value.is_empty())
    }

    pub async fn set(&self, value: &str) -> Result<()> {
        self.storage.save(value).await
    }

    pub async fn clear(&self) -> Result<()> {
        self.storage.clear().await
    }
}
