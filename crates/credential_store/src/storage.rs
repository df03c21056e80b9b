//! Credential storage trait and implementations

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tokio::fs;

#[derive(Serialize, Deserialize)]
struct StoredCredential {
    api_key: String,
}

/// Backing storage for the credential
#[async_trait]
pub trait CredentialStorage: Send + Sync {
    /// Load the stored credential, `None` when nothing is stored
    async fn load(&self) -> Result<Option<String>>;

    /// Persist a credential
    async fn save(&self, value: &str) -> Result<()>;

    /// Remove the stored credential
    async fn clear(&self) -> Result<()>;
}

/// File-based credential storage
#[derive(Clone)]
pub struct FileCredentialStorage {
    path: PathBuf,
}

impl FileCredentialStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl CredentialStorage for FileCredentialStorage {
    async fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path).await?;
        let stored: StoredCredential = serde_json::from_str(&contents)?;

        Ok(Some(stored.api_key))
    }

    async fn save(&self, value: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let stored = StoredCredential {
            api_key: value.to_string(),
        };
        let contents = serde_json::to_string_pretty(&stored)?;

        fs::write(&self.path, contents).await?;

        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path).await?;
        }

        Ok(())
    }
}

/// In-memory credential storage, useful in tests and ephemeral sessions
#[derive(Default)]
pub struct MemoryCredentialStorage {
    value: RwLock<Option<String>>,
}

impl MemoryCredentialStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: RwLock::new(Some(value.into())),
        }
    }
}

#[async_trait]
impl CredentialStorage for MemoryCredentialStorage {
    async fn load(&self) -> Result<Option<String>> {
        Ok(self.value.read().expect("credential lock poisoned").clone())
    }

    async fn save(&self, value: &str) -> Result<()> {
        *self.value.write().expect("credential lock poisoned") = Some(value.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.value.write().expect("credential lock poisoned") = None;
        Ok(())
    }
}
