//! Where the admin credentials live.
//!
//! There is exactly one admin account. Its username and password hash come
//! from a [`CredentialStore`]: in memory by default, or a JSON file when
//! `CREDENTIALS_PATH` is configured so a changed password survives restarts.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use falls_store::document::JsonDocument;
use falls_store::models::credentials::StoredCredentials;
use falls_store::StoreError;
use tokio::sync::RwLock;

use crate::auth::password::hash_password;
use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};

#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// The credentials currently in force.
    async fn current(&self) -> StoredCredentials;

    /// Replace the stored credentials.
    async fn replace(&self, credentials: StoredCredentials) -> Result<(), StoreError>;
}

/// Credentials held only for the lifetime of the process.
pub struct InMemoryCredentialStore {
    inner: RwLock<StoredCredentials>,
}

impl InMemoryCredentialStore {
    pub fn new(initial: StoredCredentials) -> Self {
        Self {
            inner: RwLock::new(initial),
        }
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn current(&self) -> StoredCredentials {
        self.inner.read().await.clone()
    }

    async fn replace(&self, credentials: StoredCredentials) -> Result<(), StoreError> {
        *self.inner.write().await = credentials;
        Ok(())
    }
}

/// Credentials persisted to a JSON file.
///
/// A missing or unreadable file falls back to `defaults`.
pub struct FileCredentialStore {
    document: JsonDocument<StoredCredentials>,
    defaults: StoredCredentials,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>, defaults: StoredCredentials) -> Self {
        Self {
            document: JsonDocument::new(path),
            defaults,
        }
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn current(&self) -> StoredCredentials {
        let stored = self.document.load().await;
        if stored.is_empty() {
            self.defaults.clone()
        } else {
            stored
        }
    }

    async fn replace(&self, credentials: StoredCredentials) -> Result<(), StoreError> {
        let doc = self.document.lock().await;
        // Keeps a copy of a damaged file before it is replaced.
        doc.load().await?;
        doc.save(&credentials).await
    }
}

/// Build the credential store described by `config`, seeded with the
/// configured default username and password.
pub fn build_credential_store(config: &ServerConfig) -> AppResult<Arc<dyn CredentialStore>> {
    let password_hash = hash_password(&config.admin_password)
        .map_err(|e| AppError::InternalError(format!("Failed to hash admin password: {e}")))?;
    let defaults = StoredCredentials {
        username: config.admin_username.clone(),
        password_hash,
    };

    let store: Arc<dyn CredentialStore> = match &config.credentials_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "Using file-backed admin credentials");
            Arc::new(FileCredentialStore::new(path.clone(), defaults))
        }
        None => {
            tracing::info!("Using in-memory admin credentials");
            Arc::new(InMemoryCredentialStore::new(defaults))
        }
    };
    Ok(store)
}
