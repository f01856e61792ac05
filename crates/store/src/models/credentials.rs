//! Persisted admin credentials.

use serde::{Deserialize, Serialize};

/// Contents of the optional credentials file.
///
/// Only an argon2id PHC hash is stored, never the password itself. An empty
/// value (missing or unreadable file) means "use the configured defaults".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredCredentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password_hash: String,
}

impl StoredCredentials {
    pub fn is_empty(&self) -> bool {
        self.username.is_empty() || self.password_hash.is_empty()
    }
}
