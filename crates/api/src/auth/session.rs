//! Registry of live sessions.
//!
//! A token is only accepted while its `jti` is registered here. Logout
//! removes the entry; expired entries are pruned whenever a new session is
//! inserted. The registry is in memory, so a restart logs everybody out.

use std::collections::HashMap;

use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct SessionRegistry {
    /// `jti` to expiry (UTC Unix timestamp).
    sessions: RwLock<HashMap<String, i64>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, jti: &str, expires_at: i64) {
        let now = chrono::Utc::now().timestamp();
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, exp| *exp > now);
        sessions.insert(jti.to_string(), expires_at);
    }

    /// Whether `jti` is registered and not past its expiry.
    pub async fn is_active(&self, jti: &str) -> bool {
        let now = chrono::Utc::now().timestamp();
        self.sessions
            .read()
            .await
            .get(jti)
            .is_some_and(|exp| *exp > now)
    }

    /// Forget a session. Returns whether it was registered.
    pub async fn revoke(&self, jti: &str) -> bool {
        self.sessions.write().await.remove(jti).is_some()
    }

    /// Drop every session except `keep`, e.g. after the password changed.
    pub async fn revoke_all_except(&self, keep: &str) {
        self.sessions.write().await.retain(|jti, _| jti == keep);
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
