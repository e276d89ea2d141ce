//! Typed access to the persisted session.

use std::sync::Arc;

use tokio::sync::watch;

use crate::domain::User;
use crate::ports::{SessionStore, StorageKey};

/// Typed view over a [`SessionStore`].
///
/// Tokens are written in pairs; only a refresh replaces the access token on
/// its own. Empty strings read as absent.
///
/// Clones share the store and the expiry counter.
#[derive(Clone)]
pub struct SessionStorage {
    store: Arc<dyn SessionStore>,
    expired: Arc<watch::Sender<u64>>,
}

impl SessionStorage {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        let (expired, _) = watch::channel(0);
        Self {
            store,
            expired: Arc::new(expired),
        }
    }

    async fn read(&self, key: StorageKey) -> Option<String> {
        self.store
            .get(key.as_str())
            .await
            .filter(|value| !value.is_empty())
    }

    pub async fn access_token(&self) -> Option<String> {
        self.read(StorageKey::AccessToken).await
    }

    pub async fn refresh_token(&self) -> Option<String> {
        self.read(StorageKey::RefreshToken).await
    }

    pub async fn set_tokens(&self, access: &str, refresh: &str) {
        self.store.set(StorageKey::AccessToken.as_str(), access).await;
        self.store.set(StorageKey::RefreshToken.as_str(), refresh).await;
    }

    /// Replace the access token, keeping the stored refresh token.
    pub async fn set_access_token(&self, access: &str) {
        self.store.set(StorageKey::AccessToken.as_str(), access).await;
    }

    /// Cached profile. A value that no longer deserializes reads as absent.
    pub async fn user(&self) -> Option<User> {
        let raw = self.read(StorageKey::UserData).await?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring unreadable cached user");
                None
            }
        }
    }

    pub async fn set_user(&self, user: &User) {
        match serde_json::to_string(user) {
            Ok(raw) => self.store.set(StorageKey::UserData.as_str(), &raw).await,
            Err(e) => tracing::warn!(error = %e, "Failed to serialize user for storage"),
        }
    }

    /// Remove every session entry.
    pub async fn clear(&self) {
        for key in StorageKey::ALL {
            self.store.remove(key.as_str()).await;
        }
    }

    /// Clear a session the server no longer accepts and bump the expiry
    /// counter.
    pub async fn expire(&self) {
        self.clear().await;
        self.expired.send_modify(|count| *count += 1);
    }

    /// Number of sessions ended by [`SessionStorage::expire`] so far.
    pub fn expirations(&self) -> u64 {
        *self.expired.borrow()
    }

    pub fn subscribe_expired(&self) -> watch::Receiver<u64> {
        self.expired.subscribe()
    }
}
