//! In-memory session store - the session lives as long as the process.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use docvault_core::ports::SessionStore;

/// Session store backed by a HashMap with an async RwLock.
///
/// Note: the session is lost when the process exits.
pub struct InMemorySessionStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, key: &str) -> Option<String> {
        self.entries.read().await.get(key).cloned()
    }

    async fn set(&self, key: &str, value: &str) {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), value.to_string());
    }

    async fn remove(&self, key: &str) {
        let mut entries = self.entries.write().await;
        entries.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_and_get() {
        let store = InMemorySessionStore::new();
        store.set("access_token", "abc").await;
        assert_eq!(store.get("access_token").await, Some("abc".to_string()));

        store.set("access_token", "def").await;
        assert_eq!(store.get("access_token").await, Some("def".to_string()));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_remove() {
        let store = InMemorySessionStore::new();
        store.set("refresh_token", "r").await;
        store.remove("refresh_token").await;
        store.remove("never_set").await;
        assert_eq!(store.get("refresh_token").await, None);
    }
}
