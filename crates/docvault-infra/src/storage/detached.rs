use async_trait::async_trait;

use docvault_core::ports::SessionStore;

/// Store for hosts without any persistence medium.
///
/// Reads always miss and writes are dropped, so every run starts signed out.
#[derive(Debug, Default, Clone, Copy)]
pub struct DetachedSessionStore;

#[async_trait]
impl SessionStore for DetachedSessionStore {
    async fn get(&self, _key: &str) -> Option<String> {
        None
    }

    async fn set(&self, key: &str, _value: &str) {
        tracing::trace!(key, "Session store detached, write dropped");
    }

    async fn remove(&self, _key: &str) {}
}
