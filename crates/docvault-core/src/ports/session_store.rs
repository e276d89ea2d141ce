//! Session store port - where tokens and the cached profile survive restarts.

use async_trait::async_trait;

/// Key/value storage for the client session.
///
/// Implementations never fail from the caller's point of view: a store
/// without a persistence medium reads `None` and drops writes. Backends log
/// their own I/O problems.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read a value.
    async fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str);

    /// Remove a value. Removing a missing key is not an error.
    async fn remove(&self, key: &str);
}

/// The three entries making up a persisted session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    AccessToken,
    RefreshToken,
    UserData,
}

impl StorageKey {
    pub const ALL: [StorageKey; 3] = [Self::AccessToken, Self::RefreshToken, Self::UserData];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::AccessToken => "access_token",
            Self::RefreshToken => "refresh_token",
            Self::UserData => "user_data",
        }
    }
}
