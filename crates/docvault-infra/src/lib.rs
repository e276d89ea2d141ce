//! # DocVault Infrastructure
//!
//! Concrete implementations of the ports defined in `docvault-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory and detached stores only
//! - `http` - HTTP transport via reqwest
//! - `file-store` - JSON session file under the platform data directory

pub mod storage;

#[cfg(feature = "http")]
pub mod http;

// Re-exports - Session stores
pub use storage::{DetachedSessionStore, InMemorySessionStore};

#[cfg(feature = "file-store")]
pub use storage::{FileSessionStore, StorageError};

// Re-exports - HTTP
#[cfg(feature = "http")]
pub use http::{DEFAULT_API_URL, HttpConfig, ReqwestTransport};
