//! Session store implementations - on-disk, in-memory and detached.

mod detached;
mod memory;

#[cfg(feature = "file-store")]
mod file;

pub use detached::DetachedSessionStore;
pub use memory::InMemorySessionStore;

#[cfg(feature = "file-store")]
pub use file::{FileSessionStore, StorageError};
