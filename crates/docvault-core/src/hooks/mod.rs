//! UI-agnostic state machines driving the client: authentication and the
//! document library. Each publishes its state on a `tokio::sync::watch`
//! channel.

mod auth;
mod documents;

pub use auth::{AuthEvent, AuthPhase, AuthSession, AuthState};
pub use documents::{DocumentLibrary, DocumentsState, UploadProgress};
