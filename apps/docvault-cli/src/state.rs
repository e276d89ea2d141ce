//! Application state - the client and the state machines shared by commands.

use std::sync::Arc;

use docvault_core::ApiClient;
use docvault_core::hooks::{AuthSession, DocumentLibrary};
use docvault_core::ports::{Navigator, SessionStore};
use docvault_infra::{DetachedSessionStore, FileSessionStore, InMemorySessionStore, ReqwestTransport};

use crate::config::{ClientConfig, SessionBackend, SessionConfig};
use crate::navigator::TerminalNavigator;

pub struct AppState {
    pub client: Arc<ApiClient>,
    pub auth: AuthSession,
    pub documents: DocumentLibrary,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &ClientConfig) -> anyhow::Result<Self> {
        let transport = Arc::new(ReqwestTransport::new(config.http.clone())?);
        let store = open_store(&config.session).await;
        let navigator: Arc<dyn Navigator> = Arc::new(TerminalNavigator);

        let client = Arc::new(ApiClient::new(transport, store, navigator.clone()));

        tracing::debug!(
            base_url = %config.http.base_url,
            backend = ?config.session.backend,
            "Application state initialized"
        );

        Ok(Self {
            auth: AuthSession::new(client.clone(), navigator),
            documents: DocumentLibrary::new(client.clone()),
            client,
        })
    }
}

async fn open_store(config: &SessionConfig) -> Arc<dyn SessionStore> {
    match config.backend {
        SessionBackend::File => {
            let path = config.file.clone().or_else(FileSessionStore::default_path);
            match path {
                Some(path) => Arc::new(FileSessionStore::open(path).await),
                None => {
                    tracing::warn!("No data directory on this platform. Session kept in memory.");
                    Arc::new(InMemorySessionStore::new())
                }
            }
        }
        SessionBackend::Memory => Arc::new(InMemorySessionStore::new()),
        SessionBackend::None => Arc::new(DetachedSessionStore),
    }
}
