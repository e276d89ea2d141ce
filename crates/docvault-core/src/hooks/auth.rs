//! Authentication state of the application.
//!
//! [`AuthState::apply`] is a pure reducer over [`AuthEvent`]s; [`AuthSession`]
//! runs the side effects (API calls, navigation) and publishes every new state
//! on a watch channel.
//!
//! A session the client ends on its own (a token refresh the server refused)
//! is picked up through the storage expiry counter the next time the state is
//! read or changed.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use docvault_shared::dto::{LoginCredentials, RegisterData};
use docvault_shared::messages::success;
use tokio::sync::watch;

use crate::client::ApiClient;
use crate::domain::User;
use crate::error::ApiError;
use crate::ports::{Navigator, Route};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPhase {
    /// Stored session not checked yet.
    Bootstrapping,
    Authenticated,
    Unauthenticated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    /// A login or registration request went out.
    Started,
    /// A session was opened or restored.
    SignedIn(User),
    /// A login or registration attempt failed. Settles a state that was
    /// still bootstrapping as signed out.
    Failed,
    /// The profile was fetched again.
    ProfileUpdated(User),
    SignedOut,
}

/// Snapshot of the authentication state.
///
/// `user` is set exactly when the phase is [`AuthPhase::Authenticated`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthState {
    pub phase: AuthPhase,
    pub user: Option<User>,
    pub is_loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            phase: AuthPhase::Bootstrapping,
            user: None,
            is_loading: true,
        }
    }
}

impl AuthState {
    pub fn apply(&self, event: AuthEvent) -> Self {
        match event {
            AuthEvent::Started => Self {
                is_loading: true,
                ..self.clone()
            },
            AuthEvent::SignedIn(user) => Self {
                phase: AuthPhase::Authenticated,
                user: Some(user),
                is_loading: false,
            },
            AuthEvent::Failed if self.phase == AuthPhase::Bootstrapping => Self {
                phase: AuthPhase::Unauthenticated,
                user: None,
                is_loading: false,
            },
            AuthEvent::Failed => Self {
                is_loading: false,
                ..self.clone()
            },
            AuthEvent::ProfileUpdated(user) if self.is_authenticated() => Self {
                user: Some(user),
                ..self.clone()
            },
            AuthEvent::ProfileUpdated(_) => self.clone(),
            AuthEvent::SignedOut => Self {
                phase: AuthPhase::Unauthenticated,
                user: None,
                is_loading: false,
            },
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.phase == AuthPhase::Authenticated
    }

    /// Neither bootstrapping nor waiting on a login/registration.
    pub fn is_settled(&self) -> bool {
        !self.is_loading && self.phase != AuthPhase::Bootstrapping
    }
}

pub struct AuthSession {
    client: Arc<ApiClient>,
    navigator: Arc<dyn Navigator>,
    state: watch::Sender<AuthState>,
    /// Storage expiry count already folded into `state`.
    seen_expirations: AtomicU64,
}

impl AuthSession {
    pub fn new(client: Arc<ApiClient>, navigator: Arc<dyn Navigator>) -> Self {
        let (state, _) = watch::channel(AuthState::default());
        let seen_expirations = AtomicU64::new(client.storage().expirations());
        Self {
            client,
            navigator,
            state,
            seen_expirations,
        }
    }

    pub fn state(&self) -> AuthState {
        self.sync_expired_session();
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    fn dispatch(&self, event: AuthEvent) {
        self.sync_expired_session();
        self.state.send_modify(|state| *state = state.apply(event));
    }

    /// Publish a sign-out for every session the client expired since the last
    /// check.
    fn sync_expired_session(&self) {
        let expirations = self.client.storage().expirations();
        if self.seen_expirations.swap(expirations, Ordering::AcqRel) != expirations {
            tracing::info!("Session expired, signing out");
            self.state
                .send_modify(|state| *state = state.apply(AuthEvent::SignedOut));
        }
    }

    /// Validate the stored session against the server.
    ///
    /// A stored token is checked by fetching the profile; a session the server
    /// no longer accepts is cleared.
    pub async fn bootstrap(&self) {
        if !self.client.is_authenticated().await {
            self.dispatch(AuthEvent::SignedOut);
            return;
        }

        match self.client.get_profile().await {
            Ok(user) => {
                tracing::debug!(user_id = user.id, "Stored session restored");
                self.dispatch(AuthEvent::SignedIn(user));
            }
            Err(e) => {
                tracing::warn!(error = %e, "Stored session rejected, signing out");
                self.client.logout().await;
                self.dispatch(AuthEvent::SignedOut);
            }
        }
    }

    /// Returns the success message to show.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<&'static str, ApiError> {
        self.dispatch(AuthEvent::Started);
        match self.client.login(credentials).await {
            Ok(auth) => {
                self.dispatch(AuthEvent::SignedIn(auth.user));
                self.navigator.navigate(Route::Dashboard);
                Ok(success::LOGIN_SUCCESS)
            }
            Err(e) => {
                self.dispatch(AuthEvent::Failed);
                Err(e)
            }
        }
    }

    /// Returns the success message to show.
    pub async fn register(&self, data: &RegisterData) -> Result<&'static str, ApiError> {
        self.dispatch(AuthEvent::Started);
        match self.client.register(data).await {
            Ok(auth) => {
                self.dispatch(AuthEvent::SignedIn(auth.user));
                self.navigator.navigate(Route::Dashboard);
                Ok(success::REGISTER_SUCCESS)
            }
            Err(e) => {
                self.dispatch(AuthEvent::Failed);
                Err(e)
            }
        }
    }

    pub async fn logout(&self) {
        self.client.logout().await;
        self.dispatch(AuthEvent::SignedOut);
        self.navigator.navigate(Route::Login);
    }

    /// Re-fetch the profile. A failure leaves the state as it was.
    pub async fn update_user(&self) -> Result<User, ApiError> {
        match self.client.get_profile().await {
            Ok(user) => {
                self.dispatch(AuthEvent::ProfileUpdated(user.clone()));
                Ok(user)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Profile refresh failed");
                Err(e)
            }
        }
    }

    /// Guard for pages that need a session: sends a settled anonymous user to
    /// the login route.
    pub fn require_auth(&self) -> bool {
        let state = self.state();
        if state.is_settled() && !state.is_authenticated() {
            self.navigator.navigate(Route::Login);
            return false;
        }
        state.is_authenticated()
    }

    /// Guard for the login and register pages: sends a settled signed-in user
    /// to the dashboard.
    pub fn require_guest(&self) -> bool {
        let state = self.state();
        if state.is_settled() && state.is_authenticated() {
            self.navigator.navigate(Route::Dashboard);
            return false;
        }
        !state.is_authenticated()
    }
}
