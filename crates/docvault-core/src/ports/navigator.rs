//! Navigation port - how the client asks its host to change screens.

/// Client-side destinations the session layer can send the user to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Login entry point, used when the session is gone.
    Login,
    /// Authenticated landing area.
    Dashboard,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Dashboard => "/dashboard",
        }
    }
}

/// Host-provided navigation (browser router, terminal hint, test recorder).
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}
