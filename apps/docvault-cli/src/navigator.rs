//! Terminal rendition of client-side navigation.

use docvault_core::ports::{Navigator, Route};

/// Turns route changes into hints on stderr.
pub struct TerminalNavigator;

impl TerminalNavigator {
    fn hint(route: Route) -> &'static str {
        match route {
            Route::Login => "Session terminée. Connectez-vous avec `docvault login`.",
            Route::Dashboard => "Connecté. Vos documents: `docvault documents list`.",
        }
    }
}

impl Navigator for TerminalNavigator {
    fn navigate(&self, route: Route) {
        tracing::info!(route = route.path(), "Navigation requested");
        eprintln!("{}", Self::hint(route));
    }
}
