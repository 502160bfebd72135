//! Access control for the two client views.
//!
//! [`AuthGate`] holds no state of its own: every query re-reads the
//! [`CredentialStore`], so the gate can never disagree with it.

use std::sync::Arc;

use super::credentials::CredentialStore;
use crate::error::CredentialError;

/// Whether the user may see product data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    Authenticated,
}

/// Views the UI shell can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// The product table. Requires a key.
    Products,
    /// The API key entry form. Only reachable without a key.
    Auth,
}

/// Outcome of [`AuthGate::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Show the requested view.
    Render(Route),
    /// Replace the current location with another view.
    Redirect(Route),
}

impl RouteDecision {
    /// The view that ends up on screen.
    pub fn target(&self) -> Route {
        match self {
            RouteDecision::Render(route) | RouteDecision::Redirect(route) => *route,
        }
    }
}

/// Projection of credential presence onto [`AuthState`].
#[derive(Debug, Clone)]
pub struct AuthGate {
    credentials: Arc<CredentialStore>,
}

impl AuthGate {
    pub fn new(credentials: Arc<CredentialStore>) -> Self {
        Self { credentials }
    }

    pub fn state(&self) -> AuthState {
        if self.credentials.is_present() {
            AuthState::Authenticated
        } else {
            AuthState::Unauthenticated
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state() == AuthState::Authenticated
    }

    /// Handle a submission of the API key form.
    pub fn submit(&self, value: &str) -> Result<AuthState, CredentialError> {
        self.credentials.save(value)?;
        Ok(self.state())
    }

    /// Decide what to show when the shell navigates to `requested`.
    pub fn resolve(&self, requested: Route) -> RouteDecision {
        match (requested, self.state()) {
            (Route::Products, AuthState::Unauthenticated) => RouteDecision::Redirect(Route::Auth),
            (Route::Auth, AuthState::Authenticated) => RouteDecision::Redirect(Route::Products),
            (route, _) => RouteDecision::Render(route),
        }
    }

    /// Message explaining a forced logout, for the API key form.
    pub fn login_error(&self) -> Option<String> {
        self.credentials.auth_error().map(|e| e.user_message())
    }
}
