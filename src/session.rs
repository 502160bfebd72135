//! The state a UI shell holds for one running client.
//!
//! A [`Session`] owns the credential store, the auth gate and the sync
//! engine, and is handed to the shell explicitly. Shells drive it from two
//! places: navigation ([`Session::navigate`]) and the product view
//! ([`Session::on_products_view`] once per render pass, [`Session::retry`]
//! from the retry button).

use std::sync::{Arc, Mutex};

use crate::adapters::{FileStore, ReqwestHttpClient};
use crate::auth::{AuthGate, AuthState, Credential, CredentialStore, Route, RouteDecision};
use crate::config::ClientConfig;
use crate::error::{CredentialError, SetupError};
use crate::sync::{ProductSyncEngine, RefreshOutcome, SyncState};
use crate::traits::{HttpClient, KeyValueStore};

pub struct Session {
    credentials: Arc<CredentialStore>,
    gate: AuthGate,
    sync: ProductSyncEngine,
    /// Credential the automatic fetch last ran for.
    auto_fetched: Mutex<Option<Credential>>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("credentials", &self.credentials)
            .field("sync", &self.sync)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Wire a session from its collaborators.
    pub fn new(http: Arc<dyn HttpClient>, storage: Arc<dyn KeyValueStore>, base_url: &str) -> Self {
        let credentials = Arc::new(CredentialStore::load(storage));
        let gate = AuthGate::new(credentials.clone());
        let sync = ProductSyncEngine::new(http, credentials.clone(), base_url);

        tracing::info!(
            target: "pricewatch::session",
            endpoint = %sync.endpoint(),
            authenticated = credentials.is_present(),
            "Session started"
        );

        Self {
            credentials,
            gate,
            sync,
            auto_fetched: Mutex::new(None),
        }
    }

    /// Wire a session with the reqwest client and the JSON file store.
    pub fn from_config(config: &ClientConfig) -> Result<Self, SetupError> {
        let http = ReqwestHttpClient::with_timeout(config.request_timeout)?;
        let storage = match &config.storage_path {
            Some(path) => FileStore::at(path),
            None => FileStore::new()?,
        };
        Ok(Self::new(Arc::new(http), Arc::new(storage), &config.base_url))
    }

    pub fn credentials(&self) -> &Arc<CredentialStore> {
        &self.credentials
    }

    pub fn gate(&self) -> &AuthGate {
        &self.gate
    }

    pub fn sync(&self) -> &ProductSyncEngine {
        &self.sync
    }

    pub fn auth_state(&self) -> AuthState {
        self.gate.state()
    }

    /// Submit the API key form.
    ///
    /// A successful save drops any redirect left over from a rejected key.
    pub fn submit_api_key(&self, value: &str) -> Result<AuthState, CredentialError> {
        let state = self.gate.submit(value)?;
        self.sync.take_redirect_to_auth();
        Ok(state)
    }

    /// Decide what to render for `requested`.
    ///
    /// A pending redirect raised by a rejected credential is consumed here.
    pub fn navigate(&self, requested: Route) -> RouteDecision {
        if self.sync.take_redirect_to_auth() {
            tracing::info!(target: "pricewatch::session", "Redirecting to API key form");
            if requested != Route::Auth {
                return RouteDecision::Redirect(Route::Auth);
            }
        }
        self.gate.resolve(requested)
    }

    /// Run the automatic fetch if the credential changed since the last one.
    ///
    /// The first call after a credential becomes available fetches; later
    /// calls with the same credential are `Skipped`. Clearing the credential
    /// re-arms it, so entering a key again fetches again.
    pub async fn on_products_view(&self) -> RefreshOutcome {
        let current = self.credentials.get();
        {
            let mut last = self.auto_fetched.lock().unwrap_or_else(|e| e.into_inner());
            if current.is_none() || *last == current {
                *last = current;
                return RefreshOutcome::Skipped;
            }
            *last = current;
        }
        self.sync.refresh().await
    }

    /// Fetch again on user request.
    pub async fn retry(&self) -> RefreshOutcome {
        self.sync.refresh().await
    }

    pub fn snapshot(&self) -> SyncState {
        self.sync.snapshot()
    }

    /// Message for the API key form after a forced logout.
    pub fn login_error(&self) -> Option<String> {
        self.gate.login_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{InMemoryStore, MockHttpClient, MockResponse};
    use crate::error::SyncError;
    use crate::traits::API_KEY;

    const URL: &str = "http://prices.test/products";

    fn session(storage: InMemoryStore) -> (MockHttpClient, Session) {
        let http = MockHttpClient::new();
        let session = Session::new(Arc::new(http.clone()), Arc::new(storage), "http://prices.test");
        (http, session)
    }

    #[tokio::test]
    async fn test_auto_fetch_runs_once_per_credential() {
        let (http, session) = session(InMemoryStore::with_entry(API_KEY, "k1"));
        http.set_response(URL, MockResponse::status(200, "[]"));

        assert_eq!(session.on_products_view().await, RefreshOutcome::Updated { count: 0 });
        assert_eq!(session.on_products_view().await, RefreshOutcome::Skipped);
        assert_eq!(http.get_requests().len(), 1);

        session.submit_api_key("k2").unwrap();
        assert!(session.on_products_view().await.is_updated());
        assert_eq!(http.get_requests().len(), 2);
    }

    #[tokio::test]
    async fn test_auto_fetch_without_credential_is_skipped() {
        let (http, session) = session(InMemoryStore::new());

        assert_eq!(session.on_products_view().await, RefreshOutcome::Skipped);
        assert!(http.get_requests().is_empty());
        assert!(session.snapshot().loading);
    }

    #[tokio::test]
    async fn test_retry_always_fetches() {
        let (http, session) = session(InMemoryStore::with_entry(API_KEY, "k1"));
        http.set_response(URL, MockResponse::status(502, ""));

        session.on_products_view().await;
        let outcome = session.retry().await;

        assert!(outcome.error().is_some());
        assert_eq!(http.get_requests().len(), 2);
    }

    #[tokio::test]
    async fn test_unauthorized_redirects_and_rearms_auto_fetch() {
        let (http, session) = session(InMemoryStore::with_entry(API_KEY, "k1"));
        http.enqueue_response(URL, MockResponse::status(401, ""));
        http.set_response(URL, MockResponse::status(200, "[]"));

        let outcome = session.on_products_view().await;
        assert_eq!(outcome, RefreshOutcome::Failed(SyncError::Unauthorized));
        assert_eq!(session.auth_state(), AuthState::Unauthenticated);
        assert_eq!(session.login_error().as_deref(), Some("Invalid API key"));

        assert_eq!(
            session.navigate(Route::Products),
            RouteDecision::Redirect(Route::Auth)
        );
        assert_eq!(session.navigate(Route::Auth), RouteDecision::Render(Route::Auth));

        assert_eq!(session.on_products_view().await, RefreshOutcome::Skipped);

        session.submit_api_key("k1").unwrap();
        assert!(session.login_error().is_none());
        assert_eq!(
            session.navigate(Route::Auth),
            RouteDecision::Redirect(Route::Products)
        );
        assert!(session.on_products_view().await.is_updated());
    }

    #[tokio::test]
    async fn test_login_after_rejection_renders_products() {
        let (http, session) = session(InMemoryStore::with_entry(API_KEY, "k1"));
        http.enqueue_response(URL, MockResponse::status(401, ""));
        http.set_response(URL, MockResponse::status(200, "[]"));
        session.on_products_view().await;
        assert!(session.snapshot().redirect_to_auth);

        session.submit_api_key("k2").unwrap();
        assert!(!session.snapshot().redirect_to_auth);

        let outcome = session.on_products_view().await;
        assert_eq!(outcome, RefreshOutcome::Updated { count: 0 });
        let state = session.snapshot();
        assert!(state.error.is_none());
        assert!(!state.redirect_to_auth);
        assert_eq!(session.auth_state(), AuthState::Authenticated);
        assert_eq!(
            session.navigate(Route::Products),
            RouteDecision::Render(Route::Products)
        );
    }

    #[tokio::test]
    async fn test_rejected_submission_keeps_redirect() {
        let (http, session) = session(InMemoryStore::with_entry(API_KEY, "k1"));
        http.set_response(URL, MockResponse::status(401, ""));
        session.on_products_view().await;

        assert!(session.submit_api_key("  ").is_err());
        assert!(session.snapshot().redirect_to_auth);
    }

    #[test]
    fn test_from_config_with_explicit_storage() {
        let dir = tempfile::tempdir().unwrap();
        let config = ClientConfig::new()
            .with_base_url("http://prices.test/")
            .with_storage_path(dir.path().join("storage.json"));

        let session = Session::from_config(&config).unwrap();

        assert_eq!(session.sync().endpoint(), URL);
        assert_eq!(session.auth_state(), AuthState::Unauthenticated);
    }
}
