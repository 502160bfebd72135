//! Fetching the product list from the price service.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use super::state::{RefreshOutcome, SyncState};
use crate::auth::{Credential, CredentialStore};
use crate::error::SyncError;
use crate::models::Product;
use crate::traits::{Headers, HttpClient};

/// Request header carrying the API key.
pub const API_KEY_HEADER: &str = "X-API-KEY";

#[derive(Debug, Default)]
struct Inner {
    state: SyncState,
    /// Sequence number of the newest fetch whose result was applied.
    applied: u64,
}

/// Keeps [`SyncState`] in step with `GET {base_url}/products`.
///
/// Each [`refresh`](Self::refresh) is numbered when it starts. A response is
/// applied only if no later-numbered fetch has been applied already, so the
/// state always reflects the newest completed request.
pub struct ProductSyncEngine {
    http: Arc<dyn HttpClient>,
    credentials: Arc<CredentialStore>,
    endpoint: String,
    inner: Mutex<Inner>,
    started: AtomicU64,
}

impl std::fmt::Debug for ProductSyncEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductSyncEngine")
            .field("endpoint", &self.endpoint)
            .field("started", &self.started.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

impl ProductSyncEngine {
    pub fn new(
        http: Arc<dyn HttpClient>,
        credentials: Arc<CredentialStore>,
        base_url: &str,
    ) -> Self {
        Self {
            http,
            credentials,
            endpoint: products_endpoint(base_url),
            inner: Mutex::new(Inner::default()),
            started: AtomicU64::new(0),
        }
    }

    /// The URL products are fetched from.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> SyncState {
        self.lock().state.clone()
    }

    /// Return the redirect flag and reset it.
    pub fn take_redirect_to_auth(&self) -> bool {
        std::mem::take(&mut self.lock().state.redirect_to_auth)
    }

    /// Fetch the product list with the stored credential.
    ///
    /// Does nothing without a credential. Failures are recorded in the state
    /// and returned in the outcome, never as `Err`. A 401 also discards the
    /// credential and raises the redirect flag.
    pub async fn refresh(&self) -> RefreshOutcome {
        let Some(credential) = self.credentials.get() else {
            tracing::debug!(target: "pricewatch::sync", "No API key stored, skipping refresh");
            return RefreshOutcome::Skipped;
        };

        let seq = self.started.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut inner = self.lock();
            inner.state.loading = true;
            inner.state.error = None;
        }

        tracing::debug!(target: "pricewatch::sync", seq, endpoint = %self.endpoint, "Fetching products");
        let result = self.fetch(&credential).await;

        let mut inner = self.lock();
        if seq < inner.applied {
            tracing::debug!(
                target: "pricewatch::sync",
                seq,
                applied = inner.applied,
                "Dropping response superseded by a newer fetch"
            );
            return RefreshOutcome::Superseded;
        }
        inner.applied = seq;
        inner.state.loading = seq < self.started.load(Ordering::SeqCst);

        match result {
            Ok(products) => {
                let count = products.len();
                inner.state.products = products;
                inner.state.error = None;
                inner.state.redirect_to_auth = false;
                drop(inner);
                tracing::info!(target: "pricewatch::sync", count, "Product list updated");
                RefreshOutcome::Updated { count }
            }
            Err(err) => {
                inner.state.error = Some(err.clone());
                if err.requires_reauth() {
                    inner.state.redirect_to_auth = true;
                }
                drop(inner);

                if err.requires_reauth() {
                    self.invalidate(&credential);
                }
                RefreshOutcome::Failed(err)
            }
        }
    }

    async fn fetch(&self, credential: &Credential) -> Result<Vec<Product>, SyncError> {
        let mut headers = Headers::new();
        headers.insert(API_KEY_HEADER.to_string(), credential.expose().to_string());

        let response = self
            .http
            .get(&self.endpoint, &headers)
            .await
            .map_err(|e| self.fail(SyncError::network(&self.endpoint, e.to_string())))?;

        if response.is_unauthorized() {
            tracing::warn!(
                target: "pricewatch::sync",
                error_code = SyncError::Unauthorized.error_code(),
                "Price service rejected the API key"
            );
            return Err(SyncError::Unauthorized);
        }

        if !response.is_success() {
            return Err(self.fail(SyncError::server(&self.endpoint, response.status)));
        }

        response
            .json::<Vec<Product>>()
            .map_err(|e| {
                self.fail(SyncError::network(
                    &self.endpoint,
                    format!("Invalid response body: {}", e),
                ))
            })
    }

    fn fail(&self, err: SyncError) -> SyncError {
        if let SyncError::NetworkOrServer { cause, .. } = &err {
            tracing::warn!(
                target: "pricewatch::sync",
                endpoint = %self.endpoint,
                category = %err.category(),
                cause = %cause,
                "Failed to fetch products"
            );
        }
        err
    }

    /// Drop `rejected` from the credential store unless it was replaced
    /// while the request was in flight.
    fn invalidate(&self, rejected: &Credential) {
        if self.credentials.get().as_ref() != Some(rejected) {
            tracing::debug!(target: "pricewatch::sync", "API key changed during fetch, keeping it");
            return;
        }
        if let Err(e) = self.credentials.clear() {
            tracing::error!(
                target: "pricewatch::sync",
                error_code = e.error_code(),
                "Failed to remove rejected API key from storage: {}",
                e
            );
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn products_endpoint(base_url: &str) -> String {
    format!("{}/products", base_url.trim_end_matches('/'))
}
