//! Observable state of the product list.

use crate::error::SyncError;
use crate::models::Product;

/// What the product view renders.
///
/// Products from the last successful fetch stay here while later fetches
/// fail, so the table keeps showing them next to the error.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncState {
    /// A fetch is in flight.
    pub loading: bool,
    /// Why the most recent fetch failed.
    pub error: Option<SyncError>,
    pub products: Vec<Product>,
    /// The credential was rejected and the shell should navigate to the
    /// API key form.
    pub redirect_to_auth: bool,
}

impl Default for SyncState {
    /// Nothing fetched yet, so the view starts on a spinner.
    fn default() -> Self {
        Self {
            loading: true,
            error: None,
            products: Vec::new(),
            redirect_to_auth: false,
        }
    }
}

impl SyncState {
    /// Whether the products shown are left over from an earlier fetch.
    pub fn is_stale(&self) -> bool {
        self.error.is_some() && !self.products.is_empty()
    }
}

/// Result of one [`refresh`](super::ProductSyncEngine::refresh) call.
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    /// No credential was stored, nothing was requested.
    Skipped,
    /// The product list was replaced.
    Updated { count: usize },
    /// The fetch failed and the error was recorded.
    Failed(SyncError),
    /// A newer fetch had already completed; this response was dropped.
    Superseded,
}

impl RefreshOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, RefreshOutcome::Updated { .. })
    }

    pub fn error(&self) -> Option<&SyncError> {
        match self {
            RefreshOutcome::Failed(err) => Some(err),
            _ => None,
        }
    }
}
