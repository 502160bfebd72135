//! Product synchronization errors.
//!
//! Every failure of a product fetch is folded into exactly one
//! [`SyncError`] variant at the sync engine boundary.

use thiserror::Error;

use super::category::ErrorCategory;

/// Discriminant of [`SyncError`], for callers that only branch on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncErrorKind {
    Unauthorized,
    NetworkOrServerError,
}

/// Failure of a product fetch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// The server answered 401. The credential has been discarded.
    #[error("Invalid API key")]
    Unauthorized,

    /// Transport failure, non-2xx status other than 401, or an unparsable body.
    ///
    /// `status` is set when the server answered with a non-2xx status.
    /// `cause` carries the technical detail for logs; the display text is
    /// what the user sees next to the retry button.
    #[error("Failed to fetch products from {endpoint}")]
    NetworkOrServer {
        endpoint: String,
        status: Option<u16>,
        cause: String,
    },
}

impl SyncError {
    /// Build an error for a request that got no usable HTTP answer.
    pub fn network(endpoint: impl Into<String>, cause: impl Into<String>) -> Self {
        SyncError::NetworkOrServer {
            endpoint: endpoint.into(),
            status: None,
            cause: cause.into(),
        }
    }

    /// Build an error for a non-2xx answer other than 401.
    pub fn server(endpoint: impl Into<String>, status: u16) -> Self {
        SyncError::NetworkOrServer {
            endpoint: endpoint.into(),
            status: Some(status),
            cause: format!("HTTP {}", status),
        }
    }

    /// HTTP status of the failed response, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            SyncError::Unauthorized => Some(401),
            SyncError::NetworkOrServer { status, .. } => *status,
        }
    }

    pub fn kind(&self) -> SyncErrorKind {
        match self {
            SyncError::Unauthorized => SyncErrorKind::Unauthorized,
            SyncError::NetworkOrServer { .. } => SyncErrorKind::NetworkOrServerError,
        }
    }

    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            SyncError::Unauthorized => ErrorCategory::Auth,
            SyncError::NetworkOrServer {
                status: Some(_), ..
            } => ErrorCategory::Server,
            SyncError::NetworkOrServer { status: None, .. } => ErrorCategory::Network,
        }
    }

    /// Whether a manual retry with the same credential can succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SyncError::NetworkOrServer { .. })
    }

    /// Whether the user has to enter a new API key.
    pub fn requires_reauth(&self) -> bool {
        matches!(self, SyncError::Unauthorized)
    }

    /// The message shown to the user.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            SyncError::Unauthorized => "SYNC_UNAUTHORIZED",
            SyncError::NetworkOrServer { .. } => "SYNC_NETWORK_OR_SERVER",
        }
    }
}
