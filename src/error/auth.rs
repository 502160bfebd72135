//! Authentication-related error types.

use thiserror::Error;

use super::category::ErrorCategory;
use super::storage::StorageError;

/// Reason the user was sent back to the credential-entry view.
///
/// Recorded by [`CredentialStore::clear`](crate::auth::CredentialStore::clear)
/// and cleared again by a successful save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The server rejected the stored API key.
    #[error("Invalid API key")]
    InvalidCredential,
}

impl AuthError {
    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredential => "AUTH_INVALID_CREDENTIAL",
        }
    }
}

/// Errors returned when saving or clearing the credential.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// The submitted API key was empty or whitespace only.
    #[error("API key must not be empty")]
    Empty,

    /// Persisting the change to storage failed.
    #[error("Failed to persist API key: {0}")]
    Storage(#[from] StorageError),
}

impl CredentialError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            CredentialError::Empty => ErrorCategory::User,
            CredentialError::Storage(_) => ErrorCategory::System,
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            CredentialError::Empty => "CRED_EMPTY",
            CredentialError::Storage(err) => err.error_code(),
        }
    }
}
