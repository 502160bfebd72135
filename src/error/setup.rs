//! Failures while wiring a session from configuration.

use thiserror::Error;

use super::storage::StorageError;
use crate::traits::HttpError;

/// A [`Session`](crate::session::Session) could not be built.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Failed to build HTTP client: {0}")]
    Http(#[from] HttpError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl SetupError {
    pub fn error_code(&self) -> &'static str {
        match self {
            SetupError::Http(_) => "SETUP_HTTP",
            SetupError::Storage(e) => e.error_code(),
        }
    }
}
