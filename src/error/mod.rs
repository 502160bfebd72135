//! Error types for the price-watch client.
//!
//! | Type | Raised by | Retryable |
//! |------|-----------|-----------|
//! | [`SyncError`] | product fetch | `NetworkOrServer` only |
//! | [`AuthError`] | credential invalidation | No, re-enter the key |
//! | [`CredentialError`] | saving/clearing the key | No |
//! | [`StorageError`] | key-value adapters | No |
//! | [`SetupError`] | building a session from config | No |
//!
//! Transport errors from the HTTP seam ([`HttpError`](crate::traits::HttpError))
//! never escape the sync engine; they are folded into [`SyncError`].

mod auth;
mod category;
mod setup;
mod storage;
mod sync;

pub use auth::{AuthError, CredentialError};
pub use category::ErrorCategory;
pub use setup::SetupError;
pub use storage::StorageError;
pub use sync::{SyncError, SyncErrorKind};
