//! Pricewatch - client core for a product price tracker
//!
//! The crate covers everything a UI shell needs short of drawing: storing
//! the API key, deciding which view may be shown, fetching the product list,
//! filtering it and describing timestamps. Shells hold a [`Session`] and
//! render from [`SyncState`] snapshots.
//!
//! ```ignore
//! use pricewatch::{ClientConfig, Session};
//!
//! pricewatch::logging::init();
//! let session = Session::from_config(&ClientConfig::from_env())?;
//! session.submit_api_key("my-key")?;
//! session.on_products_view().await;
//! let state = session.snapshot();
//! ```

pub mod adapters;
pub mod auth;
pub mod config;
pub mod error;
pub mod filter;
pub mod logging;
pub mod models;
pub mod relative_time;
pub mod session;
pub mod sync;
pub mod traits;

pub use auth::{AuthGate, AuthState, Credential, CredentialStore, Route, RouteDecision};
pub use config::ClientConfig;
pub use error::{AuthError, CredentialError, SetupError, StorageError, SyncError};
pub use filter::{filter_products, Column, QuickFilter};
pub use models::Product;
pub use relative_time::{format_relative, format_relative_at};
pub use session::Session;
pub use sync::{ProductSyncEngine, RefreshOutcome, SyncState};
