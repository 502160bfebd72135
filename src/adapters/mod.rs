//! Concrete implementations of the trait abstractions in `crate::traits`.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`FileStore`] - JSON-file key-value storage
//!
//! The [`mock`] submodule provides test doubles for both.

pub mod file_storage;
pub mod mock;
pub mod reqwest_http;

pub use file_storage::FileStore;
pub use mock::{InMemoryStore, MockHttpClient};
pub use reqwest_http::ReqwestHttpClient;
