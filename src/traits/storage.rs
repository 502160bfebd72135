//! Key-value storage trait abstraction.
//!
//! Models the host's persisted string storage (local storage in a browser
//! shell, a JSON file on desktop). The credential store only ever touches
//! the [`API_KEY`] entry.

use crate::error::StorageError;

/// Storage key holding the API key.
pub const API_KEY: &str = "apiKey";

/// Trait for persisted string storage.
///
/// Calls are synchronous: implementations must complete the write (or fail)
/// before returning.
pub trait KeyValueStore: Send + Sync {
    /// Read a value.
    ///
    /// # Returns
    /// - `Ok(Some(value))` if the key exists
    /// - `Ok(None)` if it does not
    /// - `Err(error)` if the storage could not be read
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Insert or replace a value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a value. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
