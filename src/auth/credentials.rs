//! API key storage.
//!
//! [`CredentialStore`] owns the single process-wide API key, mirrors it into
//! the host's key-value storage under [`API_KEY`], and remembers why the
//! key was last discarded so the login view can explain it.

use std::fmt;
use std::sync::{Arc, RwLock};

use crate::error::{AuthError, CredentialError};
use crate::traits::{KeyValueStore, API_KEY};

/// An API key. Never empty.
///
/// `Debug` output is redacted so the key cannot leak into logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Build a credential from user input.
    ///
    /// Surrounding whitespace is dropped; returns `None` if nothing is left.
    pub fn new(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// The raw key, for use as a header value.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(****)")
    }
}

#[derive(Debug, Default)]
struct Slot {
    credential: Option<Credential>,
    error: Option<AuthError>,
}

/// Owner of the API key and its persistence.
///
/// The key and the recorded [`AuthError`] live behind one lock, so readers
/// never see one updated without the other.
pub struct CredentialStore {
    storage: Arc<dyn KeyValueStore>,
    slot: RwLock<Slot>,
}

impl fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialStore")
            .field("slot", &*self.read())
            .finish_non_exhaustive()
    }
}

impl CredentialStore {
    /// Load the persisted key from `storage`.
    ///
    /// An unreadable storage or a stored blank value starts the store
    /// without a key.
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let credential = match storage.get(API_KEY) {
            Ok(value) => value.as_deref().and_then(Credential::new),
            Err(e) => {
                tracing::warn!(
                    target: "pricewatch::auth",
                    error_code = e.error_code(),
                    "Failed to read stored API key: {}",
                    e
                );
                None
            }
        };

        tracing::debug!(
            target: "pricewatch::auth",
            present = credential.is_some(),
            "Loaded API key from storage"
        );

        Self {
            storage,
            slot: RwLock::new(Slot {
                credential,
                error: None,
            }),
        }
    }

    /// The current key, if any.
    pub fn get(&self) -> Option<Credential> {
        self.read().credential.clone()
    }

    /// Whether a key is present.
    pub fn is_present(&self) -> bool {
        self.read().credential.is_some()
    }

    /// Why the key was last discarded, if it has not been replaced since.
    pub fn auth_error(&self) -> Option<AuthError> {
        self.read().error
    }

    /// Persist `value` as the API key, replacing any previous key.
    ///
    /// Clears the recorded auth error. Nothing changes if `value` is blank
    /// or the storage write fails.
    pub fn save(&self, value: &str) -> Result<(), CredentialError> {
        let credential = Credential::new(value).ok_or(CredentialError::Empty)?;

        let mut slot = self.write();
        self.storage.set(API_KEY, credential.expose())?;
        slot.credential = Some(credential);
        slot.error = None;

        tracing::info!(target: "pricewatch::auth", "API key saved");
        Ok(())
    }

    /// Discard the API key and record [`AuthError::InvalidCredential`].
    ///
    /// The in-memory key is dropped even when removing it from storage
    /// fails; the storage error is still returned.
    pub fn clear(&self) -> Result<(), CredentialError> {
        let mut slot = self.write();
        slot.credential = None;
        slot.error = Some(AuthError::InvalidCredential);

        tracing::info!(target: "pricewatch::auth", "API key cleared");

        self.storage.remove(API_KEY).map_err(|e| {
            tracing::error!(
                target: "pricewatch::auth",
                error_code = e.error_code(),
                "Failed to remove stored API key: {}",
                e
            );
            CredentialError::from(e)
        })
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Slot> {
        self.slot.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Slot> {
        self.slot.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::InMemoryStore;

    fn empty_store() -> (InMemoryStore, CredentialStore) {
        let storage = InMemoryStore::new();
        let store = CredentialStore::load(Arc::new(storage.clone()));
        (storage, store)
    }

    #[test]
    fn test_credential_rejects_blank() {
        assert!(Credential::new("").is_none());
        assert!(Credential::new("   \t").is_none());
        assert_eq!(Credential::new(" key ").unwrap().expose(), "key");
    }

    #[test]
    fn test_credential_debug_is_redacted() {
        let credential = Credential::new("super-secret").unwrap();
        assert!(!format!("{:?}", credential).contains("super-secret"));
    }

    #[test]
    fn test_load_existing_key() {
        let storage = InMemoryStore::with_entry(API_KEY, "12345");
        let store = CredentialStore::load(Arc::new(storage));
        assert_eq!(store.get().unwrap().expose(), "12345");
        assert!(store.auth_error().is_none());
    }

    #[test]
    fn test_load_blank_key_is_absent() {
        let storage = InMemoryStore::with_entry(API_KEY, "");
        let store = CredentialStore::load(Arc::new(storage));
        assert!(store.get().is_none());
    }

    #[test]
    fn test_save_then_get() {
        let (storage, store) = empty_store();
        store.save("abc").unwrap();

        assert_eq!(store.get().unwrap().expose(), "abc");
        assert_eq!(storage.peek(API_KEY), Some("abc".to_string()));
    }

    #[test]
    fn test_save_replaces_previous_key() {
        let (storage, store) = empty_store();
        store.save("first").unwrap();
        store.save("second").unwrap();

        assert_eq!(store.get().unwrap().expose(), "second");
        assert_eq!(storage.peek(API_KEY), Some("second".to_string()));
    }

    #[test]
    fn test_save_empty_is_rejected() {
        let (storage, store) = empty_store();
        assert!(matches!(store.save(""), Err(CredentialError::Empty)));
        assert!(matches!(store.save("  "), Err(CredentialError::Empty)));
        assert!(store.get().is_none());
        assert_eq!(storage.peek(API_KEY), None);
    }

    #[test]
    fn test_clear_then_get() {
        let (storage, store) = empty_store();
        store.save("abc").unwrap();
        store.clear().unwrap();

        assert!(store.get().is_none());
        assert_eq!(storage.peek(API_KEY), None);
    }

    #[test]
    fn test_clear_records_invalid_credential() {
        let (_, store) = empty_store();
        store.save("abc").unwrap();
        store.clear().unwrap();
        assert_eq!(store.auth_error(), Some(AuthError::InvalidCredential));
    }

    #[test]
    fn test_save_clears_recorded_error() {
        let (_, store) = empty_store();
        store.clear().unwrap();
        assert!(store.auth_error().is_some());

        store.save("new-key").unwrap();
        assert!(store.auth_error().is_none());
    }

    #[test]
    fn test_save_storage_failure_leaves_state_untouched() {
        let storage = InMemoryStore::with_entry(API_KEY, "old");
        let store = CredentialStore::load(Arc::new(storage.clone()));
        storage.set_writes_should_fail(true);

        assert!(matches!(store.save("new"), Err(CredentialError::Storage(_))));
        assert_eq!(store.get().unwrap().expose(), "old");
        assert_eq!(storage.peek(API_KEY), Some("old".to_string()));
    }

    #[test]
    fn test_clear_storage_failure_still_drops_key() {
        let storage = InMemoryStore::with_entry(API_KEY, "old");
        let store = CredentialStore::load(Arc::new(storage.clone()));
        storage.set_writes_should_fail(true);

        assert!(store.clear().is_err());
        assert!(store.get().is_none());
        assert_eq!(store.auth_error(), Some(AuthError::InvalidCredential));
    }
}
