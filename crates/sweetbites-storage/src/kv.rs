//! JSON-typed wrapper over a key-value backend.

use serde::{de::DeserializeOwned, Serialize};

use crate::{KeyValueStore, StorageError};

/// Type-safe store backed by any [`KeyValueStore`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`.
#[derive(Debug, Default)]
pub struct JsonStore<S> {
    backend: S,
}

impl<S: KeyValueStore> JsonStore<S> {
    /// Wrap a backend.
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    /// Get a value from the store.
    ///
    /// Returns `None` if the key doesn't exist, and
    /// [`StorageError::Malformed`] if it exists but does not parse as `T`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cart: Option<Vec<StoredLine>> = store.get("sweetbites_cart")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.backend.get(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|source| StorageError::Malformed {
                    key: key.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }

    /// Set a value in the store.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// store.set("sweetbites_cart", &lines)?;
    /// ```
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)?;
        self.backend.set(key, &raw)
    }

    /// Delete a value from the store.
    pub fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.backend.delete(key)
    }

    /// Check if a key exists in the store.
    pub fn exists(&self, key: &str) -> Result<bool, StorageError> {
        self.backend.exists(key)
    }

    /// Borrow the untyped backend.
    pub fn raw(&self) -> &S {
        &self.backend
    }

    /// Consume the wrapper and return the backend.
    pub fn into_inner(self) -> S {
        self.backend
    }
}

/// Helper to build storage keys with namespacing.
///
/// # Example
///
/// ```rust
/// use sweetbites_storage::storage_key;
///
/// assert_eq!(storage_key!("sweetbites", "cart"), "sweetbites_cart");
/// assert_eq!(storage_key!("sweetbites", "cart", 2), "sweetbites_cart_2");
/// ```
#[macro_export]
macro_rules! storage_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push('_');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}
