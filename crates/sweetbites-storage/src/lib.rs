//! Type-safe key-value storage for the SweetBites storefront.
//!
//! A [`KeyValueStore`] is a synchronous, string-keyed, string-valued slot
//! store, the native counterpart of the browser's origin-scoped local
//! storage. [`JsonStore`] layers automatic JSON serialization on top of any
//! backend.
//!
//! # Example
//!
//! ```rust
//! use sweetbites_storage::{JsonStore, MemoryStore, storage_key};
//!
//! let store = JsonStore::new(MemoryStore::new());
//! let key = storage_key!("sweetbites", "cart");
//!
//! store.set(&key, &vec!["Vanilla Cupcake"]).unwrap();
//! let items: Option<Vec<String>> = store.get(&key).unwrap();
//! assert_eq!(items, Some(vec!["Vanilla Cupcake".to_string()]));
//! ```

mod backend;
mod error;
mod kv;

pub use backend::{FileStore, KeyValueStore, MemoryStore};
pub use error::StorageError;
pub use kv::JsonStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FileStore, JsonStore, KeyValueStore, MemoryStore, StorageError};
}
