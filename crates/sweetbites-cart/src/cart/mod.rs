//! Shopping cart module.
//!
//! Contains the cart and line item types, the persisted snapshot format and
//! the [`CartStore`] that owns cart state.

mod cart;
mod events;
pub mod snapshot;
mod store;

pub use cart::{Cart, LineItem, QuantityChange};
pub use events::{CartEvent, CartListener, ListenerId};
pub use store::{CartStore, CartStoreConfig, RestoreOutcome, LEGACY_STORAGE_KEY};
