//! The cart store: sole owner of cart state.

use std::fmt;

use serde::{Deserialize, Serialize};
use sweetbites_storage::{storage_key, JsonStore, KeyValueStore, StorageError};

use crate::cart::snapshot::{self, StoredLineItem};
use crate::cart::{Cart, CartEvent, CartListener, LineItem, ListenerId, QuantityChange};
use crate::catalog::ProductRecord;
use crate::checkout::{CheckoutHandoff, CheckoutLink};
use crate::error::{CartError, CheckoutError};
use crate::ids::{ImageRef, ProductId};
use crate::price::Price;

/// Slot name used by the first storefront revisions.
pub const LEGACY_STORAGE_KEY: &str = "cart";

/// Where and how the cart is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartStoreConfig {
    /// Slot the cart is written to after every change.
    pub storage_key: String,
    /// Older slot names, read only when `storage_key` is absent.
    #[serde(default)]
    pub legacy_keys: Vec<String>,
}

impl Default for CartStoreConfig {
    fn default() -> Self {
        Self {
            storage_key: storage_key!("sweetbites", "cart"),
            legacy_keys: vec![LEGACY_STORAGE_KEY.to_string()],
        }
    }
}

/// What [`CartStore::restore`] found in storage.
///
/// Every outcome leaves a valid cart behind; none of them is an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// Nothing was stored; the cart is empty.
    Empty,
    /// The cart was loaded from the current slot.
    Loaded { items: usize },
    /// The cart was found under a legacy slot and moved to the current one.
    Migrated { from: String, items: usize },
    /// The cart was found under a legacy slot but could not be written to
    /// the current one; the legacy slot is kept.
    LoadedLegacy {
        from: String,
        items: usize,
        reason: String,
    },
    /// The stored cart was unreadable and has been replaced by an empty cart.
    Recovered { reason: String },
    /// Storage could not be read; the cart is empty.
    Unavailable { reason: String },
}

/// Owns the cart, keeps it in step with its persisted snapshot and tells
/// subscribers about every change.
///
/// Construct one per application with [`CartStore::open`] and hand out
/// references; there is no global instance.
///
/// # Example
///
/// ```rust
/// use sweetbites_cart::prelude::*;
/// use sweetbites_storage::MemoryStore;
///
/// let mut store = CartStore::open(MemoryStore::new(), CartStoreConfig::default());
/// store.add_item("cupcake-1", "Vanilla Cupcake", Price::new(45), None);
/// store.add_item("cupcake-1", "Vanilla Cupcake", Price::new(45), None);
///
/// assert_eq!(store.total_value(), Price::new(90));
/// assert_eq!(store.total_count(), 2);
/// ```
pub struct CartStore<S> {
    store: JsonStore<S>,
    config: CartStoreConfig,
    cart: Cart,
    listeners: Vec<(ListenerId, Box<dyn CartListener>)>,
    next_listener_id: u64,
    durable: bool,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Create a store over `backend` and restore any persisted cart.
    pub fn open(backend: S, config: CartStoreConfig) -> Self {
        let mut store = Self {
            store: JsonStore::new(backend),
            config,
            cart: Cart::new(),
            listeners: Vec::new(),
            next_listener_id: 0,
            durable: true,
        };
        store.restore();
        store
    }

    /// Add one unit of a product and return its line as it now stands.
    ///
    /// A product already in the cart has its quantity raised by one; its
    /// stored name, price and image are left alone. Never fails.
    pub fn add_item(
        &mut self,
        product_id: impl Into<ProductId>,
        name: impl Into<String>,
        unit_price: Price,
        image_ref: Option<ImageRef>,
    ) -> LineItem {
        let (index, item) = self
            .cart
            .add_one(product_id.into(), name.into(), unit_price, image_ref);
        self.check_invariants();

        tracing::debug!(
            product_id = %item.product_id(),
            quantity = item.quantity(),
            "item added to cart"
        );
        self.commit(CartEvent::ItemAdded {
            index,
            item: item.clone(),
        });
        item
    }

    /// Add one unit of a product scraped from the catalog, parsing its
    /// price label.
    pub fn add_product(&mut self, product: &ProductRecord) -> LineItem {
        self.add_item(
            product.product_id(),
            product.display_name(),
            product.unit_price(),
            product.image_ref().cloned(),
        )
    }

    /// Remove the line at `index`. Later lines shift down by one.
    ///
    /// An out-of-range index leaves the cart untouched.
    pub fn remove_item(&mut self, index: usize) -> Result<LineItem, CartError> {
        let item = self.cart.remove(index).inspect_err(|error| {
            tracing::debug!(%error, "rejected cart removal");
        })?;
        self.check_invariants();

        tracing::debug!(product_id = %item.product_id(), index, "item removed from cart");
        self.commit(CartEvent::ItemRemoved {
            index,
            item: item.clone(),
        });
        Ok(item)
    }

    /// Move the quantity at `index` by `delta`.
    ///
    /// A result of zero or less removes the line entirely, exactly as
    /// [`remove_item`](Self::remove_item) would.
    pub fn change_quantity(
        &mut self,
        index: usize,
        delta: i64,
    ) -> Result<QuantityChange, CartError> {
        let change = self.cart.adjust(index, delta).inspect_err(|error| {
            tracing::debug!(%error, delta, "rejected cart quantity change");
        })?;
        self.check_invariants();

        let event = match &change {
            QuantityChange::Updated(item) => {
                tracing::debug!(
                    product_id = %item.product_id(),
                    quantity = item.quantity(),
                    delta,
                    "cart quantity changed"
                );
                CartEvent::QuantityChanged {
                    index,
                    item: item.clone(),
                    delta,
                }
            }
            QuantityChange::Removed(item) => {
                tracing::debug!(product_id = %item.product_id(), index, "item removed from cart");
                CartEvent::ItemRemoved {
                    index,
                    item: item.clone(),
                }
            }
        };
        self.commit(event);
        Ok(change)
    }

    /// Read-only view of the cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Owned copy of the lines, for rendering.
    pub fn snapshot(&self) -> Vec<LineItem> {
        self.cart.items().to_vec()
    }

    /// Sum of unit price times quantity.
    pub fn total_value(&self) -> Price {
        self.cart.total_value()
    }

    /// Sum of quantities.
    pub fn total_count(&self) -> u64 {
        self.cart.total_count()
    }

    /// Write the whole cart to its storage slot.
    pub fn persist(&mut self) -> Result<(), StorageError> {
        let result = self.store.set(&self.config.storage_key, &self.cart);
        self.durable = result.is_ok();
        result
    }

    /// Reload the cart from storage, replacing the in-memory cart.
    ///
    /// Missing, unreadable or invalid data yields an empty cart.
    pub fn restore(&mut self) -> RestoreOutcome {
        let outcome = self.load();
        tracing::debug!(?outcome, items = self.cart.len(), "cart restored");
        self.notify(&CartEvent::Restored {
            outcome: outcome.clone(),
        });
        outcome
    }

    /// Hand the cart to the enquiry page.
    ///
    /// The cart itself is not changed.
    pub fn begin_checkout(
        &mut self,
        handoff: &CheckoutHandoff,
    ) -> Result<CheckoutLink, CheckoutError> {
        let link = handoff.prepare(&self.cart)?;
        self.notify(&CartEvent::CheckoutStarted { link: link.clone() });
        Ok(link)
    }

    /// Register a listener for cart changes.
    pub fn subscribe(&mut self, listener: impl CartListener + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Drop a listener. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() < before
    }

    /// Whether the most recent save reached storage.
    pub fn is_durable(&self) -> bool {
        self.durable
    }

    /// Persistence settings.
    pub fn config(&self) -> &CartStoreConfig {
        &self.config
    }

    /// Borrow the storage backend.
    pub fn store(&self) -> &S {
        self.store.raw()
    }

    /// Consume the cart store and return its storage backend.
    pub fn into_store(self) -> S {
        self.store.into_inner()
    }

    fn load(&mut self) -> RestoreOutcome {
        let key = self.config.storage_key.clone();
        match self.read_slot(&key) {
            Ok(Some(cart)) => {
                let items = cart.len();
                self.cart = cart;
                return RestoreOutcome::Loaded { items };
            }
            Ok(None) => {}
            Err(outcome) => {
                self.cart = Cart::new();
                return outcome;
            }
        }

        for legacy in self.config.legacy_keys.clone() {
            match self.read_slot(&legacy) {
                Ok(Some(cart)) => {
                    let items = cart.len();
                    self.cart = cart;
                    return match self.migrate_from(&legacy) {
                        Ok(()) => RestoreOutcome::Migrated {
                            from: legacy,
                            items,
                        },
                        Err(error) => RestoreOutcome::LoadedLegacy {
                            from: legacy,
                            items,
                            reason: error.to_string(),
                        },
                    };
                }
                Ok(None) => {}
                Err(outcome) => {
                    self.cart = Cart::new();
                    return outcome;
                }
            }
        }

        self.cart = Cart::new();
        RestoreOutcome::Empty
    }

    fn read_slot(&self, key: &str) -> Result<Option<Cart>, RestoreOutcome> {
        match self.store.get::<Vec<StoredLineItem>>(key) {
            Ok(Some(stored)) => snapshot::decode(stored).map(Some).map_err(|violation| {
                tracing::warn!(key, error = %violation, "stored cart is invalid, starting empty");
                RestoreOutcome::Recovered {
                    reason: violation.to_string(),
                }
            }),
            Ok(None) => Ok(None),
            Err(error) if error.is_malformed() => {
                tracing::warn!(key, %error, "stored cart is unreadable, starting empty");
                Err(RestoreOutcome::Recovered {
                    reason: error.to_string(),
                })
            }
            Err(error) => {
                tracing::warn!(key, %error, "cart storage unavailable, starting empty");
                Err(RestoreOutcome::Unavailable {
                    reason: error.to_string(),
                })
            }
        }
    }

    fn migrate_from(&mut self, legacy: &str) -> Result<(), StorageError> {
        if let Err(error) = self.persist() {
            tracing::warn!(from = legacy, %error, "could not migrate legacy cart");
            return Err(error);
        }
        if let Err(error) = self.store.delete(legacy) {
            tracing::warn!(key = legacy, %error, "could not remove legacy cart slot");
        }
        tracing::info!(
            from = legacy,
            to = %self.config.storage_key,
            items = self.cart.len(),
            "migrated cart to new storage key"
        );
        Ok(())
    }

    fn commit(&mut self, event: CartEvent) {
        if let Err(error) = self.persist() {
            tracing::warn!(
                key = %self.config.storage_key,
                %error,
                "could not save cart, changes kept in memory only"
            );
            for (_, listener) in &mut self.listeners {
                listener.persistence_failed(&error);
            }
        }
        self.notify(&event);
    }

    fn notify(&mut self, event: &CartEvent) {
        let cart = &self.cart;
        for (_, listener) in &mut self.listeners {
            listener.cart_changed(event, cart);
        }
    }

    fn check_invariants(&self) {
        debug_assert!(
            self.cart.validate().is_ok(),
            "cart invariant violated: {:?}",
            self.cart.validate()
        );
    }
}

impl<S> fmt::Debug for CartStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("config", &self.config)
            .field("cart", &self.cart)
            .field("listeners", &self.listeners.len())
            .field("durable", &self.durable)
            .finish()
    }
}
