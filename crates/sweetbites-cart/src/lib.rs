//! Cart state for the SweetBites storefront.
//!
//! This crate owns the shopping cart and everything that hangs off it:
//!
//! - **Cart**: line items, totals and the [`CartStore`] that persists them
//! - **Catalog**: products as listed on the storefront
//! - **Checkout**: hand-off of the cart to the enquiry page
//! - **Analytics**: events derived from cart changes
//!
//! # Example
//!
//! ```rust
//! use sweetbites_cart::prelude::*;
//! use sweetbites_storage::MemoryStore;
//!
//! let catalog: Catalog = vec![ProductRecord::new("Vanilla Cupcake", "R45")].into();
//!
//! let mut store = CartStore::open(MemoryStore::new(), CartStoreConfig::default());
//! store.subscribe(AnalyticsListener::new(TracingSink));
//!
//! if let Some(product) = catalog.find("vanilla cupcake") {
//!     store.add_product(product);
//! }
//! store.change_quantity(0, 2)?;
//!
//! assert_eq!(store.total_count(), 3);
//! assert_eq!(store.total_value().to_string(), "R135");
//! # Ok::<(), sweetbites_cart::CartError>(())
//! ```

pub mod error;
pub mod ids;
pub mod price;

pub mod analytics;
pub mod cart;
pub mod catalog;
pub mod checkout;

pub use cart::{Cart, CartStore, CartStoreConfig, LineItem};
pub use error::{AnalyticsError, CartError, CheckoutError, InvariantViolation};
pub use ids::*;
pub use price::Price;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{AnalyticsError, CartError, CheckoutError, InvariantViolation};
    pub use crate::ids::*;
    pub use crate::price::{Price, CURRENCY_CODE, CURRENCY_SYMBOL};

    // Cart
    pub use crate::cart::{
        Cart, CartEvent, CartListener, CartStore, CartStoreConfig, LineItem, ListenerId,
        QuantityChange, RestoreOutcome,
    };

    // Catalog
    pub use crate::catalog::{Catalog, ProductRecord};

    // Checkout
    pub use crate::checkout::{CheckoutHandoff, CheckoutLink};

    // Analytics
    pub use crate::analytics::{
        AnalyticsEvent, AnalyticsListener, AnalyticsSink, EventName, TracingSink,
    };
}
