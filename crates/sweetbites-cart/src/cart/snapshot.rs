//! Persisted cart snapshots.
//!
//! A snapshot is a JSON array of line items:
//!
//! ```json
//! [{"productId": "cupcake-1", "name": "Vanilla Cupcake", "price": 45, "quantity": 2}]
//! ```
//!
//! Early storefront revisions wrote `{"name", "price", "quantity"}` without a
//! product ID; such entries are identified by their trimmed name.

use serde::Deserialize;

use crate::cart::{Cart, LineItem};
use crate::catalog::DEFAULT_PRODUCT_NAME;
use crate::error::InvariantViolation;
use crate::ids::{ImageRef, ProductId};
use crate::price::Price;

/// Line item as read back from storage.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredLineItem {
    #[serde(default)]
    pub product_id: Option<ProductId>,
    pub name: String,
    pub price: Price,
    pub quantity: u32,
    #[serde(default)]
    pub image: Option<ImageRef>,
}

impl From<StoredLineItem> for LineItem {
    fn from(stored: StoredLineItem) -> Self {
        let (product_id, name) = match stored.product_id {
            Some(id) => (id, stored.name),
            // Legacy names are raw card text; normalise them the way the
            // catalog does so re-adding the same card merges.
            None => {
                let name = match stored.name.trim() {
                    "" => DEFAULT_PRODUCT_NAME.to_string(),
                    trimmed => trimmed.to_string(),
                };
                (ProductId::new(name.as_str()), name)
            }
        };
        LineItem::new(
            product_id,
            name,
            stored.price,
            stored.quantity,
            stored.image,
        )
    }
}

/// Rebuild a cart from stored items, rejecting snapshots that break the
/// cart invariants.
pub fn decode(stored: Vec<StoredLineItem>) -> Result<Cart, InvariantViolation> {
    Cart::from_items(stored.into_iter().map(LineItem::from).collect())
}
