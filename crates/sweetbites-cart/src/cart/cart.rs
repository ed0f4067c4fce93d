//! Cart and line item types.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::{CartError, InvariantViolation};
use crate::ids::{ImageRef, ProductId};
use crate::price::Price;

/// One distinct product held in the cart.
///
/// Fields are read-only outside the crate; only [`CartStore`] changes them.
/// Serializes to the persisted snapshot shape:
/// `{"productId", "name", "price", "quantity", "image"?}`.
///
/// [`CartStore`]: crate::cart::CartStore
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    product_id: ProductId,
    name: String,
    #[serde(rename = "price")]
    unit_price: Price,
    quantity: u32,
    #[serde(rename = "image", skip_serializing_if = "Option::is_none")]
    image_ref: Option<ImageRef>,
}

impl LineItem {
    pub(crate) fn new(
        product_id: ProductId,
        name: impl Into<String>,
        unit_price: Price,
        quantity: u32,
        image_ref: Option<ImageRef>,
    ) -> Self {
        Self {
            product_id,
            name: name.into(),
            unit_price,
            quantity,
            image_ref,
        }
    }

    /// Product identity.
    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Price of one unit.
    pub fn unit_price(&self) -> Price {
        self.unit_price
    }

    /// Number of units; at least 1 for any item inside a cart.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Optional image reference.
    pub fn image_ref(&self) -> Option<&ImageRef> {
        self.image_ref.as_ref()
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Price {
        self.unit_price.line_total(self.quantity)
    }
}

/// Result of changing a line item's quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuantityChange {
    /// The quantity stayed positive; carries the updated item.
    Updated(LineItem),
    /// The quantity dropped to zero or below; carries the removed item.
    Removed(LineItem),
}

impl QuantityChange {
    /// The affected item, as updated or as it was before removal.
    pub fn item(&self) -> &LineItem {
        match self {
            Self::Updated(item) | Self::Removed(item) => item,
        }
    }

    /// Whether the item left the cart.
    pub fn is_removed(&self) -> bool {
        matches!(self, Self::Removed(_))
    }
}

/// Ordered collection of line items, oldest first.
///
/// Product identities are unique and every quantity is at least 1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from items, rejecting any that break the invariants.
    pub fn from_items(items: Vec<LineItem>) -> Result<Self, InvariantViolation> {
        let cart = Self { items };
        cart.validate()?;
        Ok(cart)
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&LineItem> {
        self.items.get(index)
    }

    /// Position of the item for `product_id`, if present.
    pub fn position(&self, product_id: &ProductId) -> Option<usize> {
        self.items.iter().position(|i| &i.product_id == product_id)
    }

    /// Sum of unit price times quantity over all items.
    pub fn total_value(&self) -> Price {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Sum of quantities over all items.
    pub fn total_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Check the structural invariants, returning the first violation.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        let mut seen = HashSet::with_capacity(self.items.len());
        for (index, item) in self.items.iter().enumerate() {
            if item.quantity == 0 {
                return Err(InvariantViolation::ZeroQuantity { index });
            }
            if !seen.insert(&item.product_id) {
                return Err(InvariantViolation::DuplicateProduct {
                    product_id: item.product_id.clone(),
                });
            }
        }
        Ok(())
    }

    /// Add one unit of a product.
    ///
    /// Returns the index and new state of the affected item. An existing item
    /// keeps its name, price and image; only its quantity grows.
    pub(crate) fn add_one(
        &mut self,
        product_id: ProductId,
        name: String,
        unit_price: Price,
        image_ref: Option<ImageRef>,
    ) -> (usize, LineItem) {
        if let Some(index) = self.position(&product_id) {
            let existing = &mut self.items[index];
            existing.quantity = existing.quantity.saturating_add(1);
            return (index, existing.clone());
        }

        let item = LineItem::new(product_id, name, unit_price, 1, image_ref);
        self.items.push(item.clone());
        (self.items.len() - 1, item)
    }

    /// Remove and return the item at `index`.
    pub(crate) fn remove(&mut self, index: usize) -> Result<LineItem, CartError> {
        self.check_index(index)?;
        Ok(self.items.remove(index))
    }

    /// Apply `delta` to the quantity at `index`, removing the item when the
    /// result is zero or below.
    pub(crate) fn adjust(&mut self, index: usize, delta: i64) -> Result<QuantityChange, CartError> {
        self.check_index(index)?;

        let current = i64::from(self.items[index].quantity);
        let next = current.saturating_add(delta);
        if next <= 0 {
            return Ok(QuantityChange::Removed(self.items.remove(index)));
        }

        let item = &mut self.items[index];
        item.quantity = u32::try_from(next).unwrap_or(u32::MAX);
        Ok(QuantityChange::Updated(item.clone()))
    }

    fn check_index(&self, index: usize) -> Result<(), CartError> {
        if index < self.items.len() {
            Ok(())
        } else {
            Err(CartError::IndexOutOfRange {
                index,
                len: self.items.len(),
            })
        }
    }
}
