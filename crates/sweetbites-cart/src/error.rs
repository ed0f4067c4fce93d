//! Cart error types.

use thiserror::Error;

use crate::ids::ProductId;

/// Errors returned by cart mutations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// The index does not reference a line item.
    #[error("Line item index {index} out of range (cart has {len} items)")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Errors from checking the cart's structural invariants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// A line item holds no units.
    #[error("Line item {index} has zero quantity")]
    ZeroQuantity { index: usize },

    /// Two line items share a product.
    #[error("Product {product_id} appears more than once")]
    DuplicateProduct { product_id: ProductId },
}

/// Errors that can occur while handing the cart off to checkout.
#[derive(Error, Debug)]
pub enum CheckoutError {
    /// There is nothing to check out.
    #[error("Cannot check out an empty cart")]
    EmptyCart,

    /// The cart could not be serialized into the enquiry link.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors reported by an analytics sink.
#[derive(Error, Debug)]
pub enum AnalyticsError {
    /// The sink refused or failed to record the event.
    #[error("Analytics delivery failed: {0}")]
    Delivery(String),

    /// The event could not be serialized.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
