//! Product catalog module.
//!
//! Products as listed on the storefront pages, and lookup over them.

mod product;

pub use product::{Catalog, ProductRecord, DEFAULT_PRICE_LABEL, DEFAULT_PRODUCT_NAME};
