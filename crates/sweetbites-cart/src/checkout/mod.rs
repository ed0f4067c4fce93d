//! Checkout module.
//!
//! There is no payment step: checkout forwards the cart to the enquiry page
//! as a query parameter.

mod handoff;

pub use handoff::{
    CheckoutHandoff, CheckoutLink, DEFAULT_CART_QUERY_PARAM, DEFAULT_MAX_URL_LENGTH,
};
