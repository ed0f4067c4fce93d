//! Enquiry page hand-off.

use serde::Serialize;
use url::Url;

use crate::cart::Cart;
use crate::error::CheckoutError;
use crate::price::Price;

/// Query parameter carrying the cart.
pub const DEFAULT_CART_QUERY_PARAM: &str = "cart";

/// Longest URL that common browsers and servers accept without trouble.
pub const DEFAULT_MAX_URL_LENGTH: usize = 2000;

/// Builds links to the enquiry page with the cart attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutHandoff {
    /// Enquiry page address.
    pub enquiry_url: Url,
    /// Query parameter the serialized cart is placed in.
    pub query_param: String,
    /// Length beyond which a link is flagged as unsafe.
    pub max_url_length: usize,
}

impl CheckoutHandoff {
    /// Hand off to `enquiry_url` with the default parameter and limit.
    pub fn new(enquiry_url: Url) -> Self {
        Self {
            enquiry_url,
            query_param: DEFAULT_CART_QUERY_PARAM.to_string(),
            max_url_length: DEFAULT_MAX_URL_LENGTH,
        }
    }

    /// Use a different query parameter.
    pub fn with_query_param(mut self, param: impl Into<String>) -> Self {
        self.query_param = param.into();
        self
    }

    /// Use a different length limit.
    pub fn with_max_url_length(mut self, max: usize) -> Self {
        self.max_url_length = max;
        self
    }

    /// Serialize `cart` into a link to the enquiry page.
    ///
    /// Any existing value of the cart parameter on the enquiry URL is
    /// replaced. Links longer than `max_url_length` are still returned, with
    /// [`CheckoutLink::exceeds_safe_length`] set; the receiving side may see a
    /// truncated cart.
    pub fn prepare(&self, cart: &Cart) -> Result<CheckoutLink, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let payload = serde_json::to_string(cart)?;

        let mut url = self.enquiry_url.clone();
        let kept: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(name, _)| *name != self.query_param.as_str())
            .map(|(name, value)| (name.into_owned(), value.into_owned()))
            .collect();
        url.query_pairs_mut()
            .clear()
            .extend_pairs(kept)
            .append_pair(&self.query_param, &payload);

        let length = url.as_str().len();
        let exceeds_safe_length = length > self.max_url_length;
        if exceeds_safe_length {
            tracing::warn!(
                length,
                limit = self.max_url_length,
                items = cart.len(),
                "checkout link exceeds safe URL length, cart may be truncated"
            );
        }

        Ok(CheckoutLink {
            url,
            total: cart.total_value(),
            item_count: cart.total_count(),
            exceeds_safe_length,
        })
    }
}

/// A ready-to-open enquiry link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutLink {
    /// Enquiry page address with the cart attached.
    pub url: Url,
    /// Cart value at hand-off.
    pub total: Price,
    /// Units in the cart at hand-off.
    pub item_count: u64,
    /// Whether `url` is longer than the configured limit.
    pub exceeds_safe_length: bool,
}
