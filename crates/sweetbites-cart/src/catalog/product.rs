//! Product records and catalog lookup.

use crate::ids::{ImageRef, ProductId};
use crate::price::Price;
use serde::{Deserialize, Serialize};

/// Name used when a product card has no heading.
pub const DEFAULT_PRODUCT_NAME: &str = "Product";

/// Label used when a product card shows no price.
pub const DEFAULT_PRICE_LABEL: &str = "R0";

/// A product as scraped from a storefront card.
///
/// The page carries no stable product identifier, so the display name doubles
/// as the product's identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Name shown on the card.
    #[serde(rename = "name")]
    pub display_name: String,
    /// Price text shown on the card, e.g. `"R45"`.
    #[serde(rename = "price")]
    pub price_label: String,
    /// Product image, if the card has one.
    #[serde(rename = "image", default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<ImageRef>,
}

impl ProductRecord {
    /// Create a record from known values.
    pub fn new(display_name: impl Into<String>, price_label: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            price_label: price_label.into(),
            image_ref: None,
        }
    }

    /// Build a record from whatever a product card yielded.
    ///
    /// Text is trimmed. A missing or blank name becomes
    /// [`DEFAULT_PRODUCT_NAME`] and a missing or blank price becomes
    /// [`DEFAULT_PRICE_LABEL`]; a blank image is dropped.
    pub fn from_scraped(name: Option<&str>, price: Option<&str>, image: Option<&str>) -> Self {
        Self {
            display_name: non_blank(name).unwrap_or(DEFAULT_PRODUCT_NAME).to_string(),
            price_label: non_blank(price).unwrap_or(DEFAULT_PRICE_LABEL).to_string(),
            image_ref: non_blank(image).map(ImageRef::from),
        }
    }

    /// Set the image.
    pub fn with_image(mut self, image: impl Into<ImageRef>) -> Self {
        self.image_ref = Some(image.into());
        self
    }

    /// Identity used in the cart: the display name.
    pub fn product_id(&self) -> ProductId {
        ProductId::new(self.display_name.as_str())
    }

    /// Display name.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Parsed unit price; see [`Price::parse_label`].
    pub fn unit_price(&self) -> Price {
        Price::parse_label(&self.price_label)
    }

    /// Image, if any.
    pub fn image_ref(&self) -> Option<&ImageRef> {
        self.image_ref.as_ref()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// The products listed on the storefront.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    products: Vec<ProductRecord>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a product.
    pub fn push(&mut self, product: ProductRecord) {
        self.products.push(product);
    }

    /// All products in listing order.
    pub fn products(&self) -> &[ProductRecord] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Find a product by name, ignoring case and surrounding whitespace.
    pub fn find(&self, name: &str) -> Option<&ProductRecord> {
        let wanted = name.trim().to_lowercase();
        self.products
            .iter()
            .find(|p| p.display_name.to_lowercase() == wanted)
    }

    /// Products whose name contains `query`, ignoring case.
    ///
    /// A blank query matches everything.
    pub fn search<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a ProductRecord> + 'a {
        let needle = query.trim().to_lowercase();
        self.products
            .iter()
            .filter(move |p| p.display_name.to_lowercase().contains(&needle))
    }
}

impl From<Vec<ProductRecord>> for Catalog {
    fn from(products: Vec<ProductRecord>) -> Self {
        Self { products }
    }
}

impl FromIterator<ProductRecord> for Catalog {
    fn from_iter<I: IntoIterator<Item = ProductRecord>>(iter: I) -> Self {
        Self {
            products: iter.into_iter().collect(),
        }
    }
}
