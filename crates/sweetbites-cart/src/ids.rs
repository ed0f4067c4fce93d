//! Newtype identifiers.
//!
//! Using newtypes prevents accidentally mixing up a product's identity with
//! other strings, e.g. passing an image URL where a product ID is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate string newtypes.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Identity of a product in the cart.
    ///
    /// Comparison is exact and case-sensitive; products scraped from the
    /// page use their display name.
    ProductId
);

define_id!(
    /// Opaque image reference (usually a URL). Cosmetic only.
    ImageRef
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = ProductId::new("cupcake-1");
        assert_eq!(id.as_str(), "cupcake-1");
    }

    #[test]
    fn test_id_from_string() {
        let id: ProductId = "Vanilla Cupcake".into();
        assert_eq!(id.as_str(), "Vanilla Cupcake");
    }

    #[test]
    fn test_id_display() {
        let id = ProductId::new("Lemon Tart");
        assert_eq!(format!("{}", id), "Lemon Tart");
    }

    #[test]
    fn test_id_is_case_sensitive() {
        assert_eq!(ProductId::new("Scone"), ProductId::new("Scone"));
        assert_ne!(ProductId::new("Scone"), ProductId::new("scone"));
        assert_ne!(ProductId::new("Scone"), ProductId::new("Scone "));
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let json = serde_json::to_string(&ImageRef::new("img/tart.jpg")).unwrap();
        assert_eq!(json, "\"img/tart.jpg\"");
    }
}
