//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sweetbites_cart::cart::{CartStoreConfig, LEGACY_STORAGE_KEY};
use sweetbites_cart::catalog::{Catalog, ProductRecord};
use sweetbites_cart::checkout::{
    CheckoutHandoff, DEFAULT_CART_QUERY_PARAM, DEFAULT_MAX_URL_LENGTH,
};
use url::Url;

/// File names searched for, in order, in each directory.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["sweetbites.toml", ".sweetbites.toml", "sweetbites.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Cart storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Checkout hand-off configuration.
    #[serde(default)]
    pub checkout: CheckoutConfig,

    /// Analytics configuration.
    #[serde(default)]
    pub analytics: AnalyticsConfig,

    /// Products offered by `add` and `products`.
    #[serde(default)]
    pub catalog: Vec<CatalogEntry>,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// The catalog built from `[[catalog]]` entries.
    pub fn catalog(&self) -> Catalog {
        self.catalog.iter().map(CatalogEntry::to_record).collect()
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Cart storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the cart file (default: `~/.local/share/sweetbites`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,

    /// Storage slot for the cart.
    #[serde(default = "default_storage_key")]
    pub key: String,

    /// Older slots to migrate from.
    #[serde(default = "default_legacy_keys")]
    pub legacy_keys: Vec<String>,
}

fn default_storage_key() -> String {
    CartStoreConfig::default().storage_key
}

fn default_legacy_keys() -> Vec<String> {
    vec![LEGACY_STORAGE_KEY.to_string()]
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: None,
            key: default_storage_key(),
            legacy_keys: default_legacy_keys(),
        }
    }
}

impl StorageConfig {
    /// Settings for the cart store.
    pub fn cart_store_config(&self) -> CartStoreConfig {
        CartStoreConfig {
            storage_key: self.key.clone(),
            legacy_keys: self.legacy_keys.clone(),
        }
    }
}

/// Checkout hand-off settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// Enquiry page the cart is sent to.
    #[serde(default = "default_enquiry_url")]
    pub enquiry_url: String,

    /// Query parameter carrying the cart.
    #[serde(default = "default_query_param")]
    pub query_param: String,

    /// Links longer than this are flagged.
    #[serde(default = "default_max_url_length")]
    pub max_url_length: usize,
}

fn default_enquiry_url() -> String {
    "https://sweetbites.co.za/enquiry.html".to_string()
}

fn default_query_param() -> String {
    DEFAULT_CART_QUERY_PARAM.to_string()
}

fn default_max_url_length() -> usize {
    DEFAULT_MAX_URL_LENGTH
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            enquiry_url: default_enquiry_url(),
            query_param: default_query_param(),
            max_url_length: default_max_url_length(),
        }
    }
}

impl CheckoutConfig {
    /// Build the hand-off, validating the enquiry URL.
    pub fn handoff(&self) -> Result<CheckoutHandoff> {
        let url = Url::parse(&self.enquiry_url)
            .with_context(|| format!("Invalid checkout.enquiry_url: {}", self.enquiry_url))?;
        Ok(CheckoutHandoff::new(url)
            .with_query_param(self.query_param.as_str())
            .with_max_url_length(self.max_url_length))
    }
}

/// Analytics settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Emit analytics events to the log.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// A product as written in the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,

    /// Price label, e.g. `"R45"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl CatalogEntry {
    fn to_record(&self) -> ProductRecord {
        ProductRecord::from_scraped(
            Some(&self.name),
            self.price.as_deref(),
            self.image.as_deref(),
        )
    }
}

/// Generate a default sweetbites.toml config file.
pub fn generate_default_config() -> String {
    r#"# SweetBites storefront configuration

[storage]
# dir = "/var/lib/sweetbites"
key = "sweetbites_cart"
legacy_keys = ["cart"]

[checkout]
enquiry_url = "https://sweetbites.co.za/enquiry.html"
query_param = "cart"
max_url_length = 2000

[analytics]
enabled = true

[[catalog]]
name = "Vanilla Cupcake"
price = "R45"
image = "images/vanilla-cupcake.jpg"

[[catalog]]
name = "Chocolate Cupcake"
price = "R50"
image = "images/chocolate-cupcake.jpg"

[[catalog]]
name = "Lemon Tart"
price = "R30"

[[catalog]]
name = "Celebration Cake"
price = "R450"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweetbites_cart::Price;

    #[test]
    fn test_default_config_parses() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();

        assert_eq!(config.storage.key, "sweetbites_cart");
        assert_eq!(config.storage.legacy_keys, vec!["cart".to_string()]);
        assert!(config.analytics.enabled);
        assert_eq!(config.catalog.len(), 4);

        let catalog = config.catalog();
        let tart = catalog.find("lemon tart").unwrap();
        assert_eq!(tart.unit_price(), Price::new(30));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: CliConfig = toml::from_str("").unwrap();

        assert!(config.storage.dir.is_none());
        assert_eq!(config.storage.key, "sweetbites_cart");
        assert_eq!(config.checkout.query_param, "cart");
        assert_eq!(config.checkout.max_url_length, 2000);
        assert!(config.analytics.enabled);
        assert!(config.catalog().is_empty());
    }

    #[test]
    fn test_catalog_entry_without_price() {
        let config: CliConfig = toml::from_str(
            r#"
            [[catalog]]
            name = "  Mystery Box "
            "#,
        )
        .unwrap();

        let catalog = config.catalog();
        let product = &catalog.products()[0];
        assert_eq!(product.display_name(), "Mystery Box");
        assert_eq!(product.unit_price(), Price::ZERO);
    }

    #[test]
    fn test_handoff_from_config() {
        let checkout = CheckoutConfig {
            query_param: "order".into(),
            max_url_length: 500,
            ..CheckoutConfig::default()
        };
        let handoff = checkout.handoff().unwrap();
        assert_eq!(handoff.query_param, "order");
        assert_eq!(handoff.max_url_length, 500);
        assert_eq!(handoff.enquiry_url.host_str(), Some("sweetbites.co.za"));
    }

    #[test]
    fn test_invalid_enquiry_url() {
        let checkout = CheckoutConfig {
            enquiry_url: "enquiry.html".into(),
            ..CheckoutConfig::default()
        };
        let err = checkout.handoff().unwrap_err();
        assert!(format!("{:#}", err).contains("checkout.enquiry_url"));
    }

    #[test]
    fn test_load_toml_and_json() {
        let dir = tempfile::tempdir().unwrap();
        let mut config: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        config.storage.dir = Some(dir.path().join("data"));
        config.analytics.enabled = false;

        let toml_path = dir.path().join("sweetbites.toml");
        std::fs::write(&toml_path, toml::to_string_pretty(&config).unwrap()).unwrap();
        let json_path = dir.path().join("sweetbites.json");
        std::fs::write(&json_path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

        for path in [toml_path, json_path] {
            let loaded = CliConfig::load(&path).unwrap();
            assert_eq!(loaded.storage.dir, config.storage.dir);
            assert!(!loaded.analytics.enabled);
            assert_eq!(loaded.catalog.len(), 4);
            assert_eq!(loaded.catalog[3].price.as_deref(), Some("R450"));
        }
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sweetbites.toml");
        std::fs::write(&path, "[storage\nkey = ").unwrap();

        let err = CliConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse TOML config"));
    }
}
