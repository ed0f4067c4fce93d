//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use sweetbites_cart::analytics::{AnalyticsListener, TracingSink};
use sweetbites_cart::cart::{Cart, CartEvent, CartListener, CartStore};
use sweetbites_cart::catalog::Catalog;
use sweetbites_storage::{FileStore, StorageError};

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Where the configuration came from, if not defaults.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            let path = resolve(&cwd, Path::new(path));
            (CliConfig::load(&path)?, Some(path))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((path, config)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        if let Some(path) = &config_path {
            output.debug(&format!("Using config: {}", path.display()));
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(PathBuf, CliConfig)> {
        let mut current = start.to_path_buf();
        loop {
            for name in CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if !config_path.exists() {
                    continue;
                }
                match CliConfig::load(&config_path) {
                    Ok(config) => return Some((config_path, config)),
                    Err(error) => tracing::warn!(
                        path = %config_path.display(),
                        error = %format!("{error:#}"),
                        "skipping unreadable config file"
                    ),
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Directory holding the persisted cart.
    pub fn data_dir(&self) -> PathBuf {
        match &self.config.storage.dir {
            Some(dir) => self.resolve_path(dir),
            None => dirs_path().join("sweetbites"),
        }
    }

    /// Open the persisted cart with the configured listeners attached.
    pub fn open_cart(&self) -> Result<CartStore<FileStore>> {
        let dir = self.data_dir();
        let store = FileStore::open(dir.clone())
            .with_context(|| format!("Failed to open cart storage in {}", dir.display()))?;

        let mut cart = CartStore::open(store, self.config.storage.cart_store_config());
        cart.subscribe(SaveWarning {
            output: self.output.clone(),
        });
        if self.config.analytics.enabled {
            cart.subscribe(AnalyticsListener::new(TracingSink));
        }
        Ok(cart)
    }

    /// Products from the config file.
    pub fn catalog(&self) -> Catalog {
        self.config.catalog()
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        resolve(&self.cwd, path)
    }
}

fn resolve(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Get the platform-specific data directory.
fn dirs_path() -> PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local").join("share")
    } else {
        PathBuf::from("/tmp")
    }
}

/// Tells the user when the cart only lives in memory.
struct SaveWarning {
    output: Output,
}

impl CartListener for SaveWarning {
    fn cart_changed(&mut self, _event: &CartEvent, _cart: &Cart) {}

    fn persistence_failed(&mut self, error: &StorageError) {
        self.output.warn(&format!("could not save your cart: {}", error));
    }
}
