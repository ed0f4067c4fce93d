//! CLI command implementations.

pub mod add;
pub mod checkout;
pub mod config;
pub mod products;
pub mod qty;
pub mod remove;
pub mod show;

use anyhow::{bail, Result};
use clap::{Args, Subcommand};

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// Product name, as listed in the catalog.
    pub name: String,

    /// Price label (e.g. "R45"); looked up in the catalog when omitted.
    #[arg(short, long)]
    pub price: Option<String>,

    /// Product image.
    #[arg(short, long)]
    pub image: Option<String>,
}

/// Arguments for the remove command.
#[derive(Args)]
pub struct RemoveArgs {
    /// Cart position, starting at 1.
    pub position: usize,
}

/// Arguments for the qty command.
#[derive(Args)]
pub struct QtyArgs {
    /// Cart position, starting at 1.
    pub position: usize,

    /// Amount to add; negative to take away.
    #[arg(allow_negative_numbers = true)]
    pub delta: i64,
}

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Only list products whose name contains this.
    pub query: Option<String>,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Show where configuration and cart data live.
    Path,
}

/// Translate a 1-based cart position into a store index.
pub(crate) fn position_to_index(position: usize) -> Result<usize> {
    match position.checked_sub(1) {
        Some(index) => Ok(index),
        None => bail!("No item at position 0: positions start at 1"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_to_index() {
        assert_eq!(position_to_index(1).unwrap(), 0);
        assert_eq!(position_to_index(12).unwrap(), 11);
        assert!(position_to_index(0).is_err());
    }
}
