//! SweetBites CLI - the storefront cart from the command line.
//!
//! Commands:
//! - `sweetbites add` - Add a product to the cart
//! - `sweetbites remove` - Remove a cart line
//! - `sweetbites qty` - Change a line's quantity
//! - `sweetbites show` - Show the cart and its total
//! - `sweetbites products` - List catalog products
//! - `sweetbites checkout` - Hand the cart to the enquiry page
//! - `sweetbites config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{AddArgs, CheckoutArgs, ConfigArgs, ProductsArgs, QtyArgs, RemoveArgs};

/// SweetBites CLI - Manage the storefront shopping cart
#[derive(Parser)]
#[command(name = "sweetbites")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add one unit of a product to the cart
    Add(AddArgs),

    /// Remove a line from the cart
    Remove(RemoveArgs),

    /// Change the quantity of a cart line
    Qty(QtyArgs),

    /// Show the cart
    Show,

    /// List catalog products
    Products(ProductsArgs),

    /// Send the cart to the enquiry page
    Checkout(CheckoutArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    let ctx = match context::Context::load(cli.config.as_deref(), output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    // Execute command
    let result = match cli.command {
        Commands::Add(args) => commands::add::run(args, &ctx),
        Commands::Remove(args) => commands::remove::run(args, &ctx),
        Commands::Qty(args) => commands::qty::run(args, &ctx),
        Commands::Show => commands::show::run(&ctx),
        Commands::Products(args) => commands::products::run(args, &ctx),
        Commands::Checkout(args) => commands::checkout::run(args, &ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

/// Log to stderr so stdout stays clean for `--json`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .init();
}
