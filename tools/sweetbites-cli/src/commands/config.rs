//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Path => show_paths(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Current Configuration");

    if ctx.output.is_json() {
        ctx.output.json(&ctx.config)?;
        return Ok(());
    }

    // Storage section
    ctx.output.info("");
    ctx.output.info("[storage]");
    ctx.output.kv("dir", &ctx.data_dir().display().to_string());
    ctx.output.kv("key", &ctx.config.storage.key);
    ctx.output.kv("legacy_keys", &ctx.config.storage.legacy_keys.join(", "));

    // Checkout section
    ctx.output.info("");
    ctx.output.info("[checkout]");
    ctx.output.kv("enquiry_url", &ctx.config.checkout.enquiry_url);
    ctx.output.kv("query_param", &ctx.config.checkout.query_param);
    ctx.output.kv(
        "max_url_length",
        &ctx.config.checkout.max_url_length.to_string(),
    );

    // Analytics section
    ctx.output.info("");
    ctx.output.info("[analytics]");
    ctx.output.kv("enabled", &ctx.config.analytics.enabled.to_string());

    // Catalog
    if !ctx.config.catalog.is_empty() {
        ctx.output.info("");
        ctx.output.info("Catalog:");
        for entry in &ctx.config.catalog {
            ctx.output.list_item(&entry.name);
        }
    }

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("sweetbites.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn show_paths(ctx: &Context) -> Result<()> {
    let config = ctx
        .config_path
        .as_ref()
        .map(|p| p.display().to_string());
    let data = ctx.data_dir().display().to_string();

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "config": config, "data": data }))?;
        return Ok(());
    }

    ctx.output.kv(
        "config",
        config.as_deref().unwrap_or("(none, using defaults)"),
    );
    ctx.output.kv("data", &data);

    Ok(())
}
