//! List catalog products.

use anyhow::Result;
use sweetbites_cart::catalog::ProductRecord;

use super::ProductsArgs;
use crate::context::Context;

/// Run the products command.
pub fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog();
    let query = args.query.as_deref().unwrap_or("");
    let matches: Vec<&ProductRecord> = catalog.search(query).collect();

    if ctx.output.is_json() {
        ctx.output.json(&matches)?;
        return Ok(());
    }

    if catalog.is_empty() {
        ctx.output.info("No products configured. Add [[catalog]] entries to sweetbites.toml.");
        return Ok(());
    }

    if matches.is_empty() {
        ctx.output.info(&format!("No products match '{}'", query.trim()));
        return Ok(());
    }

    ctx.output.header("Products");
    for product in matches {
        ctx.output.list_item(&format!(
            "{}  {}",
            product.display_name(),
            product.unit_price()
        ));
    }

    Ok(())
}
