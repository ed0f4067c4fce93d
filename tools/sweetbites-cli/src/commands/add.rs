//! Add a product to the cart.

use anyhow::Result;
use sweetbites_cart::catalog::ProductRecord;

use super::AddArgs;
use crate::context::Context;

/// Run the add command.
pub fn run(args: AddArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog();
    let listed = catalog.find(&args.name);
    let product = resolve_product(&args, listed);

    if listed.is_none() && args.price.is_none() {
        ctx.output.warn(&format!(
            "'{}' is not in the catalog and has no price; adding it at {}",
            product.display_name(),
            product.unit_price()
        ));
    }

    let mut cart = ctx.open_cart()?;
    let item = cart.add_product(&product);

    if ctx.output.is_json() {
        ctx.output.json(&item)?;
        return Ok(());
    }

    ctx.output.success("Item added to cart!");
    ctx.output.kv(
        item.name(),
        &format!("×{}  {}", item.quantity(), item.line_total()),
    );

    Ok(())
}

/// Explicit flags win; otherwise the catalog entry is used as listed.
fn resolve_product(args: &AddArgs, listed: Option<&ProductRecord>) -> ProductRecord {
    let name = listed.map_or(args.name.as_str(), ProductRecord::display_name);
    let price = args
        .price
        .as_deref()
        .or_else(|| listed.map(|p| p.price_label.as_str()));
    let image = args
        .image
        .as_deref()
        .or_else(|| listed.and_then(|p| p.image_ref()).map(|i| i.as_str()));

    ProductRecord::from_scraped(Some(name), price, image)
}
