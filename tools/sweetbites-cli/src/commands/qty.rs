//! Change the quantity of a cart line.

use anyhow::{Context as _, Result};
use sweetbites_cart::cart::QuantityChange;

use super::{position_to_index, QtyArgs};
use crate::context::Context;

/// Run the qty command.
pub fn run(args: QtyArgs, ctx: &Context) -> Result<()> {
    let index = position_to_index(args.position)?;

    let mut cart = ctx.open_cart()?;
    let change = cart
        .change_quantity(index, args.delta)
        .with_context(|| format!("No item at position {}", args.position))?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "removed": change.is_removed(),
            "item": change.item(),
        }))?;
        return Ok(());
    }

    match change {
        QuantityChange::Updated(item) => ctx.output.success(&format!(
            "{} ×{}  {}",
            item.name(),
            item.quantity(),
            item.line_total()
        )),
        QuantityChange::Removed(item) => ctx
            .output
            .success(&format!("Removed {} from your cart", item.name())),
    }
    ctx.output.kv("Total", &cart.total_value().to_string());

    Ok(())
}
