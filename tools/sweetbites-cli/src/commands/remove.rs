//! Remove a line from the cart.

use anyhow::{Context as _, Result};

use super::{position_to_index, RemoveArgs};
use crate::context::Context;

/// Run the remove command.
pub fn run(args: RemoveArgs, ctx: &Context) -> Result<()> {
    let index = position_to_index(args.position)?;

    let mut cart = ctx.open_cart()?;
    let removed = cart
        .remove_item(index)
        .with_context(|| format!("No item at position {}", args.position))?;

    if ctx.output.is_json() {
        ctx.output.json(&removed)?;
        return Ok(());
    }

    ctx.output.success(&format!("Removed {} from your cart", removed.name()));
    ctx.output.kv("Total", &cart.total_value().to_string());

    Ok(())
}
