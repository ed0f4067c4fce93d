//! Show the cart.

use anyhow::Result;
use sweetbites_cart::cart::Cart;

use crate::context::Context;
use crate::output::{format_badge, format_line, format_total};

/// Run the show command.
pub fn run(ctx: &Context) -> Result<()> {
    let cart = ctx.open_cart()?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "items": cart.cart(),
            "total": cart.total_value(),
            "count": cart.total_count(),
        }))?;
        return Ok(());
    }

    ctx.output.header("Your Cart");
    for line in render(cart.cart()) {
        ctx.output.line(&line);
    }

    Ok(())
}

/// Lines of the cart view.
fn render(cart: &Cart) -> Vec<String> {
    let mut lines = Vec::with_capacity(cart.len() + 2);

    if cart.is_empty() {
        lines.push("Your cart is empty".to_string());
    } else {
        lines.extend(
            cart.items()
                .iter()
                .enumerate()
                .map(|(index, item)| format_line(index + 1, item)),
        );
    }

    lines.push(format_total(cart.total_value()));

    let count = cart.total_count();
    if count > 0 {
        lines.push(format_badge(count));
    }

    lines
}
