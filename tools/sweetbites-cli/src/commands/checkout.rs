//! Hand the cart to the enquiry page.

use anyhow::{Context as _, Result};
use dialoguer::Confirm;

use super::CheckoutArgs;
use crate::context::Context;

/// Run the checkout command.
pub fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let handoff = ctx.config.checkout.handoff()?;
    let mut cart = ctx.open_cart()?;

    if !cart.cart().is_empty() && !args.yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Send {} item(s) totalling {} to the enquiry page?",
                cart.total_count(),
                cart.total_value()
            ))
            .default(true)
            .interact()?;

        if !confirmed {
            ctx.output.info("Checkout cancelled");
            return Ok(());
        }
    }

    let link = cart
        .begin_checkout(&handoff)
        .context("Checkout failed")?;

    if link.exceeds_safe_length {
        ctx.output.warn(&format!(
            "The enquiry link is {} characters long (limit {}); some items may not arrive",
            link.url.as_str().len(),
            handoff.max_url_length
        ));
    }

    if ctx.output.is_json() {
        ctx.output.json(&link)?;
        return Ok(());
    }

    ctx.output.success("Your cart is ready for enquiry");
    ctx.output.kv("Total", &link.total.to_string());
    ctx.output.kv("Items", &link.item_count.to_string());
    ctx.output.line(link.url.as_str());

    Ok(())
}
