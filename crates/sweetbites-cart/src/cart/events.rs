//! Change notification for cart subscribers.

use sweetbites_storage::StorageError;

use crate::cart::{Cart, LineItem, RestoreOutcome};
use crate::checkout::CheckoutLink;

/// Something that happened to the cart.
///
/// Delivered to every [`CartListener`] after the change has been applied and
/// a save attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// One unit was added; `item` is the line after the add.
    ItemAdded { index: usize, item: LineItem },
    /// A line left the cart, either directly or because its quantity hit zero.
    ItemRemoved { index: usize, item: LineItem },
    /// A line's quantity moved by `delta` and stayed positive.
    QuantityChanged {
        index: usize,
        item: LineItem,
        delta: i64,
    },
    /// The cart was reloaded from storage.
    Restored { outcome: RestoreOutcome },
    /// The cart was handed off to the enquiry page.
    CheckoutStarted { link: CheckoutLink },
}

/// Subscriber to cart changes.
///
/// Rendering, badges and analytics all hang off this instead of being called
/// from the store directly.
pub trait CartListener {
    /// Called after every change, with the cart as it now is.
    fn cart_changed(&mut self, event: &CartEvent, cart: &Cart);

    /// Called when saving the cart failed. The in-memory cart is still valid.
    fn persistence_failed(&mut self, _error: &StorageError) {}
}

impl<F> CartListener for F
where
    F: FnMut(&CartEvent, &Cart),
{
    fn cart_changed(&mut self, event: &CartEvent, cart: &Cart) {
        self(event, cart)
    }
}

/// Handle returned by [`CartStore::subscribe`].
///
/// [`CartStore::subscribe`]: crate::cart::CartStore::subscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);
