//! Analytics events derived from cart changes.
//!
//! Analytics is fire-and-forget: an [`AnalyticsListener`] subscribed to a
//! [`CartStore`](crate::cart::CartStore) turns cart events into
//! [`AnalyticsEvent`]s and hands them to a sink. Sink failures are logged and
//! dropped; they never reach the cart.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::cart::{Cart, CartEvent, CartListener};
use crate::error::AnalyticsError;
use crate::price::CURRENCY_CODE;

/// `tracing` target used by [`TracingSink`].
pub const ANALYTICS_TARGET: &str = "sweetbites::analytics";

/// Analytics event names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventName {
    AddToCart,
    RemoveFromCart,
    UpdateCartQuantity,
    BeginCheckout,
}

impl EventName {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventName::AddToCart => "add_to_cart",
            EventName::RemoveFromCart => "remove_from_cart",
            EventName::UpdateCartQuantity => "update_cart_quantity",
            EventName::BeginCheckout => "begin_checkout",
        }
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single analytics event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsEvent {
    /// What happened.
    pub name: EventName,
    /// Event payload.
    pub attributes: Map<String, Value>,
    /// When the event was recorded.
    pub occurred_at: DateTime<Utc>,
}

impl AnalyticsEvent {
    /// Create an event with no attributes, stamped now.
    pub fn new(name: EventName) -> Self {
        Self {
            name,
            attributes: Map::new(),
            occurred_at: Utc::now(),
        }
    }

    /// Add an attribute.
    pub fn with_attribute(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.to_string(), value.into());
        self
    }

    /// Map a cart event to its analytics event.
    ///
    /// Restores are not user actions and produce nothing.
    pub fn from_cart_event(event: &CartEvent) -> Option<Self> {
        let analytics = match event {
            CartEvent::ItemAdded { item, .. } => Self::new(EventName::AddToCart)
                .with_attribute("item_name", item.name())
                .with_attribute("price", item.unit_price().amount())
                .with_attribute("quantity", 1),
            CartEvent::ItemRemoved { item, .. } => Self::new(EventName::RemoveFromCart)
                .with_attribute("item_name", item.name())
                .with_attribute("price", item.unit_price().amount())
                .with_attribute("quantity", item.quantity()),
            CartEvent::QuantityChanged { item, delta, .. } => {
                Self::new(EventName::UpdateCartQuantity)
                    .with_attribute("item_name", item.name())
                    .with_attribute("quantity", item.quantity())
                    .with_attribute("delta", *delta)
            }
            CartEvent::CheckoutStarted { link } => Self::new(EventName::BeginCheckout)
                .with_attribute("value", link.total.amount())
                .with_attribute("currency", CURRENCY_CODE)
                .with_attribute("items", link.item_count),
            CartEvent::Restored { .. } => return None,
        };
        Some(analytics)
    }

    /// Format as JSON string.
    pub fn to_json(&self) -> Result<String, AnalyticsError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Destination for analytics events.
pub trait AnalyticsSink {
    /// Deliver one event.
    fn send(&mut self, event: &AnalyticsEvent) -> Result<(), AnalyticsError>;
}

impl<K: AnalyticsSink + ?Sized> AnalyticsSink for Box<K> {
    fn send(&mut self, event: &AnalyticsEvent) -> Result<(), AnalyticsError> {
        (**self).send(event)
    }
}

/// Emits events as `tracing` records under [`ANALYTICS_TARGET`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl AnalyticsSink for TracingSink {
    fn send(&mut self, event: &AnalyticsEvent) -> Result<(), AnalyticsError> {
        let attributes = serde_json::to_string(&event.attributes)?;
        tracing::info!(
            target: ANALYTICS_TARGET,
            event = %event.name,
            %attributes,
            occurred_at = %event.occurred_at.to_rfc3339(),
            "analytics event"
        );
        Ok(())
    }
}

/// Feeds cart changes to an [`AnalyticsSink`].
#[derive(Debug)]
pub struct AnalyticsListener<K> {
    sink: K,
    dropped: u64,
}

impl<K: AnalyticsSink> AnalyticsListener<K> {
    pub fn new(sink: K) -> Self {
        Self { sink, dropped: 0 }
    }

    /// Events the sink failed to take.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn into_sink(self) -> K {
        self.sink
    }
}

impl<K: AnalyticsSink> CartListener for AnalyticsListener<K> {
    fn cart_changed(&mut self, event: &CartEvent, _cart: &Cart) {
        let Some(analytics) = AnalyticsEvent::from_cart_event(event) else {
            return;
        };
        if let Err(error) = self.sink.send(&analytics) {
            self.dropped += 1;
            tracing::warn!(event = %analytics.name, %error, "analytics event dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use serde_json::json;
    use sweetbites_storage::MemoryStore;
    use url::Url;

    use super::*;
    use crate::cart::{CartStore, CartStoreConfig};
    use crate::checkout::CheckoutHandoff;
    use crate::price::Price;

    #[derive(Default, Clone)]
    struct Recorder(Rc<RefCell<Vec<AnalyticsEvent>>>);

    impl AnalyticsSink for Recorder {
        fn send(&mut self, event: &AnalyticsEvent) -> Result<(), AnalyticsError> {
            self.0.borrow_mut().push(event.clone());
            Ok(())
        }
    }

    struct Broken;

    impl AnalyticsSink for Broken {
        fn send(&mut self, _: &AnalyticsEvent) -> Result<(), AnalyticsError> {
            Err(AnalyticsError::Delivery("offline".into()))
        }
    }

    fn names(events: &[AnalyticsEvent]) -> Vec<&'static str> {
        events.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_event_names_serialize() {
        assert_eq!(
            serde_json::to_value(EventName::UpdateCartQuantity).unwrap(),
            json!("update_cart_quantity")
        );
        assert_eq!(EventName::BeginCheckout.to_string(), "begin_checkout");
    }

    #[test]
    fn test_cart_activity_maps_to_events() {
        let recorder = Recorder::default();
        let mut store = CartStore::open(MemoryStore::new(), CartStoreConfig::default());
        store.subscribe(AnalyticsListener::new(recorder.clone()));

        store.add_item("Scone", "Scone", Price::new(20), None);
        store.add_item("Scone", "Scone", Price::new(20), None);
        store.change_quantity(0, 3).unwrap();
        let handoff =
            CheckoutHandoff::new(Url::parse("https://sweetbites.example/enquiry").unwrap());
        store.begin_checkout(&handoff).unwrap();
        store.remove_item(0).unwrap();
        store.restore();

        let events = recorder.0.borrow();
        assert_eq!(
            names(&events),
            [
                "add_to_cart",
                "add_to_cart",
                "update_cart_quantity",
                "begin_checkout",
                "remove_from_cart"
            ]
        );

        assert_eq!(
            Value::Object(events[0].attributes.clone()),
            json!({ "item_name": "Scone", "price": 20, "quantity": 1 })
        );
        assert_eq!(
            Value::Object(events[2].attributes.clone()),
            json!({ "item_name": "Scone", "quantity": 5, "delta": 3 })
        );
        assert_eq!(
            Value::Object(events[3].attributes.clone()),
            json!({ "value": 100, "currency": "ZAR", "items": 5 })
        );
        assert_eq!(
            Value::Object(events[4].attributes.clone()),
            json!({ "item_name": "Scone", "price": 20, "quantity": 5 })
        );
    }

    #[test]
    fn test_decrement_to_zero_reports_removal() {
        let recorder = Recorder::default();
        let mut store = CartStore::open(MemoryStore::new(), CartStoreConfig::default());
        store.add_item("Tart", "Tart", Price::new(30), None);
        store.subscribe(AnalyticsListener::new(recorder.clone()));

        store.change_quantity(0, -1).unwrap();
        assert_eq!(names(&recorder.0.borrow()), ["remove_from_cart"]);
    }

    #[test]
    fn test_failing_sink_does_not_affect_cart() {
        let mut listener = AnalyticsListener::new(Broken);
        let mut store = CartStore::open(MemoryStore::new(), CartStoreConfig::default());
        let item = store.add_item("Scone", "Scone", Price::new(20), None);

        let event = CartEvent::ItemAdded { index: 0, item };
        listener.cart_changed(&event, store.cart());
        assert_eq!(listener.dropped(), 1);

        store.subscribe(AnalyticsListener::new(Broken));
        store.add_item("Scone", "Scone", Price::new(20), None);
        assert_eq!(store.total_count(), 2);
        assert!(store.is_durable());
    }

    #[test]
    fn test_tracing_sink_accepts_events() {
        let mut sink = TracingSink;
        let event = AnalyticsEvent::new(EventName::AddToCart).with_attribute("item_name", "Scone");
        assert!(sink.send(&event).is_ok());
        assert!(event.to_json().unwrap().contains("\"add_to_cart\""));
    }
}
