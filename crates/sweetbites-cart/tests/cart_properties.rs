//! Behavior-lock tests for cart mutation sequences.

use std::collections::HashSet;

use proptest::prelude::*;
use sweetbites_cart::prelude::*;
use sweetbites_storage::{KeyValueStore, MemoryStore};

#[derive(Debug, Clone)]
enum Op {
    Add { product: u8, price: u64 },
    Remove { index: usize },
    Change { index: usize, delta: i64 },
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0u8..6, 0u64..500).prop_map(|(product, price)| Op::Add { product, price }),
        1 => (0usize..8).prop_map(|index| Op::Remove { index }),
        2 => (0usize..8, -4i64..5).prop_map(|(index, delta)| Op::Change { index, delta }),
    ]
}

fn apply(store: &mut CartStore<MemoryStore>, op: &Op) {
    match *op {
        Op::Add { product, price } => {
            let name = format!("Product {product}");
            store.add_item(name.as_str(), name.as_str(), Price::new(price), None);
        }
        Op::Remove { index } => {
            let _ = store.remove_item(index);
        }
        Op::Change { index, delta } => {
            let _ = store.change_quantity(index, delta);
        }
    }
}

fn open(backend: MemoryStore) -> CartStore<MemoryStore> {
    CartStore::open(backend, CartStoreConfig::default())
}

proptest! {
    #[test]
    fn invariants_hold_after_every_operation(ops in prop::collection::vec(op(), 1..60)) {
        let mut store = open(MemoryStore::new());

        for op in &ops {
            apply(&mut store, op);

            let items = store.snapshot();
            let mut ids = HashSet::new();
            for item in &items {
                prop_assert!(item.quantity() >= 1);
                prop_assert!(ids.insert(item.product_id().clone()));
            }

            let expected: u64 = items
                .iter()
                .map(|i| i.unit_price().amount() * u64::from(i.quantity()))
                .sum();
            prop_assert_eq!(store.total_value(), Price::new(expected));

            let count: u64 = items.iter().map(|i| u64::from(i.quantity())).sum();
            prop_assert_eq!(store.total_count(), count);
        }
    }

    #[test]
    fn persisted_cart_restores_identically(ops in prop::collection::vec(op(), 0..40)) {
        let mut store = open(MemoryStore::new());
        for op in &ops {
            apply(&mut store, op);
        }
        store.persist().unwrap();
        let before = store.snapshot();

        let reopened = open(store.into_store());
        prop_assert_eq!(reopened.snapshot(), before);
    }

    #[test]
    fn add_existing_increments_by_one(
        ops in prop::collection::vec(op(), 0..30),
        product in 0u8..6,
    ) {
        let mut store = open(MemoryStore::new());
        for op in &ops {
            apply(&mut store, op);
        }
        let name = format!("Product {product}");
        let id = ProductId::new(name.as_str());

        let len_before = store.cart().len();
        let qty_before = store
            .cart()
            .position(&id)
            .and_then(|i| store.cart().get(i))
            .map(LineItem::quantity);

        let item = store.add_item(name.as_str(), name.as_str(), Price::new(1), None);

        match qty_before {
            Some(q) => {
                prop_assert_eq!(item.quantity(), q + 1);
                prop_assert_eq!(store.cart().len(), len_before);
            }
            None => {
                prop_assert_eq!(item.quantity(), 1);
                prop_assert_eq!(store.cart().len(), len_before + 1);
            }
        }
    }

    #[test]
    fn out_of_range_changes_nothing(
        ops in prop::collection::vec(op(), 0..30),
        past_end in 0usize..5,
        delta in -3i64..3,
    ) {
        let mut store = open(MemoryStore::new());
        for op in &ops {
            apply(&mut store, op);
        }
        let before = store.snapshot();
        let index = before.len() + past_end;

        let is_out_of_range = matches!(
            store.remove_item(index),
            Err(CartError::IndexOutOfRange { .. })
        );
        prop_assert!(is_out_of_range);
        prop_assert!(store.change_quantity(index, delta).is_err());
        prop_assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn price_parsing_is_stable(label in ".{0,24}") {
        let first = Price::parse_label(&label);
        prop_assert_eq!(first, Price::parse_label(&label));
        if !label.chars().any(|c| c.is_ascii_digit()) {
            prop_assert_eq!(first, Price::ZERO);
        }
    }

    #[test]
    fn garbage_in_storage_restores_empty(raw in ".{0,64}") {
        let backend = MemoryStore::new();
        backend.set("sweetbites_cart", &raw).unwrap();

        let store = open(backend);
        // Anything that happens to decode must still be a valid cart.
        prop_assert!(store.cart().validate().is_ok());
        if serde_json::from_str::<serde_json::Value>(&raw).is_err() {
            prop_assert!(store.cart().is_empty());
            prop_assert_eq!(store.total_value(), Price::ZERO);
            prop_assert_eq!(store.total_count(), 0);
        }
    }
}

#[test]
fn vanilla_cupcake_added_twice() {
    let mut store = open(MemoryStore::new());
    store.add_item("cupcake-1", "Vanilla Cupcake", Price::new(45), None);
    assert_eq!(store.snapshot()[0].quantity(), 1);

    store.add_item("cupcake-1", "Vanilla Cupcake", Price::new(45), None);
    let items = store.snapshot();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name(), "Vanilla Cupcake");
    assert_eq!(items[0].quantity(), 2);
    assert_eq!(store.total_value(), Price::new(90));
}

#[test]
fn last_unit_decrement_empties_cart() {
    let mut store = open(MemoryStore::new());
    store.add_item("X", "X", Price::new(10), None);

    store.change_quantity(0, -1).unwrap();
    assert!(store.snapshot().is_empty());
    assert_eq!(store.total_count(), 0);
}

#[test]
fn missing_storage_restores_empty() {
    let mut store = open(MemoryStore::new());
    assert_eq!(store.restore(), RestoreOutcome::Empty);
    assert_eq!(store.total_value(), Price::ZERO);
    assert_eq!(store.total_count(), 0);
}
