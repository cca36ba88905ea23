//! The cart store: reducer state plus persistence.

use super::state::{reduce, CartAction, CartLine, CartState};
use super::storage::KeyValueStorage;
use crate::model::MenuItemRef;
use serde::Deserialize;
use tracing::{debug, info, warn};

/// Line as found in storage. Quantities are signed so hand-edited values still parse and
/// get normalized instead of discarding the whole cart.
#[derive(Deserialize)]
struct StoredLine {
    #[serde(rename = "menuItem")]
    item: MenuItemRef,
    quantity: i64,
}

/// A cart bound to the storage it persists into.
///
/// Every action is applied synchronously through [`reduce`]; actions that change the line
/// list are followed by a write of the full list under `key`. Storage failures are logged
/// and never reach the caller.
pub struct CartStore<S: KeyValueStorage> {
    storage: S,
    key: String,
    state: CartState,
}

impl<S: KeyValueStorage> CartStore<S> {
    /// Creates the store, seeding it from whatever `storage` holds under `key`.
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let mut store = Self {
            storage,
            key,
            state: CartState::default(),
        };
        if let Some(lines) = store.rehydrate() {
            store.state = reduce(CartState::default(), CartAction::Load(lines));
            info!(key = %store.key, lines = store.state.lines.len(), "Cart restored");
        }
        store
    }

    fn rehydrate(&self) -> Option<Vec<CartLine>> {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.key, "No stored cart");
                return None;
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to read stored cart");
                return None;
            }
        };

        match serde_json::from_str::<Vec<StoredLine>>(&raw) {
            Ok(stored) => Some(
                stored
                    .into_iter()
                    .filter(|line| line.quantity > 0)
                    .map(|line| CartLine {
                        item: line.item,
                        quantity: u32::try_from(line.quantity).unwrap_or(u32::MAX),
                    })
                    .collect(),
            ),
            Err(e) => {
                warn!(key = %self.key, error = %e, "Stored cart is unreadable, starting empty");
                None
            }
        }
    }

    fn persist(&self) {
        let value = match serde_json::to_string(&self.state.lines) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "Failed to serialize cart");
                return;
            }
        };
        if let Err(e) = self.storage.set(&self.key, value) {
            warn!(key = %self.key, error = %e, "Failed to save cart");
        }
    }

    /// Applies one action and persists the lines if it could have changed them.
    pub fn dispatch(&mut self, action: CartAction) {
        let persist = action.touches_lines();
        debug!(?action, "Cart action");
        self.state = reduce(std::mem::take(&mut self.state), action);
        if persist {
            self.persist();
        }
    }

    pub fn add_item(&mut self, item: MenuItemRef) {
        self.dispatch(CartAction::AddItem(item));
    }

    pub fn add_item_with_quantity(&mut self, item: MenuItemRef, quantity: i64) {
        self.dispatch(CartAction::AddItemWithQuantity { item, quantity });
    }

    pub fn remove_item(&mut self, id: &str) {
        self.dispatch(CartAction::RemoveItem(id.to_string()));
    }

    pub fn set_quantity(&mut self, id: &str, quantity: i64) {
        self.dispatch(CartAction::SetQuantity {
            id: id.to_string(),
            quantity,
        });
    }

    pub fn clear(&mut self) {
        self.dispatch(CartAction::Clear);
    }

    pub fn toggle_open(&mut self) {
        self.dispatch(CartAction::Toggle);
    }

    pub fn set_open(&mut self, open: bool) {
        self.dispatch(CartAction::SetOpen(open));
    }

    pub fn state(&self) -> &CartState {
        &self.state
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.state.lines
    }

    pub fn is_open(&self) -> bool {
        self.state.open
    }

    pub fn total_items(&self) -> u32 {
        self.state.total_items()
    }

    pub fn subtotal(&self) -> f64 {
        self.state.subtotal()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::storage::{MemoryStorage, StorageError};
    use std::sync::atomic::{AtomicUsize, Ordering};

    const KEY: &str = "indian-aroma-cart";

    fn naan() -> MenuItemRef {
        MenuItemRef::new("item_4", "Garlic Naan", 3.5)
    }

    #[test]
    fn test_lines_written_after_each_line_change() {
        let storage = MemoryStorage::new();
        let mut cart = CartStore::new(storage.clone(), KEY);

        cart.add_item(naan());
        let saved = storage.get(KEY).unwrap().unwrap();
        assert!(saved.contains("\"menuItem\""));
        assert!(saved.contains("\"quantity\":1"));

        cart.clear();
        assert_eq!(storage.get(KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_visibility_is_not_persisted() {
        struct CountingStorage(AtomicUsize);
        impl KeyValueStorage for CountingStorage {
            fn get(&self, _: &str) -> Result<Option<String>, StorageError> {
                Ok(None)
            }
            fn set(&self, _: &str, _: String) -> Result<(), StorageError> {
                self.0.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        }

        let mut cart = CartStore::new(CountingStorage(AtomicUsize::new(0)), KEY);
        cart.toggle_open();
        cart.set_open(false);
        assert_eq!(cart.storage().0.load(Ordering::SeqCst), 0);

        cart.add_item(naan());
        cart.remove_item("nothing-here");
        assert_eq!(cart.storage().0.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_restores_saved_lines() {
        let storage = MemoryStorage::new();
        {
            let mut cart = CartStore::new(storage.clone(), KEY);
            cart.add_item_with_quantity(naan(), 3);
            cart.set_open(true);
        }

        let cart = CartStore::new(storage, KEY);
        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.subtotal(), 10.5);
        assert!(!cart.is_open());
    }

    #[test]
    fn test_unreadable_storage_starts_empty() {
        let storage = MemoryStorage::new();
        storage.set(KEY, "{ definitely not a cart".into()).unwrap();

        let cart = CartStore::new(storage, KEY);
        assert!(cart.state().is_empty());
    }

    #[test]
    fn test_failing_writes_do_not_surface() {
        struct BrokenStorage;
        impl KeyValueStorage for BrokenStorage {
            fn get(&self, _: &str) -> Result<Option<String>, StorageError> {
                Err(StorageError::Poisoned)
            }
            fn set(&self, _: &str, _: String) -> Result<(), StorageError> {
                Err(StorageError::Poisoned)
            }
        }

        let mut cart = CartStore::new(BrokenStorage, KEY);
        cart.add_item(naan());
        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn test_hand_edited_storage_is_normalized() {
        let storage = MemoryStorage::new();
        let raw = r#"[
            {"menuItem": {"id": "a", "name": "A", "price": 2.0}, "quantity": -2},
            {"menuItem": {"id": "b", "name": "B", "price": 1.0}, "quantity": 12000},
            {"menuItem": {"id": "c", "name": "C", "price": 1.0}, "quantity": 1},
            {"menuItem": {"id": "c", "name": "C", "price": 1.0}, "quantity": 2}
        ]"#;
        storage.set(KEY, raw.into()).unwrap();

        let cart = CartStore::new(storage, KEY);
        let lines: Vec<(&str, u32)> = cart
            .lines()
            .iter()
            .map(|l| (l.item.id.as_str(), l.quantity))
            .collect();
        assert_eq!(lines, vec![("b", 999), ("c", 3)]);
    }
}
