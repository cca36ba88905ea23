//! # Cart
//!
//! The shopping cart as a reducer: [`CartAction`]s are applied to a [`CartState`] by the
//! pure [`reduce`] function, and [`CartStore`] wraps that with persistence into a
//! [`KeyValueStorage`].
//!
//! ```rust
//! use aroma_menu::cart::{CartStore, MemoryStorage};
//! use aroma_menu::model::MenuItemRef;
//!
//! let storage = MemoryStorage::new();
//! let mut cart = CartStore::new(storage.clone(), "indian-aroma-cart");
//!
//! cart.add_item_with_quantity(MenuItemRef::new("a", "Samosa", 5.0), 2);
//! cart.add_item(MenuItemRef::new("b", "Butter Chicken", 10.0));
//! assert_eq!(cart.subtotal(), 20.0);
//! assert_eq!(cart.total_items(), 3);
//!
//! // the lines survive a restart
//! let restored = CartStore::new(storage, "indian-aroma-cart");
//! assert_eq!(restored.total_items(), 3);
//! ```
//!
//! Quantities are clamped to [`MAX_QUANTITY`] and cart edits never fail. Setting a
//! quantity of zero or less removes the line.

pub mod quantity_input;
pub mod state;
pub mod storage;
pub mod store;
pub mod upsell;

pub use quantity_input::{InputChange, QuantityInput};
pub use state::{reduce, CartAction, CartLine, CartState, MAX_QUANTITY};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
pub use store::CartStore;
