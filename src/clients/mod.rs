//! Type-safe wrappers around [`CollectionClient`](ordered_actor::CollectionClient).

pub mod category_client;
pub mod menu_item_client;

pub use category_client::*;
pub use menu_item_client::*;
