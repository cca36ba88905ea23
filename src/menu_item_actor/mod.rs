//! # Menu Item Actor
//!
//! Owns the dishes. Items are ordered per category (`Scope = CategoryId`) and depend on the
//! category actor: the [`CategoryClient`](crate::clients::CategoryClient) is injected as the
//! actor's context when it starts.
//!
//! ```rust
//! use aroma_menu::{category_actor, menu_item_actor};
//! use aroma_menu::model::{CategoryCreate, MenuItemCreate};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (category_actor, categories) = category_actor::new(32);
//!     let (item_actor, items) = menu_item_actor::new(32);
//!     tokio::spawn(category_actor.run(()));
//!     tokio::spawn(item_actor.run(categories.clone()));
//!
//!     let mains = categories.create_category(CategoryCreate::new("Mains", "mains")).await?;
//!     items.create_item(MenuItemCreate::new(mains, "Butter Chicken", 16.5)).await?;
//!     let naan = items.create_item(MenuItemCreate::new(mains, "Garlic Naan", 3.5)).await?;
//!
//!     let listed = items.list_by_category(mains).await?;
//!     assert_eq!(listed[1].id, naan);
//!     assert_eq!(listed[1].display_order, 1);
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::MenuItemClient;
use crate::model::MenuItem;
use ordered_actor::CollectionActor;

/// Creates a new MenuItem actor and its client. Run it with a `CategoryClient` as context.
pub fn new(buffer_size: usize) -> (CollectionActor<MenuItem>, MenuItemClient) {
    let (actor, generic_client) = CollectionActor::new(buffer_size);
    (actor, MenuItemClient::new(generic_client))
}
