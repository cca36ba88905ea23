//! # Category Actor
//!
//! Owns the menu categories. Categories have no dependencies (`Context = ()`) and are
//! ordered in one global scope, so a new category always lands at the end of the menu.
//!
//! ## Structure
//!
//! - [`entity`] - [`OrderedEntity`](ordered_actor::OrderedEntity) implementation for [`Category`]
//! - [`error`] - [`CategoryError`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use aroma_menu::category_actor;
//! use aroma_menu::model::CategoryCreate;
//! use ordered_actor::OrderedClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = category_actor::new(32);
//!     tokio::spawn(actor.run(()));
//!
//!     let mains = client.create_category(CategoryCreate::new("Mains", "mains")).await?;
//!     let starters = client.create_category(CategoryCreate::new("Starters", "starters")).await?;
//!     client.reorder(vec![starters, mains]).await?;
//!
//!     let names: Vec<_> = client.list(None).await?.into_iter().map(|c| c.name).collect();
//!     assert_eq!(names, vec!["Starters", "Mains"]);
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::CategoryClient;
use crate::model::Category;
use ordered_actor::CollectionActor;

/// Creates a new Category actor and its client.
pub fn new(buffer_size: usize) -> (CollectionActor<Category>, CategoryClient) {
    let (actor, generic_client) = CollectionActor::new(buffer_size);
    (actor, CategoryClient::new(generic_client))
}
