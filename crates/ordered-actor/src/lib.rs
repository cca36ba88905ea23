//! # Ordered Actor
//!
//! Building blocks for **user-orderable collections** managed by actors. Each collection
//! (menu categories, menu items, ...) lives inside one Tokio task that owns it exclusively
//! and answers requests sent through a cloneable client.
//!
//! On top of the usual Create / Get / Update / Delete lifecycle, every collection is
//! *ordered*: each entity carries a zero-based `display_order`, and the collection
//! understands two extra requests:
//!
//! - **List**: the authoritative order, sorted by `display_order` (creation order breaks ties).
//! - **Reorder**: given a list of ids, set each one's `display_order` to its index in the list.
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`OrderedEntity`]) - domain model, scope and lifecycle hooks
//! 2. **Runtime Layer** ([`CollectionActor`]) - message processing and ordering state
//! 3. **Interface Layer** ([`CollectionClient`], [`OrderedClient`]) - typed communication
//!
//! ## Scopes
//!
//! `display_order` values are numbered inside a scope. A create appends to the end of its
//! scope (max + 1, or 0 for an empty scope), and `List` can be restricted to one scope.
//! Categories use the unit scope; menu items are scoped by their category.
//!
//! ```rust
//! use ordered_actor::{CollectionActor, OrderedEntity};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Dish { id: u32, course: &'static str, display_order: u32 }
//!
//! #[derive(Debug)] struct DishCreate { course: &'static str }
//! #[derive(Debug)] struct DishUpdate;
//! #[derive(Debug, thiserror::Error)] #[error("dish error")] struct DishError;
//!
//! #[async_trait]
//! impl OrderedEntity for Dish {
//!     type Id = u32;
//!     type Scope = &'static str;
//!     type Create = DishCreate;
//!     type Update = DishUpdate;
//!     type Context = ();
//!     type Error = DishError;
//!
//!     fn from_create_params(id: u32, params: DishCreate, display_order: u32) -> Result<Self, DishError> {
//!         Ok(Self { id, course: params.course, display_order })
//!     }
//!     fn create_scope(params: &DishCreate) -> &'static str { params.course }
//!     fn id(&self) -> &u32 { &self.id }
//!     fn scope(&self) -> &'static str { self.course }
//!     fn display_order(&self) -> u32 { self.display_order }
//!     fn set_display_order(&mut self, display_order: u32) { self.display_order = display_order; }
//!     async fn on_update(&mut self, _: DishUpdate, _: &()) -> Result<(), DishError> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = CollectionActor::<Dish>::new(10);
//!     tokio::spawn(actor.run(()));
//!
//!     client.create(DishCreate { course: "starters" }).await.unwrap();
//!     client.create(DishCreate { course: "mains" }).await.unwrap();
//!     let second = client.create(DishCreate { course: "starters" }).await.unwrap();
//!
//!     let dish = client.get(second).await.unwrap().unwrap();
//!     assert_eq!(dish.display_order, 1);
//!
//!     let starters = client.list(Some("starters")).await.unwrap();
//!     assert_eq!(starters.len(), 2);
//! }
//! ```
//!
//! ## Context Injection
//!
//! Dependencies are handed to an actor when it starts (`run(context)`), not when it is
//! built. A menu item actor can therefore hold the category client and validate
//! `category_id` in its `on_create` hook, while both actors are constructed independently.
//!
//! ## Reorder Semantics
//!
//! A reorder applies its per-id updates sequentially, in list order, and stops at the first
//! failure. Updates already applied stay applied; the returned
//! [`StoreError::ReorderFailed`] names the id that failed. Clients are expected to refetch
//! with `List` after a failed reorder rather than assume all-or-nothing.
//!
//! ## Retiring Scopes
//!
//! A scope usually stands for an entity of another collection (a menu item's category).
//! `RetireScope` lets the collection that *uses* the scope decide whether it may go: the
//! actor refuses with [`StoreError::ScopeInUse`] while entities remain in it, and otherwise
//! runs [`OrderedEntity::on_retire_scope`], which removes the owning entity. Because the
//! actor handles one request at a time, no create can slip into the scope in between.
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers a real [`CollectionClient`] from queued expectations and
//! records every reorder submission, so code around a client can be tested without an actor.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

pub use actor::CollectionActor;
pub use client::CollectionClient;
pub use client_trait::OrderedClient;
pub use entity::OrderedEntity;
pub use error::StoreError;
pub use message::{CollectionRequest, Response};
