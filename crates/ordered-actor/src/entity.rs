//! # OrderedEntity Trait
//!
//! The `OrderedEntity` trait is the contract every persisted, user-orderable resource
//! (categories, menu items, ...) implements to be managed by a [`CollectionActor`](crate::CollectionActor).
//!
//! Besides the CRUD payload types, an ordered entity exposes:
//!
//! - a zero-based `display_order`, which the actor assigns on create and rewrites on reorder;
//! - a **scope**, the partition inside which `display_order` values are numbered
//!   (a single global scope for categories, one scope per category for menu items).
//!
//! # Provided Methods (Hooks)
//! - [`OrderedEntity::on_create`]
//! - [`OrderedEntity::on_delete`]
//! - [`OrderedEntity::on_reorder`]
//!
//! The defaults do nothing beyond the obvious (`on_reorder` stores the new position).

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any ordered resource must implement to be managed by `CollectionActor`.
///
/// # Async & Context
/// Hooks are `async` so they can call other actors. The `Context` associated type is
/// injected into every hook when the actor starts (`run(context)`), not at construction,
/// so actors can depend on each other's clients without construction cycles.
#[async_trait]
pub trait OrderedEntity: Clone + Send + Sync + 'static {
    /// Unique identifier. Must be convertible from `u32` for automatic ID generation.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Ordering partition. Use `()` when the whole collection is one scope.
    type Scope: PartialEq + Clone + Send + Sync + Debug;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    type Context: Send + Sync;

    /// Per-entity error type, boxed into [`StoreError::EntityError`](crate::StoreError::EntityError)
    /// on the way back to the client.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build the entity from its freshly assigned id, the payload and the first free
    /// `display_order` in the payload's scope.
    fn from_create_params(
        id: Self::Id,
        params: Self::Create,
        display_order: u32,
    ) -> Result<Self, Self::Error>;

    /// Scope a create payload will land in, used to compute its `display_order`.
    fn create_scope(params: &Self::Create) -> Self::Scope;

    fn id(&self) -> &Self::Id;

    fn scope(&self) -> Self::Scope;

    fn display_order(&self) -> u32;

    fn set_display_order(&mut self, display_order: u32);

    // --- Lifecycle Hooks (Async) ---

    /// Called after the entity is built and before it is stored.
    /// Use it for validation that needs other actors.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when `scope` is retired, after the actor checked that no entity uses it.
    /// Requests for this collection wait until the hook returns, so no entity can be
    /// created in `scope` meanwhile.
    async fn on_retire_scope(_scope: &Self::Scope, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called once per submitted id during a reorder, with the id's zero-based
    /// position in the submitted list. An error aborts the remaining updates.
    async fn on_reorder(
        &mut self,
        position: u32,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        self.set_display_order(position);
        Ok(())
    }
}
