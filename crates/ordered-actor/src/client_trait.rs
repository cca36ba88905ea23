//! # OrderedClient Trait
//!
//! Common interface for resource-specific clients: default `get`, `list`, `delete` and
//! `reorder` built on top of a generic [`CollectionClient`], with errors mapped into the
//! resource's own error type.
use crate::{CollectionClient, OrderedEntity, StoreError};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit the standard collection operations.
///
/// # Example
///
/// ```rust
/// use ordered_actor::{CollectionClient, OrderedClient, OrderedEntity, StoreError};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Row { id: u32, display_order: u32 }
/// #[derive(Debug)] struct RowCreate;
/// #[derive(Debug)] struct RowUpdate;
/// #[derive(Debug, thiserror::Error)] #[error("{0}")] struct RowError(String);
///
/// #[async_trait]
/// impl OrderedEntity for Row {
///     type Id = u32; type Scope = (); type Create = RowCreate; type Update = RowUpdate;
///     type Context = (); type Error = RowError;
///     fn from_create_params(id: u32, _: RowCreate, display_order: u32) -> Result<Self, RowError> {
///         Ok(Self { id, display_order })
///     }
///     fn create_scope(_: &RowCreate) {}
///     fn id(&self) -> &u32 { &self.id }
///     fn scope(&self) {}
///     fn display_order(&self) -> u32 { self.display_order }
///     fn set_display_order(&mut self, display_order: u32) { self.display_order = display_order; }
///     async fn on_update(&mut self, _: RowUpdate, _: &()) -> Result<(), RowError> { Ok(()) }
/// }
///
/// struct RowClient { inner: CollectionClient<Row> }
///
/// #[async_trait]
/// impl OrderedClient<Row> for RowClient {
///     type Error = RowError;
///     fn inner(&self) -> &CollectionClient<Row> { &self.inner }
///     fn map_error(e: StoreError) -> RowError { RowError(e.to_string()) }
/// }
///
/// async fn usage(client: RowClient) {
///     // get(), list(), delete() and reorder() are provided.
///     let _ = client.list(None).await;
///     let _ = client.reorder(vec![2, 1]).await;
/// }
/// ```
#[async_trait]
pub trait OrderedClient<T: OrderedEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic client.
    fn inner(&self) -> &CollectionClient<T>;

    /// Map store errors to the resource error type.
    fn map_error(e: StoreError) -> Self::Error;

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetch the authoritative ordered collection, optionally one scope of it.
    #[tracing::instrument(skip(self))]
    async fn list(&self, scope: Option<T::Scope>) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list(scope).await.map_err(Self::map_error)
    }

    /// Delete an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }

    /// Submit a new order for `ordered_ids`.
    #[tracing::instrument(skip(self))]
    async fn reorder(&self, ordered_ids: Vec<T::Id>) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().reorder(ordered_ids).await.map_err(Self::map_error)
    }
}
