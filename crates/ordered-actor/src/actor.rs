//! # Collection Actor
//!
//! `CollectionActor` owns one ordered collection and processes its requests
//! sequentially. It is the single source of truth for `display_order`.

use crate::client::CollectionClient;
use crate::entity::OrderedEntity;
use crate::error::StoreError;
use crate::message::CollectionRequest;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, trace, warn};

/// A stored entity plus its creation sequence, used to break `display_order` ties.
struct Slot<T> {
    seq: u32,
    entity: T,
}

/// The actor that manages an ordered collection of entities.
///
/// **Concurrency Model**:
/// The actor owns `store` exclusively and handles one message at a time, so no lock
/// guards it. A reorder therefore never interleaves with another request on the same
/// collection, even though its per-id updates are not transactional.
///
/// # Usage Pattern
///
/// 1.  **Create**: `CollectionActor::new()` returns the actor and its client.
/// 2.  **Wire**: pass dependencies into `actor.run(context)`.
/// 3.  **Run**: spawn the run loop.
///
/// ```rust
/// use ordered_actor::{CollectionActor, OrderedEntity};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Row { id: u32, display_order: u32 }
/// #[derive(Debug)] struct RowCreate;
/// #[derive(Debug)] struct RowUpdate;
/// #[derive(Debug, thiserror::Error)] #[error("row error")] struct RowError;
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
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = CollectionActor::<Row>::new(10);
///     tokio::spawn(actor.run(()));
///
///     let a = client.create(RowCreate).await.unwrap();
///     let b = client.create(RowCreate).await.unwrap();
///     client.reorder(vec![b, a]).await.unwrap();
///
///     let rows = client.list(None).await.unwrap();
///     assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![b, a]);
/// }
/// ```
///
/// ## Operations
///
/// * **Create**: next id from the counter, `display_order` = max in scope + 1 (0 when the
///   scope is empty), `on_create` hook, insert.
/// * **Get**: clone of the entity, or `None`.
/// * **List**: clones sorted by `(display_order, creation sequence)`, optionally one scope.
/// * **Update** / **Delete**: hook, then mutate or remove.
/// * **Reorder**: for each submitted id in order, `on_reorder(position)`. The first missing
///   id or failing hook aborts with [`StoreError::ReorderFailed`].
pub struct CollectionActor<T: OrderedEntity> {
    receiver: mpsc::Receiver<CollectionRequest<T>>,
    store: HashMap<T::Id, Slot<T>>,
    next_id: u32,
}

impl<T: OrderedEntity> CollectionActor<T> {
    /// Creates a new actor and its associated client.
    ///
    /// `buffer_size` is the capacity of the request channel; clients wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, CollectionClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id: 1,
        };
        (actor, CollectionClient::new(sender))
    }

    /// Runs the actor's event loop until every client has been dropped.
    pub async fn run(mut self, context: T::Context) {
        // "Category" instead of "aroma_menu::model::category::Category"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CollectionRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let display_order = self.next_display_order(&T::create_scope(&params));
                    let seq = self.next_id;
                    let id = T::Id::from(seq);
                    self.next_id += 1;

                    match T::from_create_params(id.clone(), params, display_order) {
                        Ok(mut item) => {
                            if let Err(e) = item.on_create(&context).await {
                                warn!(entity_type, error = %e, "on_create failed");
                                let _ = respond_to.send(Err(StoreError::EntityError(Box::new(e))));
                                continue;
                            }
                            self.store.insert(id.clone(), Slot { seq, entity: item });
                            info!(entity_type, %id, display_order, size = self.store.len(), "Created");
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(StoreError::EntityError(Box::new(e))));
                        }
                    }
                }
                CollectionRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).map(|slot| slot.entity.clone());
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                CollectionRequest::List { scope, respond_to } => {
                    let items = self.sorted(scope.as_ref());
                    debug!(entity_type, ?scope, count = items.len(), "List");
                    let _ = respond_to.send(Ok(items));
                }
                CollectionRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    if let Some(slot) = self.store.get_mut(&id) {
                        if let Err(e) = slot.entity.on_update(update, &context).await {
                            warn!(entity_type, %id, error = %e, "Update failed");
                            let _ = respond_to.send(Err(StoreError::EntityError(Box::new(e))));
                            continue;
                        }
                        info!(entity_type, %id, "Updated");
                        let _ = respond_to.send(Ok(slot.entity.clone()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                    }
                }
                CollectionRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    if let Some(slot) = self.store.get(&id) {
                        if let Err(e) = slot.entity.on_delete(&context).await {
                            warn!(entity_type, %id, error = %e, "on_delete failed");
                            let _ = respond_to.send(Err(StoreError::EntityError(Box::new(e))));
                            continue;
                        }
                        self.store.remove(&id);
                        info!(entity_type, %id, size = self.store.len(), "Deleted");
                        let _ = respond_to.send(Ok(()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                    }
                }
                CollectionRequest::Reorder {
                    ordered_ids,
                    respond_to,
                } => {
                    let count = ordered_ids.len();
                    debug!(entity_type, ?ordered_ids, "Reorder");
                    let result = self.reorder(ordered_ids, &context).await;
                    match &result {
                        Ok(()) => info!(entity_type, count, "Reordered"),
                        Err(e) => warn!(entity_type, error = %e, "Reorder failed"),
                    }
                    let _ = respond_to.send(result);
                }
                CollectionRequest::RetireScope { scope, respond_to } => {
                    let count = self
                        .store
                        .values()
                        .filter(|slot| slot.entity.scope() == scope)
                        .count();
                    if count > 0 {
                        warn!(entity_type, ?scope, count, "Scope still in use");
                        let _ = respond_to.send(Err(StoreError::ScopeInUse {
                            scope: format!("{scope:?}"),
                            count,
                        }));
                        continue;
                    }
                    let result = T::on_retire_scope(&scope, &context)
                        .await
                        .map_err(|e| StoreError::EntityError(Box::new(e)));
                    match &result {
                        Ok(()) => info!(entity_type, ?scope, "Scope retired"),
                        Err(e) => warn!(entity_type, ?scope, error = %e, "Retiring scope failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    fn next_display_order(&self, scope: &T::Scope) -> u32 {
        self.store
            .values()
            .filter(|slot| slot.entity.scope() == *scope)
            .map(|slot| slot.entity.display_order() + 1)
            .max()
            .unwrap_or(0)
    }

    fn sorted(&self, scope: Option<&T::Scope>) -> Vec<T> {
        let mut slots: Vec<&Slot<T>> = self
            .store
            .values()
            .filter(|slot| scope.is_none_or(|scope| slot.entity.scope() == *scope))
            .collect();
        slots.sort_by_key(|slot| (slot.entity.display_order(), slot.seq));
        slots.into_iter().map(|slot| slot.entity.clone()).collect()
    }

    /// Applies positions strictly in list order; stops at the first failure.
    async fn reorder(
        &mut self,
        ordered_ids: Vec<T::Id>,
        context: &T::Context,
    ) -> Result<(), StoreError> {
        if ordered_ids.is_empty() {
            return Err(StoreError::EmptyReorder);
        }

        for (position, id) in (0u32..).zip(ordered_ids) {
            let Some(slot) = self.store.get_mut(&id) else {
                return Err(StoreError::ReorderFailed {
                    id: id.to_string(),
                    position,
                    reason: Box::new(StoreError::NotFound(id.to_string())),
                });
            };
            slot.entity
                .on_reorder(position, context)
                .await
                .map_err(|e| StoreError::ReorderFailed {
                    id: id.to_string(),
                    position,
                    reason: Box::new(e),
                })?;
            trace!(%id, position, "display_order updated");
        }
        Ok(())
    }
}
