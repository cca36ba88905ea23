//! # Collection Client
//!
//! The generic, cloneable handle used to talk to a `CollectionActor`.

use crate::entity::OrderedEntity;
use crate::error::StoreError;
use crate::message::CollectionRequest;
use tokio::sync::{mpsc, oneshot};

/// A type-safe client for a `CollectionActor`.
///
/// Holds only the channel sender, so cloning is cheap. Each call sends one request and
/// awaits its one-shot response.
#[derive(Clone)]
pub struct CollectionClient<T: OrderedEntity> {
    sender: mpsc::Sender<CollectionRequest<T>>,
}

impl<T: OrderedEntity> CollectionClient<T> {
    pub fn new(sender: mpsc::Sender<CollectionRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, StoreError>>) -> CollectionRequest<T>,
    ) -> Result<R, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }

    pub async fn create(&self, params: T::Create) -> Result<T::Id, StoreError> {
        self.request(|respond_to| CollectionRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, StoreError> {
        self.request(|respond_to| CollectionRequest::Get { id, respond_to })
            .await
    }

    /// The authoritative ordered collection, or one scope of it.
    pub async fn list(&self, scope: Option<T::Scope>) -> Result<Vec<T>, StoreError> {
        self.request(|respond_to| CollectionRequest::List { scope, respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, StoreError> {
        self.request(|respond_to| CollectionRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), StoreError> {
        self.request(|respond_to| CollectionRequest::Delete { id, respond_to })
            .await
    }

    /// Sets each id's `display_order` to its position in `ordered_ids`.
    pub async fn reorder(&self, ordered_ids: Vec<T::Id>) -> Result<(), StoreError> {
        self.request(|respond_to| CollectionRequest::Reorder {
            ordered_ids,
            respond_to,
        })
        .await
    }

    /// Retires `scope`, failing with [`StoreError::ScopeInUse`] while entities remain in it.
    pub async fn retire_scope(&self, scope: T::Scope) -> Result<(), StoreError> {
        self.request(|respond_to| CollectionRequest::RetireScope { scope, respond_to })
            .await
    }
}
