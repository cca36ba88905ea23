//! # Mock Collections
//!
//! `MockClient<T>` hands out a real [`CollectionClient<T>`] whose requests are answered
//! from a queue of expectations instead of a running actor. Use it to test code that sits
//! *around* a client (reconcilers, storefront composition, dependent actors) without
//! spawning the collection it talks to.
//!
//! | | MockClient | Real actor |
//! |---|---|---|
//! | **State** | none, canned responses | real ordering state |
//! | **Error injection** | `return_err` | needs a failing hook |
//! | **Use case** | logic around the client | the collection itself |
//!
//! ```rust
//! use ordered_actor::mock::MockClient;
//! use ordered_actor::{OrderedEntity, StoreError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Row { id: u32, display_order: u32 }
//! #[derive(Debug)] struct RowCreate;
//! #[derive(Debug)] struct RowUpdate;
//! #[derive(Debug, thiserror::Error)] #[error("row error")] struct RowError;
//!
//! #[async_trait]
//! impl OrderedEntity for Row {
//!     type Id = u32; type Scope = (); type Create = RowCreate; type Update = RowUpdate;
//!     type Context = (); type Error = RowError;
//!     fn from_create_params(id: u32, _: RowCreate, display_order: u32) -> Result<Self, RowError> {
//!         Ok(Self { id, display_order })
//!     }
//!     fn create_scope(_: &RowCreate) {}
//!     fn id(&self) -> &u32 { &self.id }
//!     fn scope(&self) {}
//!     fn display_order(&self) -> u32 { self.display_order }
//!     fn set_display_order(&mut self, display_order: u32) { self.display_order = display_order; }
//!     async fn on_update(&mut self, _: RowUpdate, _: &()) -> Result<(), RowError> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Row>::new();
//!     mock.expect_reorder().return_err(StoreError::ActorClosed);
//!
//!     let result = mock.client().reorder(vec![2, 1]).await;
//!     assert!(matches!(result, Err(StoreError::ActorClosed)));
//!     assert_eq!(mock.reorder_calls(), vec![vec![2, 1]]);
//!     mock.verify();
//! }
//! ```

use crate::client::CollectionClient;
use crate::entity::OrderedEntity;
use crate::error::StoreError;
use crate::message::CollectionRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

/// A queued canned response.
enum Expectation<T: OrderedEntity> {
    Get(Result<Option<T>, StoreError>),
    Create(Result<T::Id, StoreError>),
    List(Result<Vec<T>, StoreError>),
    Update(Result<T, StoreError>),
    Delete(Result<(), StoreError>),
    Reorder(Result<(), StoreError>),
    RetireScope(Result<(), StoreError>),
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock collection with ordered expectations.
///
/// Requests must arrive in the order their expectations were queued; a mismatch panics
/// the background task, which the caller observes as [`StoreError::ActorDropped`].
pub struct MockClient<T: OrderedEntity> {
    client: CollectionClient<T>,
    expectations: Queue<T>,
    reorder_calls: Arc<Mutex<Vec<Vec<T::Id>>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: OrderedEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: OrderedEntity> MockClient<T> {
    /// Creates a new mock with no expectations. Must be called inside a tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<CollectionRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let reorder_calls = Arc::new(Mutex::new(Vec::new()));
        let queue = expectations.clone();
        let calls = reorder_calls.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue.lock().unwrap().pop_front();

                match (request, expectation) {
                    (CollectionRequest::Get { respond_to, .. }, Some(Expectation::Get(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (CollectionRequest::Create { respond_to, .. }, Some(Expectation::Create(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (CollectionRequest::List { respond_to, .. }, Some(Expectation::List(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (CollectionRequest::Update { respond_to, .. }, Some(Expectation::Update(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (CollectionRequest::Delete { respond_to, .. }, Some(Expectation::Delete(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (
                        CollectionRequest::Reorder {
                            ordered_ids,
                            respond_to,
                        },
                        Some(Expectation::Reorder(r)),
                    ) => {
                        calls.lock().unwrap().push(ordered_ids);
                        let _ = respond_to.send(r);
                    }
                    (
                        CollectionRequest::RetireScope { respond_to, .. },
                        Some(Expectation::RetireScope(r)),
                    ) => {
                        let _ = respond_to.send(r);
                    }
                    _ => panic!("Unexpected request or expectation mismatch"),
                }
            }
        });

        Self {
            client: CollectionClient::new(sender),
            expectations,
            reorder_calls,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> CollectionClient<T> {
        self.client.clone()
    }

    pub fn expect_get(&mut self) -> ExpectationBuilder<T, Option<T>> {
        self.builder(Expectation::Get)
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        self.builder(Expectation::Create)
    }

    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(Expectation::List)
    }

    pub fn expect_update(&mut self) -> ExpectationBuilder<T, T> {
        self.builder(Expectation::Update)
    }

    pub fn expect_delete(&mut self) -> ExpectationBuilder<T, ()> {
        self.builder(Expectation::Delete)
    }

    pub fn expect_reorder(&mut self) -> ExpectationBuilder<T, ()> {
        self.builder(Expectation::Reorder)
    }

    pub fn expect_retire_scope(&mut self) -> ExpectationBuilder<T, ()> {
        self.builder(Expectation::RetireScope)
    }

    /// Every id list submitted through `reorder`, in arrival order.
    pub fn reorder_calls(&self) -> Vec<Vec<T::Id>> {
        self.reorder_calls.lock().unwrap().clone()
    }

    /// Panics if any expectation is still queued.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining > 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }

    fn builder<R>(
        &self,
        wrap: fn(Result<R, StoreError>) -> Expectation<T>,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            wrap,
            expectations: self.expectations.clone(),
        }
    }
}

/// Queues the response for one expected request.
pub struct ExpectationBuilder<T: OrderedEntity, R> {
    wrap: fn(Result<R, StoreError>) -> Expectation<T>,
    expectations: Queue<T>,
}

impl<T: OrderedEntity, R> ExpectationBuilder<T, R> {
    pub fn return_ok(self, value: R) {
        self.expectations
            .lock()
            .unwrap()
            .push_back((self.wrap)(Ok(value)));
    }

    pub fn return_err(self, error: StoreError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back((self.wrap)(Err(error)));
    }
}

/// Creates a client and the raw receiver behind it, for tests that want to inspect
/// requests and answer them by hand.
pub fn create_mock_client<T: OrderedEntity>(
    buffer_size: usize,
) -> (CollectionClient<T>, mpsc::Receiver<CollectionRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (CollectionClient::new(sender), receiver)
}

/// Returns the next request if it is a Reorder.
pub async fn expect_reorder<T: OrderedEntity>(
    receiver: &mut mpsc::Receiver<CollectionRequest<T>>,
) -> Option<(Vec<T::Id>, oneshot::Sender<Result<(), StoreError>>)> {
    match receiver.recv().await {
        Some(CollectionRequest::Reorder {
            ordered_ids,
            respond_to,
        }) => Some((ordered_ids, respond_to)),
        _ => None,
    }
}

/// Returns the next request if it is a List.
pub async fn expect_list<T: OrderedEntity>(
    receiver: &mut mpsc::Receiver<CollectionRequest<T>>,
) -> Option<(Option<T::Scope>, oneshot::Sender<Result<Vec<T>, StoreError>>)> {
    match receiver.recv().await {
        Some(CollectionRequest::List { scope, respond_to }) => Some((scope, respond_to)),
        _ => None,
    }
}
