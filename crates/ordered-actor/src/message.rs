//! # Collection Messages
//!
//! Message types exchanged between a `CollectionClient` and its `CollectionActor`.

use crate::entity::OrderedEntity;
use crate::error::StoreError;
use tokio::sync::oneshot;

/// One-shot response channel used by the actor.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// Request sent to a collection actor.
///
/// The CRUD variants mirror the usual resource lifecycle. The two collection-level
/// variants are what make the store *ordered*:
///
/// - **List**: the authoritative collection, sorted by `display_order` (ties broken by
///   creation order), optionally restricted to one scope.
/// - **Reorder**: rewrite `display_order` of every submitted id to its position in the
///   submitted list, in list order.
/// - **RetireScope**: refuse while any entity is in the scope, otherwise run
///   [`OrderedEntity::on_retire_scope`].
#[derive(Debug)]
pub enum CollectionRequest<T: OrderedEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        scope: Option<T::Scope>,
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Reorder {
        ordered_ids: Vec<T::Id>,
        respond_to: Response<()>,
    },
    RetireScope {
        scope: T::Scope,
        respond_to: Response<()>,
    },
}
