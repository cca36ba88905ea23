use super::error::ReorderError;
use super::moves::move_within_scope;
use ordered_actor::{OrderedClient, OrderedEntity};
use std::fmt::Display;
use std::marker::PhantomData;
use tracing::{debug, info, instrument, warn};

/// What a move request ended in.
#[derive(Debug, Clone, PartialEq)]
pub enum MoveOutcome {
    /// Equal or out-of-range indices. Nothing changed and nothing was sent.
    Ignored,
    /// The store accepted the order and the list now mirrors it.
    Saved,
    /// Something failed; [`Reconciler::notice`] holds the message for the user.
    Failed(ReorderError),
}

/// A move already applied to the local list, waiting to be saved.
#[must_use = "a pending move only reaches the store through `Reconciler::commit`"]
pub struct PendingMove<T: OrderedEntity> {
    ordered_ids: Vec<T::Id>,
    snapshot: Vec<T>,
}

impl<T: OrderedEntity> PendingMove<T> {
    /// The ids that will be submitted, in their new order.
    pub fn ordered_ids(&self) -> &[T::Id] {
        &self.ordered_ids
    }
}

/// Admin-side view of an ordered collection that applies moves optimistically and then
/// reconciles with the store.
///
/// A move is two-phase:
///
/// 1. [`begin_move`](Self::begin_move) reorders the local list, which can be rendered
///    right away;
/// 2. [`commit`](Self::commit) submits the ids of the visible items in their new order
///    and refetches the authoritative list, whether the submission succeeded or not.
///
/// The list shown after a move is therefore what the store holds, including after a
/// reorder that was only partially applied.
///
/// When a scope is set, only the items of that scope are visible and moves use indices
/// into the visible list. Items of other scopes keep their places.
pub struct Reconciler<T, C>
where
    T: OrderedEntity,
    C: OrderedClient<T>,
{
    client: C,
    items: Vec<T>,
    scope: Option<T::Scope>,
    notice: Option<String>,
    _entity: PhantomData<T>,
}

impl<T, C> Reconciler<T, C>
where
    T: OrderedEntity,
    C: OrderedClient<T>,
    C::Error: Display,
{
    /// Starts empty; call [`refresh`](Self::refresh) to load the collection.
    pub fn new(client: C) -> Self {
        Self {
            client,
            items: Vec::new(),
            scope: None,
            notice: None,
            _entity: PhantomData,
        }
    }

    /// Loads the authoritative order. On failure the current list is kept.
    #[instrument(skip(self))]
    pub async fn refresh(&mut self) -> Result<(), ReorderError> {
        let items = self
            .client
            .list(None)
            .await
            .map_err(|e| ReorderError::Refresh(e.to_string()))?;
        debug!(count = items.len(), "Refreshed");
        self.items = items;
        Ok(())
    }

    /// Restricts the visible list to one scope, or shows everything with `None`.
    pub fn set_scope(&mut self, scope: Option<T::Scope>) {
        self.scope = scope;
    }

    pub fn scope(&self) -> Option<&T::Scope> {
        self.scope.as_ref()
    }

    /// Every loaded item, in backing order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn visible(&self) -> Vec<&T> {
        self.items.iter().filter(|item| self.in_scope(item)).collect()
    }

    /// The message to show after a failed move, until the next successful one.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    fn in_scope(&self, item: &T) -> bool {
        self.scope.as_ref().is_none_or(|scope| item.scope() == *scope)
    }

    /// Phase one of a move: applies it to the local list and returns what must be saved.
    ///
    /// Returns `None` for equal or out-of-range indices. Until the returned move is
    /// passed to [`commit`](Self::commit), [`items`](Self::items) and
    /// [`visible`](Self::visible) show the optimistic order.
    pub fn begin_move(&mut self, from: usize, to: usize) -> Option<PendingMove<T>> {
        let snapshot = self.items.clone();
        let scope = self.scope.clone();
        let moved = move_within_scope(
            &mut self.items,
            |item| scope.as_ref().is_none_or(|s| item.scope() == *s),
            from,
            to,
        );
        if !moved {
            debug!(from, to, "Move ignored");
            return None;
        }

        let ordered_ids = self.visible().into_iter().map(|i| i.id().clone()).collect();
        Some(PendingMove {
            ordered_ids,
            snapshot,
        })
    }

    /// Phase two: submits the order, then refetches the authoritative list whatever the
    /// submission returned.
    #[instrument(skip_all)]
    pub async fn commit(&mut self, pending: PendingMove<T>) -> MoveOutcome {
        let PendingMove {
            ordered_ids,
            snapshot,
        } = pending;
        let saved = self.client.reorder(ordered_ids).await;
        let refreshed = self.client.list(None).await;

        match (saved, refreshed) {
            (Ok(()), Ok(items)) => {
                self.items = items;
                self.notice = None;
                info!("Order saved");
                MoveOutcome::Saved
            }
            (Err(e), refreshed) => {
                let error = ReorderError::Save(e.to_string());
                warn!(error = %error, "Reorder rejected");
                match refreshed {
                    Ok(items) => self.items = items,
                    Err(refresh_error) => {
                        warn!(error = %refresh_error, "Refresh failed, restoring previous order");
                        self.items = snapshot;
                    }
                }
                self.notice = Some(error.to_string());
                MoveOutcome::Failed(error)
            }
            (Ok(()), Err(e)) => {
                // the store has the new order; keep showing it
                let error = ReorderError::Refresh(e.to_string());
                warn!(error = %error, "Order saved but refresh failed");
                self.notice = Some(error.to_string());
                MoveOutcome::Failed(error)
            }
        }
    }

    /// Moves the visible item at `from` to `to`: [`begin_move`](Self::begin_move) followed
    /// by [`commit`](Self::commit).
    #[instrument(skip(self))]
    pub async fn move_item(&mut self, from: usize, to: usize) -> MoveOutcome {
        match self.begin_move(from, to) {
            Some(pending) => self.commit(pending).await,
            None => MoveOutcome::Ignored,
        }
    }

    pub async fn move_up(&mut self, index: usize) -> MoveOutcome {
        match index.checked_sub(1) {
            Some(to) => self.move_item(index, to).await,
            None => MoveOutcome::Ignored,
        }
    }

    pub async fn move_down(&mut self, index: usize) -> MoveOutcome {
        self.move_item(index, index.saturating_add(1)).await
    }

    /// Drag-and-drop: moves `dragged` to where `target` currently is.
    pub async fn move_by_id(&mut self, dragged: &T::Id, target: &T::Id) -> MoveOutcome {
        let positions = {
            let visible = self.visible();
            let position = |id: &T::Id| visible.iter().position(|item| item.id() == id);
            (position(dragged), position(target))
        };
        match positions {
            (Some(from), Some(to)) => self.move_item(from, to).await,
            _ => MoveOutcome::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::CategoryClient;
    use crate::model::{Category, CategoryId};
    use ordered_actor::mock::MockClient;
    use ordered_actor::StoreError;

    fn categories(names: &[(u32, &str)]) -> Vec<Category> {
        (0u32..)
            .zip(names)
            .map(|(order, (id, name))| Category {
                id: CategoryId(*id),
                name: name.to_string(),
                slug: name.to_lowercase(),
                display_order: order,
                is_active: true,
            })
            .collect()
    }

    fn names(reconciler: &Reconciler<Category, CategoryClient>) -> Vec<String> {
        reconciler.visible().into_iter().map(|c| c.name.clone()).collect()
    }

    #[tokio::test]
    async fn test_ignored_moves_send_nothing() {
        let mut mock = MockClient::<Category>::new();
        mock.expect_list()
            .return_ok(categories(&[(1, "A"), (2, "B")]));

        let mut reconciler = Reconciler::<Category, _>::new(CategoryClient::new(mock.client()));
        reconciler.refresh().await.unwrap();

        assert_eq!(reconciler.move_item(1, 1).await, MoveOutcome::Ignored);
        assert_eq!(reconciler.move_item(0, 5).await, MoveOutcome::Ignored);
        assert_eq!(reconciler.move_up(0).await, MoveOutcome::Ignored);
        assert_eq!(reconciler.move_down(1).await, MoveOutcome::Ignored);

        assert!(mock.reorder_calls().is_empty());
        mock.verify();
    }

    #[tokio::test]
    async fn test_rejected_save_shows_store_order() {
        let mut mock = MockClient::<Category>::new();
        let before = categories(&[(1, "A"), (2, "B"), (3, "C")]);
        mock.expect_list().return_ok(before.clone());
        mock.expect_reorder().return_err(StoreError::ReorderFailed {
            id: "category_1".into(),
            position: 1,
            reason: Box::new(StoreError::NotFound("category_1".into())),
        });
        mock.expect_list().return_ok(before);

        let mut reconciler = Reconciler::<Category, _>::new(CategoryClient::new(mock.client()));
        reconciler.refresh().await.unwrap();

        let outcome = reconciler.move_item(2, 0).await;

        assert!(matches!(outcome, MoveOutcome::Failed(ReorderError::Save(_))));
        assert_eq!(names(&reconciler), vec!["A", "B", "C"]);
        assert!(reconciler.notice().unwrap().contains("category_1"));
        mock.verify();
    }

    #[tokio::test]
    async fn test_refresh_failure_after_save_keeps_new_order() {
        let mut mock = MockClient::<Category>::new();
        mock.expect_list()
            .return_ok(categories(&[(1, "A"), (2, "B")]));
        mock.expect_reorder().return_ok(());
        mock.expect_list().return_err(StoreError::ActorDropped);

        let mut reconciler = Reconciler::<Category, _>::new(CategoryClient::new(mock.client()));
        reconciler.refresh().await.unwrap();

        let outcome = reconciler.move_down(0).await;

        assert!(matches!(outcome, MoveOutcome::Failed(ReorderError::Refresh(_))));
        assert_eq!(names(&reconciler), vec!["B", "A"]);
        assert!(reconciler.notice().is_some());
    }

    #[tokio::test]
    async fn test_optimistic_order_visible_until_commit() {
        let mut mock = MockClient::<Category>::new();
        let before = categories(&[(1, "A"), (2, "B"), (3, "C")]);
        mock.expect_list().return_ok(before.clone());
        mock.expect_reorder().return_err(StoreError::ActorClosed);
        mock.expect_list().return_ok(before);

        let mut reconciler = Reconciler::<Category, _>::new(CategoryClient::new(mock.client()));
        reconciler.refresh().await.unwrap();

        assert!(reconciler.begin_move(1, 1).is_none());
        let pending = reconciler.begin_move(2, 0).unwrap();
        assert_eq!(
            pending.ordered_ids(),
            &[CategoryId(3), CategoryId(1), CategoryId(2)]
        );
        assert_eq!(names(&reconciler), vec!["C", "A", "B"]);
        assert!(mock.reorder_calls().is_empty());

        let outcome = reconciler.commit(pending).await;

        assert!(matches!(outcome, MoveOutcome::Failed(ReorderError::Save(_))));
        assert_eq!(names(&reconciler), vec!["A", "B", "C"]);
        mock.verify();
    }

    #[tokio::test]
    async fn test_double_failure_restores_snapshot() {
        let mut mock = MockClient::<Category>::new();
        mock.expect_list()
            .return_ok(categories(&[(1, "A"), (2, "B")]));
        mock.expect_reorder().return_err(StoreError::ActorClosed);
        mock.expect_list().return_err(StoreError::ActorClosed);

        let mut reconciler = Reconciler::<Category, _>::new(CategoryClient::new(mock.client()));
        reconciler.refresh().await.unwrap();

        let outcome = reconciler.move_down(0).await;

        assert!(matches!(outcome, MoveOutcome::Failed(ReorderError::Save(_))));
        assert_eq!(names(&reconciler), vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_success_clears_notice() {
        let mut mock = MockClient::<Category>::new();
        mock.expect_list()
            .return_ok(categories(&[(1, "A"), (2, "B")]));
        mock.expect_reorder().return_err(StoreError::ActorClosed);
        mock.expect_list()
            .return_ok(categories(&[(1, "A"), (2, "B")]));
        mock.expect_reorder().return_ok(());
        mock.expect_list()
            .return_ok(categories(&[(2, "B"), (1, "A")]));

        let mut reconciler = Reconciler::<Category, _>::new(CategoryClient::new(mock.client()));
        reconciler.refresh().await.unwrap();

        reconciler.move_up(1).await;
        assert!(reconciler.notice().is_some());

        assert_eq!(reconciler.move_by_id(&CategoryId(2), &CategoryId(1)).await, MoveOutcome::Saved);
        assert_eq!(reconciler.notice(), None);
        assert_eq!(names(&reconciler), vec!["B", "A"]);
        assert_eq!(
            mock.reorder_calls(),
            vec![
                vec![CategoryId(2), CategoryId(1)],
                vec![CategoryId(2), CategoryId(1)]
            ]
        );
    }
}
