//! # Menu Item Client
//!
//! High-level API for the `MenuItem` actor: per-category listing, availability and the
//! featured selection shown on the home page.
use crate::menu_item_actor::MenuItemError;
use crate::model::{CategoryId, MenuItem, MenuItemCreate, MenuItemId, MenuItemUpdate};
use async_trait::async_trait;
use ordered_actor::{CollectionClient, OrderedClient, StoreError};
use tracing::{debug, info, instrument, warn};

/// Client for interacting with the MenuItem actor.
#[derive(Clone)]
pub struct MenuItemClient {
    inner: CollectionClient<MenuItem>,
}

impl MenuItemClient {
    pub fn new(inner: CollectionClient<MenuItem>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl OrderedClient<MenuItem> for MenuItemClient {
    type Error = MenuItemError;

    fn inner(&self) -> &CollectionClient<MenuItem> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        e.into()
    }
}

impl MenuItemClient {
    /// Creates an item at the end of its category.
    #[instrument(skip(self))]
    pub async fn create_item(&self, params: MenuItemCreate) -> Result<MenuItemId, MenuItemError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_item(
        &self,
        id: MenuItemId,
        update: MenuItemUpdate,
    ) -> Result<MenuItem, MenuItemError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Deletes a category that no item belongs to any more.
    ///
    /// Categories must be deleted here rather than through [`CategoryClient`] directly:
    /// the check and the delete run inside the menu item actor, so items never end up
    /// pointing at a missing category.
    ///
    /// [`CategoryClient`]: crate::clients::CategoryClient
    #[instrument(skip(self))]
    pub async fn delete_category(&self, category_id: CategoryId) -> Result<(), MenuItemError> {
        debug!("Sending request");
        self.inner
            .retire_scope(category_id)
            .await
            .map_err(|e| match e {
                StoreError::ScopeInUse { count, .. } => MenuItemError::CategoryInUse {
                    id: category_id.to_string(),
                    items: count,
                },
                other => Self::map_error(other),
            })
    }

    /// Items of one category in display order.
    #[instrument(skip(self))]
    pub async fn list_by_category(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<MenuItem>, MenuItemError> {
        self.list(Some(category_id)).await
    }

    #[instrument(skip(self))]
    pub async fn set_availability(
        &self,
        id: MenuItemId,
        is_available: bool,
    ) -> Result<MenuItem, MenuItemError> {
        let update = MenuItemUpdate {
            is_available: Some(is_available),
            ..Default::default()
        };
        self.update_item(id, update).await
    }

    /// Replaces the featured selection: every featured item is cleared, then each of
    /// `item_ids` is marked. Ids that no longer exist are skipped.
    #[instrument(skip(self))]
    pub async fn set_featured(&self, item_ids: Vec<MenuItemId>) -> Result<(), MenuItemError> {
        let featured = |is_featured| MenuItemUpdate {
            is_featured: Some(is_featured),
            ..Default::default()
        };

        for item in self.list(None).await? {
            if item.is_featured {
                self.update_item(item.id, featured(false)).await?;
            }
        }

        for id in &item_ids {
            match self.update_item(*id, featured(true)).await {
                Ok(_) => {}
                Err(MenuItemError::NotFound(_)) => warn!(%id, "Skipping unknown item"),
                Err(e) => return Err(e),
            }
        }

        info!(count = item_ids.len(), "Featured items replaced");
        Ok(())
    }

    /// Featured items that are currently available, in display order, at most `limit`.
    #[instrument(skip(self))]
    pub async fn featured(&self, limit: usize) -> Result<Vec<MenuItem>, MenuItemError> {
        let items = self.list(None).await?;
        Ok(items
            .into_iter()
            .filter(|item| item.is_featured && item.is_available)
            .take(limit)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ordered_actor::mock::MockClient;

    fn item(id: u32, display_order: u32, is_featured: bool, is_available: bool) -> MenuItem {
        MenuItem {
            id: MenuItemId(id),
            category_id: CategoryId(1),
            name: format!("Dish {id}"),
            description: String::new(),
            price: 10.0,
            image_url: None,
            spice_level: 0,
            is_available,
            is_featured,
            display_order,
        }
    }

    #[tokio::test]
    async fn test_featured_filters_and_limits() {
        let mut mock = MockClient::<MenuItem>::new();
        mock.expect_list().return_ok(vec![
            item(1, 0, true, true),
            item(2, 1, true, false),
            item(3, 2, false, true),
            item(4, 3, true, true),
            item(5, 4, true, true),
            item(6, 5, true, true),
        ]);

        let items = MenuItemClient::new(mock.client());
        let ids: Vec<MenuItemId> = items
            .featured(3)
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.id)
            .collect();

        assert_eq!(ids, vec![MenuItemId(1), MenuItemId(4), MenuItemId(5)]);
        mock.verify();
    }

    #[tokio::test]
    async fn test_set_featured_clears_then_marks() {
        let mut mock = MockClient::<MenuItem>::new();
        mock.expect_list()
            .return_ok(vec![item(1, 0, true, true), item(2, 1, false, true)]);
        // clear item 1
        mock.expect_update().return_ok(item(1, 0, false, true));
        // mark item 2, then the unknown item 9
        mock.expect_update().return_ok(item(2, 1, true, true));
        mock.expect_update()
            .return_err(StoreError::NotFound("item_9".into()));

        let items = MenuItemClient::new(mock.client());
        let result = items.set_featured(vec![MenuItemId(2), MenuItemId(9)]).await;

        assert!(result.is_ok());
        mock.verify();
    }

    #[tokio::test]
    async fn test_communication_failure_is_reported() {
        let mut mock = MockClient::<MenuItem>::new();
        mock.expect_list().return_err(StoreError::ActorClosed);

        let items = MenuItemClient::new(mock.client());
        let result = items.featured(3).await;

        assert!(matches!(
            result,
            Err(MenuItemError::ActorCommunicationError(_))
        ));
    }
}
