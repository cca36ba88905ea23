//! # Category Client
//!
//! High-level API for the `Category` actor. Wraps a `CollectionClient<Category>`; `get`,
//! `list`, `delete` and `reorder` come from [`OrderedClient`].
//!
//! The plain `delete` does not know about menu items. Categories that may hold items are
//! deleted through [`MenuItemClient::delete_category`](crate::clients::MenuItemClient::delete_category).
use crate::category_actor::CategoryError;
use crate::model::{Category, CategoryCreate, CategoryId, CategoryUpdate};
use async_trait::async_trait;
use ordered_actor::{CollectionClient, OrderedClient, StoreError};
use tracing::{debug, instrument};

/// Client for interacting with the Category actor.
#[derive(Clone)]
pub struct CategoryClient {
    inner: CollectionClient<Category>,
}

impl CategoryClient {
    pub fn new(inner: CollectionClient<Category>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl OrderedClient<Category> for CategoryClient {
    type Error = CategoryError;

    fn inner(&self) -> &CollectionClient<Category> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        e.into()
    }
}

impl CategoryClient {
    /// Creates a category at the end of the menu.
    #[instrument(skip(self))]
    pub async fn create_category(&self, params: CategoryCreate) -> Result<CategoryId, CategoryError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_category(
        &self,
        id: CategoryId,
        update: CategoryUpdate,
    ) -> Result<Category, CategoryError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Active categories in display order, as the public menu shows them.
    #[instrument(skip(self))]
    pub async fn active_categories(&self) -> Result<Vec<Category>, CategoryError> {
        let categories = self.list(None).await?;
        Ok(categories.into_iter().filter(|c| c.is_active).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ordered_actor::mock::{create_mock_client, expect_list, MockClient};

    fn category(id: u32, name: &str, is_active: bool) -> Category {
        Category {
            id: CategoryId(id),
            name: name.into(),
            slug: name.to_lowercase(),
            display_order: id - 1,
            is_active,
        }
    }

    #[tokio::test]
    async fn test_active_categories_skips_hidden() {
        let (client, mut receiver) = create_mock_client::<Category>(10);
        let categories = CategoryClient::new(client);

        let task = tokio::spawn(async move { categories.active_categories().await });

        let (scope, responder) = expect_list(&mut receiver)
            .await
            .expect("Expected List request");
        assert_eq!(scope, None);
        responder
            .send(Ok(vec![
                category(1, "Starters", true),
                category(2, "Seasonal", false),
                category(3, "Mains", true),
            ]))
            .unwrap();

        let names: Vec<String> = task.await.unwrap().unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Starters", "Mains"]);
    }

    #[tokio::test]
    async fn test_validation_error_survives_the_actor_boundary() {
        let mut mock = MockClient::<Category>::new();
        mock.expect_create()
            .return_err(StoreError::EntityError(Box::new(CategoryError::ValidationError(
                "slug is required".into(),
            ))));

        let categories = CategoryClient::new(mock.client());
        let result = categories
            .create_category(CategoryCreate::new("Mains", ""))
            .await;

        assert_eq!(
            result,
            Err(CategoryError::ValidationError("slug is required".into()))
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_reorder_failure_names_the_category() {
        let mut mock = MockClient::<Category>::new();
        mock.expect_reorder().return_err(StoreError::ReorderFailed {
            id: "category_3".into(),
            position: 2,
            reason: Box::new(StoreError::NotFound("category_3".into())),
        });

        let categories = CategoryClient::new(mock.client());
        let result = categories
            .reorder(vec![CategoryId(1), CategoryId(2), CategoryId(3)])
            .await;

        match result {
            Err(CategoryError::ReorderFailed { id, .. }) => assert_eq!(id, "category_3"),
            other => panic!("Expected ReorderFailed, got {other:?}"),
        }
        assert_eq!(
            mock.reorder_calls(),
            vec![vec![CategoryId(1), CategoryId(2), CategoryId(3)]]
        );
    }
}
