//! # Storefront
//!
//! Read-only views the public site is built from: the menu grouped by category, the
//! filtered dish grid, the featured dishes and the cart drawer's suggestions.

use crate::cart::{upsell, CartState};
use crate::category_actor::CategoryError;
use crate::clients::{CategoryClient, MenuItemClient};
use crate::config::ShopConfig;
use crate::menu_item_actor::MenuItemError;
use crate::model::{Category, CategoryId, MenuItem};
use ordered_actor::OrderedClient;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

/// One category of the public menu with its available items.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuSection {
    #[serde(flatten)]
    pub category: Category,
    pub items: Vec<MenuItem>,
}

/// The menu page's category tabs and search box.
///
/// `None` means no restriction: every category, or no search text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuFilter {
    pub category: Option<CategoryId>,
    pub query: Option<String>,
}

impl MenuFilter {
    pub fn category(category: CategoryId) -> Self {
        Self {
            category: Some(category),
            ..Self::default()
        }
    }

    pub fn search(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Self::default()
        }
    }

    /// Available items in the selected category whose name or description contains the
    /// query, ignoring case. An empty query matches everything.
    pub fn matches(&self, item: &MenuItem) -> bool {
        if !item.is_available {
            return false;
        }
        if self.category.is_some_and(|category| item.category_id != category) {
            return false;
        }
        match self.query.as_deref() {
            None | Some("") => true,
            Some(query) => {
                let query = query.to_lowercase();
                item.name.to_lowercase().contains(&query)
                    || item.description.to_lowercase().contains(&query)
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error(transparent)]
    Category(#[from] CategoryError),
    #[error(transparent)]
    MenuItem(#[from] MenuItemError),
}

#[derive(Clone)]
pub struct Storefront {
    categories: CategoryClient,
    items: MenuItemClient,
    featured_limit: usize,
    upsell_ids: Vec<String>,
}

impl Storefront {
    pub fn new(categories: CategoryClient, items: MenuItemClient, config: &ShopConfig) -> Self {
        Self {
            categories,
            items,
            featured_limit: config.featured_limit,
            upsell_ids: config.upsell_ids.clone(),
        }
    }

    /// Active categories in display order, each with its available items in display order.
    /// Categories without available items are kept, with an empty list.
    #[instrument(skip(self))]
    pub async fn menu(&self) -> Result<Vec<MenuSection>, StorefrontError> {
        let categories = self.categories.active_categories().await?;
        let items = self.items.list(None).await?;

        let sections: Vec<MenuSection> = categories
            .into_iter()
            .map(|category| {
                let items = items
                    .iter()
                    .filter(|item| item.is_available && item.category_id == category.id)
                    .cloned()
                    .collect();
                MenuSection { category, items }
            })
            .collect();
        debug!(sections = sections.len(), "Menu assembled");
        Ok(sections)
    }

    /// Dishes matching `filter`, in display order. Items of inactive categories are left
    /// out, as on [`menu`](Self::menu).
    #[instrument(skip(self))]
    pub async fn filtered_items(&self, filter: &MenuFilter) -> Result<Vec<MenuItem>, StorefrontError> {
        let active: Vec<CategoryId> = self
            .categories
            .active_categories()
            .await?
            .into_iter()
            .map(|category| category.id)
            .collect();
        let items: Vec<MenuItem> = self
            .items
            .list(filter.category)
            .await?
            .into_iter()
            .filter(|item| active.contains(&item.category_id) && filter.matches(item))
            .collect();
        debug!(count = items.len(), "Menu filtered");
        Ok(items)
    }

    /// The dishes highlighted on the home page.
    #[instrument(skip(self))]
    pub async fn featured(&self) -> Result<Vec<MenuItem>, StorefrontError> {
        Ok(self.items.featured(self.featured_limit).await?)
    }

    /// Allow-listed dishes that are not in `cart` yet.
    #[instrument(skip(self, cart))]
    pub async fn suggestions(&self, cart: &CartState) -> Result<Vec<MenuItem>, StorefrontError> {
        let catalog = self.items.list(None).await?;
        Ok(upsell::suggestions(&catalog, &self.upsell_ids, cart)
            .into_iter()
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CategoryId, MenuItemId};
    use ordered_actor::mock::MockClient;

    fn category(id: u32, is_active: bool) -> Category {
        Category {
            id: CategoryId(id),
            name: format!("Category {id}"),
            slug: format!("category-{id}"),
            display_order: id,
            is_active,
        }
    }

    fn item(id: u32, category: u32, is_available: bool) -> MenuItem {
        MenuItem {
            id: MenuItemId(id),
            category_id: CategoryId(category),
            name: format!("Dish {id}"),
            description: String::new(),
            price: 8.0,
            image_url: None,
            spice_level: 1,
            is_available,
            is_featured: false,
            display_order: id,
        }
    }

    #[tokio::test]
    async fn test_menu_groups_available_items_under_active_categories() {
        let mut categories = MockClient::<Category>::new();
        let mut items = MockClient::<MenuItem>::new();
        categories.expect_list().return_ok(vec![
            category(1, true),
            category(2, false),
            category(3, true),
        ]);
        items.expect_list().return_ok(vec![
            item(10, 1, true),
            item(11, 2, true),
            item(12, 1, false),
            item(13, 1, true),
        ]);

        let storefront = Storefront::new(
            CategoryClient::new(categories.client()),
            MenuItemClient::new(items.client()),
            &ShopConfig::default(),
        );
        let menu = storefront.menu().await.unwrap();

        let shape: Vec<(CategoryId, Vec<MenuItemId>)> = menu
            .iter()
            .map(|s| (s.category.id, s.items.iter().map(|i| i.id).collect()))
            .collect();
        assert_eq!(
            shape,
            vec![
                (CategoryId(1), vec![MenuItemId(10), MenuItemId(13)]),
                (CategoryId(3), vec![]),
            ]
        );
    }

    fn dish(id: u32, category: u32, name: &str, description: &str) -> MenuItem {
        MenuItem {
            name: name.to_string(),
            description: description.to_string(),
            ..item(id, category, true)
        }
    }

    #[test]
    fn test_filter_by_category_and_search() {
        let korma = dish(1, 1, "Chicken Korma", "Mild and creamy");
        let paneer = dish(2, 2, "Paneer Tikka", "Grilled cottage cheese, creamy mint dip");
        let hidden = MenuItem {
            is_available: false,
            ..dish(3, 1, "Korma Special", "")
        };

        let all = MenuFilter::default();
        assert!(all.matches(&korma) && all.matches(&paneer));
        assert!(!all.matches(&hidden));

        let mains = MenuFilter::category(CategoryId(1));
        assert!(mains.matches(&korma));
        assert!(!mains.matches(&paneer));

        let creamy = MenuFilter::search("CREAMY");
        assert!(creamy.matches(&korma) && creamy.matches(&paneer));
        assert!(!MenuFilter::search("korma").matches(&hidden));
        assert!(MenuFilter::search("").matches(&paneer));

        let both = MenuFilter {
            category: Some(CategoryId(2)),
            query: Some("tikka".into()),
        };
        assert!(both.matches(&paneer));
        assert!(!both.matches(&korma));
    }

    #[tokio::test]
    async fn test_filtered_items_skips_inactive_categories() {
        let mut categories = MockClient::<Category>::new();
        let mut items = MockClient::<MenuItem>::new();
        categories
            .expect_list()
            .return_ok(vec![category(1, true), category(2, false)]);
        items.expect_list().return_ok(vec![
            dish(10, 1, "Dal Makhani", "Black lentils"),
            dish(11, 2, "Dal Tadka", "Yellow lentils"),
            dish(12, 1, "Naan", "Tandoor bread"),
        ]);

        let storefront = Storefront::new(
            CategoryClient::new(categories.client()),
            MenuItemClient::new(items.client()),
            &ShopConfig::default(),
        );
        let found = storefront
            .filtered_items(&MenuFilter::search("lentils"))
            .await
            .unwrap();

        let ids: Vec<MenuItemId> = found.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![MenuItemId(10)]);
        categories.verify();
        items.verify();
    }

    #[test]
    fn test_section_serializes_flat() {
        let section = MenuSection {
            category: category(1, true),
            items: vec![],
        };
        let json = serde_json::to_value(&section).unwrap();
        assert_eq!(json["slug"], "category-1");
        assert!(json["items"].as_array().unwrap().is_empty());
    }
}
