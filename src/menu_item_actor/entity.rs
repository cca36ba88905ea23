//! [`OrderedEntity`] implementation for [`MenuItem`].
//!
//! Items are ordered per category and hold the [`CategoryClient`] as their context, which
//! `on_create` and `on_update` use to check that the referenced category exists.

use super::MenuItemError;
use crate::category_actor::CategoryError;
use crate::clients::CategoryClient;
use crate::model::{CategoryId, MenuItem, MenuItemCreate, MenuItemId, MenuItemUpdate, MAX_SPICE_LEVEL};
use async_trait::async_trait;
use ordered_actor::{OrderedClient, OrderedEntity};
use tracing::debug;

fn check_name(name: &str) -> Result<(), MenuItemError> {
    if name.trim().is_empty() {
        return Err(MenuItemError::ValidationError("name is required".into()));
    }
    Ok(())
}

fn check_price(price: f64) -> Result<(), MenuItemError> {
    if !price.is_finite() || price < 0.0 {
        return Err(MenuItemError::ValidationError(format!(
            "price must be a non-negative amount, got {price}"
        )));
    }
    Ok(())
}

fn check_spice(level: u8) -> Result<(), MenuItemError> {
    if level > MAX_SPICE_LEVEL {
        return Err(MenuItemError::ValidationError(format!(
            "spice_level must be between 0 and {MAX_SPICE_LEVEL}, got {level}"
        )));
    }
    Ok(())
}

async fn check_category(
    categories: &CategoryClient,
    category_id: CategoryId,
) -> Result<(), MenuItemError> {
    debug!(%category_id, "Validating category");
    match categories.get(category_id).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(MenuItemError::CategoryNotFound(category_id.to_string())),
        Err(e) => Err(MenuItemError::CategoryLookup(e.to_string())),
    }
}

#[async_trait]
impl OrderedEntity for MenuItem {
    type Id = MenuItemId;
    type Scope = CategoryId;
    type Create = MenuItemCreate;
    type Update = MenuItemUpdate;
    type Context = CategoryClient;
    type Error = MenuItemError;

    fn from_create_params(
        id: MenuItemId,
        params: MenuItemCreate,
        display_order: u32,
    ) -> Result<Self, MenuItemError> {
        check_name(&params.name)?;
        check_price(params.price)?;
        check_spice(params.spice_level)?;
        Ok(Self {
            id,
            category_id: params.category_id,
            name: params.name,
            description: params.description,
            price: params.price,
            image_url: params.image_url,
            spice_level: params.spice_level,
            is_available: params.is_available,
            is_featured: false,
            display_order,
        })
    }

    fn create_scope(params: &MenuItemCreate) -> CategoryId {
        params.category_id
    }

    fn id(&self) -> &MenuItemId {
        &self.id
    }

    fn scope(&self) -> CategoryId {
        self.category_id
    }

    fn display_order(&self) -> u32 {
        self.display_order
    }

    fn set_display_order(&mut self, display_order: u32) {
        self.display_order = display_order;
    }

    /// Runs inside the menu item actor once the category has no items left, so the
    /// category is deleted before any new item could be created in it.
    async fn on_retire_scope(
        category_id: &CategoryId,
        categories: &CategoryClient,
    ) -> Result<(), MenuItemError> {
        debug!(%category_id, "Deleting category");
        categories.delete(*category_id).await.map_err(|e| match e {
            CategoryError::NotFound(id) => MenuItemError::CategoryNotFound(id),
            other => MenuItemError::CategoryDelete(other.to_string()),
        })
    }

    async fn on_create(&mut self, categories: &CategoryClient) -> Result<(), MenuItemError> {
        check_category(categories, self.category_id).await
    }

    /// Validates every provided field first, so a rejected update leaves the item untouched.
    async fn on_update(
        &mut self,
        update: MenuItemUpdate,
        categories: &CategoryClient,
    ) -> Result<(), MenuItemError> {
        if let Some(name) = &update.name {
            check_name(name)?;
        }
        if let Some(price) = update.price {
            check_price(price)?;
        }
        if let Some(level) = update.spice_level {
            check_spice(level)?;
        }
        if let Some(category_id) = update.category_id {
            if category_id != self.category_id {
                check_category(categories, category_id).await?;
            }
        }

        if let Some(category_id) = update.category_id {
            self.category_id = category_id;
        }
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(image_url) = update.image_url {
            self.image_url = image_url;
        }
        if let Some(level) = update.spice_level {
            self.spice_level = level;
        }
        if let Some(is_available) = update.is_available {
            self.is_available = is_available;
        }
        if let Some(is_featured) = update.is_featured {
            self.is_featured = is_featured;
        }
        Ok(())
    }
}
