//! [`OrderedEntity`] implementation for [`Category`].
//!
//! Categories share one global ordering scope and have no dependencies.

use super::CategoryError;
use crate::model::{Category, CategoryCreate, CategoryId, CategoryUpdate};
use async_trait::async_trait;
use ordered_actor::OrderedEntity;

fn required(field: &str, value: &str) -> Result<(), CategoryError> {
    if value.trim().is_empty() {
        return Err(CategoryError::ValidationError(format!(
            "{field} is required"
        )));
    }
    Ok(())
}

#[async_trait]
impl OrderedEntity for Category {
    type Id = CategoryId;
    type Scope = ();
    type Create = CategoryCreate;
    type Update = CategoryUpdate;
    type Context = ();
    type Error = CategoryError;

    fn from_create_params(
        id: CategoryId,
        params: CategoryCreate,
        display_order: u32,
    ) -> Result<Self, CategoryError> {
        required("name", &params.name)?;
        required("slug", &params.slug)?;
        Ok(Self {
            id,
            name: params.name,
            slug: params.slug,
            display_order,
            is_active: params.is_active,
        })
    }

    fn create_scope(_params: &CategoryCreate) {}

    fn id(&self) -> &CategoryId {
        &self.id
    }

    fn scope(&self) {}

    fn display_order(&self) -> u32 {
        self.display_order
    }

    fn set_display_order(&mut self, display_order: u32) {
        self.display_order = display_order;
    }

    /// Applies the provided fields; an empty name or slug rejects the whole update.
    async fn on_update(&mut self, update: CategoryUpdate, _ctx: &()) -> Result<(), CategoryError> {
        if let Some(name) = &update.name {
            required("name", name)?;
        }
        if let Some(slug) = &update.slug {
            required("slug", slug)?;
        }

        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(slug) = update.slug {
            self.slug = slug;
        }
        if let Some(is_active) = update.is_active {
            self.is_active = is_active;
        }
        Ok(())
    }
}
