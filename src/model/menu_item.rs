//! Menu items and the lightweight reference the cart keeps of them.

use super::CategoryId;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Highest spice level a dish can carry.
pub const MAX_SPICE_LEVEL: u8 = 3;

/// Type-safe identifier for Menu Items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MenuItemId(pub u32);

impl From<u32> for MenuItemId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for MenuItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "item_{}", self.0)
    }
}

/// A dish on the menu.
///
/// `display_order` is numbered per category: moving an item to another category keeps its
/// number until the next reorder of that category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub category_id: CategoryId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image_url: Option<String>,
    pub spice_level: u8,
    pub is_available: bool,
    pub is_featured: bool,
    pub display_order: u32,
}

impl MenuItem {
    /// The snapshot of this item a cart line stores.
    pub fn to_cart_item(&self) -> MenuItemRef {
        MenuItemRef {
            id: self.id.to_string(),
            name: self.name.clone(),
            price: self.price,
            image_url: self.image_url.clone(),
        }
    }

    /// One chili per spice level, empty for mild dishes.
    pub fn spice_display(&self) -> String {
        "🌶️".repeat(self.spice_level as usize)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub category_id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub spice_level: u8,
    #[serde(default = "available_by_default")]
    pub is_available: bool,
}

fn available_by_default() -> bool {
    true
}

impl MenuItemCreate {
    /// A mild, available dish with no description or image.
    pub fn new(category_id: CategoryId, name: impl Into<String>, price: f64) -> Self {
        Self {
            category_id,
            name: name.into(),
            description: String::new(),
            price,
            image_url: None,
            spice_level: 0,
            is_available: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuItemUpdate {
    pub category_id: Option<CategoryId>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub image_url: Option<Option<String>>,
    pub spice_level: Option<u8>,
    pub is_available: Option<bool>,
    pub is_featured: Option<bool>,
}

/// What a cart line remembers about the item it holds.
///
/// The id is a plain string so carts can also hold items from the static catalog and
/// survive a round trip through storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemRef {
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl MenuItemRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image_url: None,
        }
    }
}
