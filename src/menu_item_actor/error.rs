//! Error types for the MenuItem actor.

use ordered_actor::StoreError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum MenuItemError {
    #[error("Menu item not found: {0}")]
    NotFound(String),

    #[error("Menu item validation error: {0}")]
    ValidationError(String),

    /// The item points at a category that does not exist.
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    /// The category actor could not be asked.
    #[error("Category lookup failed: {0}")]
    CategoryLookup(String),

    /// A category cannot be deleted while items still belong to it.
    #[error("Category {id} still has {items} menu item(s)")]
    CategoryInUse { id: String, items: usize },

    #[error("Failed to delete category: {0}")]
    CategoryDelete(String),

    #[error("Failed to reorder menu item {id}: {reason}")]
    ReorderFailed { id: String, reason: String },

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<StoreError> for MenuItemError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => MenuItemError::NotFound(id),
            StoreError::EmptyReorder => MenuItemError::ValidationError(e.to_string()),
            StoreError::ReorderFailed { id, reason, .. } => MenuItemError::ReorderFailed {
                id,
                reason: reason.to_string(),
            },
            StoreError::ScopeInUse { scope, count } => MenuItemError::CategoryInUse {
                id: scope,
                items: count,
            },
            StoreError::EntityError(inner) => match inner.downcast::<MenuItemError>() {
                Ok(err) => *err,
                Err(other) => MenuItemError::ActorCommunicationError(other.to_string()),
            },
            other => MenuItemError::ActorCommunicationError(other.to_string()),
        }
    }
}
