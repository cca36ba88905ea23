//! Error types for the Category actor.

use ordered_actor::StoreError;
use thiserror::Error;

/// Errors that can occur during category operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CategoryError {
    /// The requested category was not found.
    #[error("Category not found: {0}")]
    NotFound(String),

    /// The category data provided is invalid.
    #[error("Category validation error: {0}")]
    ValidationError(String),

    /// A reorder stopped at `id`; earlier positions were already written.
    #[error("Failed to reorder category {id}: {reason}")]
    ReorderFailed { id: String, reason: String },

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<StoreError> for CategoryError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => CategoryError::NotFound(id),
            StoreError::EmptyReorder => CategoryError::ValidationError(e.to_string()),
            StoreError::ReorderFailed { id, reason, .. } => CategoryError::ReorderFailed {
                id,
                reason: reason.to_string(),
            },
            StoreError::EntityError(inner) => match inner.downcast::<CategoryError>() {
                Ok(err) => *err,
                Err(other) => CategoryError::ActorCommunicationError(other.to_string()),
            },
            other => CategoryError::ActorCommunicationError(other.to_string()),
        }
    }
}
