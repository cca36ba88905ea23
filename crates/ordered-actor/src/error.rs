//! # Store Errors
//!
//! Errors produced by the collection actor and its client. Entity-specific failures
//! travel boxed inside [`StoreError::EntityError`] so that typed clients can downcast
//! them back to their own error enum.

/// Errors that can occur within the ordered store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("orderedIds must be a non-empty array")]
    EmptyReorder,
    /// A reorder stopped at `id`. Updates for earlier positions stay applied.
    #[error("Failed to update {id} to display_order {position}: {reason}")]
    ReorderFailed {
        id: String,
        position: u32,
        #[source]
        reason: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("Scope {scope} still holds {count} item(s)")]
    ScopeInUse { scope: String, count: usize },
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// The identifier a reorder failed on, if this is a reorder failure.
    pub fn failing_id(&self) -> Option<&str> {
        match self {
            StoreError::ReorderFailed { id, .. } => Some(id),
            _ => None,
        }
    }
}
