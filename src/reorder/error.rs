use thiserror::Error;

/// Why a move did not end in a confirmed, refreshed order.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ReorderError {
    /// The store rejected the new order. The message names the item it stopped at.
    #[error("Failed to save the new order: {0}")]
    Save(String),

    /// The authoritative order could not be fetched afterwards.
    #[error("Failed to refresh the list: {0}")]
    Refresh(String),
}
