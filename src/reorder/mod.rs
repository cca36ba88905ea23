//! # Reorder
//!
//! Client-side half of ordered collections: pure list moves ([`moves`]) and the
//! [`Reconciler`] that applies a move optimistically, submits it, and then replaces the
//! local list with whatever the store reports.

pub mod error;
pub mod moves;
pub mod reconciler;

pub use error::ReorderError;
pub use moves::{array_move, move_within_scope};
pub use reconciler::{MoveOutcome, PendingMove, Reconciler};
