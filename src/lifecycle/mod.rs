//! # System Lifecycle
//!
//! Starts the catalog actors, wires their dependencies and shuts them down.
//!
//! Dependencies are injected when an actor starts (`run(context)`), not when it is built,
//! so the menu item actor can hold the category client without a construction cycle.
//! The dependency graph is acyclic (items depend on categories, never the reverse), so
//! dropping every client is enough to stop the whole system.
//!
//! Logging is set up once per binary with
//! [`setup_tracing`](ordered_actor::tracing::setup_tracing):
//!
//! ```bash
//! RUST_LOG=info cargo run      # lifecycle, creates, reorders
//! RUST_LOG=debug cargo run     # every request with its payload
//! ```

pub mod menu_system;

pub use menu_system::*;
