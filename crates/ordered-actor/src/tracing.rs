/// Initializes structured logging for binaries and demos built on the store.
///
/// Verbosity comes from `RUST_LOG`:
/// - `RUST_LOG=info` shows actor start, create, reorder and shutdown events
/// - `RUST_LOG=debug` adds every request
/// - `RUST_LOG=ordered_actor=trace` adds each per-id `display_order` write of a reorder
///
/// Calling it twice panics, as `tracing_subscriber`'s `init` does.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
