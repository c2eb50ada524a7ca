//! # Logging Setup
//!
//! The engine emits `tracing` events and never installs a subscriber itself.
//! Binaries and tests call [`setup_tracing`] once to get compact, `RUST_LOG`-filtered
//! output:
//!
//! ```bash
//! # Per-call summaries (hydrator creation, variant conversion, HTTP requests)
//! RUST_LOG=debug cargo test
//!
//! # Every hydrate/extract step and metadata resolution
//! RUST_LOG=resource_hydrator=trace cargo test
//! ```

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`.
///
/// Safe to call more than once; later calls are no-ops.
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .try_init();
}
