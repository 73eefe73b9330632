//! # Signer Pipeline
//!
//! A concurrent multi-stage pipeline and the hashing stages that run on it.
//!
//! ## Core Model
//! - **One thread per stage** - stages are wired by rendezvous channels
//! - **Fan-out inside stages** - per-item workers, joined before a stage returns
//! - **Deterministic result** - the last signing stage sorts what it receives
//!
//! ## Architecture
//! - `core` - The pipeline engine, signer primitives and signing stages
//! - `events` - Event-driven progress reporting
//! - `error` - Error types
//! - `cli` - Command-line interface (binary only)

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{Result, SignerError};

/// Initialize tracing for the library
///
/// This should be called by the application entry point. A subscriber
/// that is already installed is left in place.
pub fn init_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
