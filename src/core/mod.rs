//! # Core Module
//!
//! The concurrent pipeline engine and the signing stages built on it.
//!
//! ## Modules
//! - `pipeline` - Stage contract and the executor wiring stages together
//! - `signer` - Injected crc32/md5 primitives
//! - `stages` - SingleHash, MultiHash and CombineResults
//! - `input` - Parses the integers to sign

pub mod input;
pub mod pipeline;
pub mod signer;
pub mod stages;

// Re-export commonly used types
pub use pipeline::{execute_pipeline, Inbox, Item, ItemKind, Outbox, Pipeline, Stage};
pub use signer::{DataSigner, SignerConfig, StandardSigner};
pub use stages::{sign_values, CombineResults, MultiHash, Signature, SingleHash};
