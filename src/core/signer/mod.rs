//! # Signer Module
//!
//! Hash primitives injected into the signing stages.
//!
//! The stages only see the [`DataSigner`] trait, so tests can swap in
//! deterministic stand-ins. [`StandardSigner`] is the production
//! implementation.
//!
//! ## Example
//! ```rust,ignore
//! use signer_pipeline::core::signer::SignerConfig;
//! use std::time::Duration;
//!
//! let signer = SignerConfig::new()
//!     .crc32_delay(Duration::from_millis(10))
//!     .build();
//!
//! assert_eq!(signer.crc32("0"), "4108050209");
//! ```

mod standard;
mod traits;

pub use standard::StandardSigner;
pub use traits::DataSigner;

use std::time::Duration;

/// Configuration builder for [`StandardSigner`]
#[derive(Debug, Clone, Default)]
pub struct SignerConfig {
    /// Simulated cost of one crc32 call
    crc32_delay: Duration,
    /// Simulated cost of one md5 call
    md5_delay: Duration,
}

impl SignerConfig {
    /// Create a configuration without simulated cost
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep this long inside every crc32 call
    pub fn crc32_delay(mut self, delay: Duration) -> Self {
        self.crc32_delay = delay;
        self
    }

    /// Sleep this long inside every md5 call
    pub fn md5_delay(mut self, delay: Duration) -> Self {
        self.md5_delay = delay;
        self
    }

    /// Build the signer
    pub fn build(self) -> StandardSigner {
        StandardSigner::with_delays(self.crc32_delay, self.md5_delay)
    }
}
