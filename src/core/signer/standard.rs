//! Standard CRC-32 / MD5 signer.
//!
//! - `crc32`: IEEE CRC-32 of the bytes, as an unsigned decimal string
//! - `md5`: lowercase hexadecimal MD5 digest
//!
//! MD5 is treated as non-reentrant: concurrent callers queue on an
//! internal lock. Both primitives can be given an artificial cost so the
//! concurrency of the stages is observable.

use super::traits::DataSigner;
use md5::{Digest, Md5};
use std::sync::{Mutex, PoisonError};
use std::thread;
use std::time::Duration;

/// CRC-32 / MD5 signer backed by `crc32fast` and `md-5`
#[derive(Debug, Default)]
pub struct StandardSigner {
    crc32_delay: Duration,
    md5_delay: Duration,
    md5_guard: Mutex<()>,
}

impl StandardSigner {
    /// Create a signer without simulated cost
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a signer that sleeps for the given durations on every call
    pub fn with_delays(crc32_delay: Duration, md5_delay: Duration) -> Self {
        Self {
            crc32_delay,
            md5_delay,
            md5_guard: Mutex::new(()),
        }
    }
}

impl DataSigner for StandardSigner {
    fn crc32(&self, data: &str) -> String {
        if !self.crc32_delay.is_zero() {
            thread::sleep(self.crc32_delay);
        }
        crc32fast::hash(data.as_bytes()).to_string()
    }

    fn md5(&self, data: &str) -> String {
        let _guard = self.md5_guard.lock().unwrap_or_else(PoisonError::into_inner);
        if !self.md5_delay.is_zero() {
            thread::sleep(self.md5_delay);
        }
        hex::encode(Md5::digest(data.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Instant;

    #[test]
    fn crc32_is_decimal_ieee() {
        let signer = StandardSigner::new();
        assert_eq!(signer.crc32("0"), "4108050209");
        assert_eq!(signer.crc32(""), "0");
    }

    #[test]
    fn md5_is_lowercase_hex() {
        let signer = StandardSigner::new();
        assert_eq!(signer.md5("0"), "cfcd208495d565ef66e7dff9f98764da");
        assert_eq!(signer.md5(""), "d41d8cd98f00b204e9800998ecf8427e");
    }

    #[test]
    fn md5_calls_are_serialized() {
        let signer = Arc::new(StandardSigner::with_delays(
            Duration::ZERO,
            Duration::from_millis(40),
        ));
        let start = Instant::now();

        thread::scope(|scope| {
            for _ in 0..3 {
                let signer = Arc::clone(&signer);
                scope.spawn(move || signer.md5("1"));
            }
        });

        // Three 40ms calls, one at a time
        assert!(start.elapsed() >= Duration::from_millis(120));
    }

    #[test]
    fn crc32_calls_run_in_parallel() {
        let signer = StandardSigner::with_delays(Duration::from_millis(100), Duration::ZERO);
        let start = Instant::now();

        thread::scope(|scope| {
            for _ in 0..10 {
                scope.spawn(|| signer.crc32("1"));
            }
        });

        // One after another the calls take a full second
        assert!(start.elapsed() < Duration::from_millis(700));
    }
}
