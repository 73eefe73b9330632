//! Trait definitions for the hash primitives.

/// Provider of the two hash primitives the signing stages use.
///
/// Implementations must be pure: the same input always yields the same
/// string. They are shared across every worker thread of a run.
pub trait DataSigner: Send + Sync {
    /// CRC-32 style hash of `data`
    fn crc32(&self, data: &str) -> String;

    /// MD5 style hash of `data`.
    ///
    /// Callers must not assume this is safe to call concurrently.
    fn md5(&self, data: &str) -> String;
}

impl<S: DataSigner + ?Sized> DataSigner for std::sync::Arc<S> {
    fn crc32(&self, data: &str) -> String {
        (**self).crc32(data)
    }

    fn md5(&self, data: &str) -> String {
        (**self).md5(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    struct Echo;

    impl DataSigner for Echo {
        fn crc32(&self, data: &str) -> String {
            format!("c{data}")
        }

        fn md5(&self, data: &str) -> String {
            format!("m{data}")
        }
    }

    #[test]
    fn arc_delegates_to_inner() {
        let signer: Arc<dyn DataSigner> = Arc::new(Echo);
        assert_eq!(signer.crc32("1"), "c1");
        assert_eq!(signer.md5("1"), "m1");
    }
}
