//! Entropy port for cryptographically strong random bytes.

/// Fills buffers with cryptographically strong random bytes.
///
/// Implementations must be safe to call from many threads at once.
pub trait EntropySource: Send + Sync {
    /// Overwrites every byte of `buf`.
    fn fill(&self, buf: &mut [u8]);
}
