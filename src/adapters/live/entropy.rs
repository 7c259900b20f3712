//! Live entropy source backed by the thread-local CSPRNG.

use rand::RngCore;

use crate::ports::EntropySource;

/// Draws bytes from `rand`'s thread-local generator.
///
/// Each calling thread gets its own OS-seeded `ChaCha` instance, so concurrent
/// callers never contend on shared state.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngEntropy;

impl EntropySource for ThreadRngEntropy {
    fn fill(&self, buf: &mut [u8]) {
        rand::rng().fill_bytes(buf);
    }
}
