//! Entropy source that repeats a byte pattern.

use crate::ports::EntropySource;

/// Fills every buffer by cycling through a fixed pattern.
#[derive(Debug, Clone)]
pub struct FixedEntropy {
    pattern: Vec<u8>,
}

impl FixedEntropy {
    /// Creates a source that cycles through `pattern`. An empty pattern
    /// yields zeros.
    #[must_use]
    pub fn new(pattern: impl Into<Vec<u8>>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }
}

impl EntropySource for FixedEntropy {
    fn fill(&self, buf: &mut [u8]) {
        if self.pattern.is_empty() {
            buf.fill(0);
            return;
        }
        for (dst, src) in buf.iter_mut().zip(self.pattern.iter().cycle()) {
            *dst = *src;
        }
    }
}
