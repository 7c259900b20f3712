//! Random id generation bounded to 53 bits.
//!
//! Ids fit in the 53-bit integer range that JSON numbers and JavaScript
//! doubles represent exactly. Uniqueness is statistical only: pair this
//! strategy with a unique constraint in storage when collisions matter.

use std::sync::Arc;

use crate::adapters::live::ThreadRngEntropy;
use crate::id::GeneratedId;
use crate::ports::{EntropySource, IdGenerator};

/// Width of a random id.
pub const RANDOM_BITS: u32 = 53;

/// Mask keeping the low [`RANDOM_BITS`] bits.
pub const RANDOM_MASK: u64 = (1 << RANDOM_BITS) - 1;

/// Bits of a random id that actually vary. Six of the 53 are fixed by the
/// byte shaping in [`shape`].
pub const ENTROPY_BITS: u32 = 47;

const DRAW_LEN: usize = 9;

/// Turns a 9-byte draw into a 53-bit value.
///
/// Byte 4 keeps its low nibble under a fixed `0x4` high nibble and byte 8
/// keeps its low six bits under a fixed `0b10` prefix. The bytes are then read
/// big-endian into a `u64` (byte 0 shifts out) and masked to 53 bits.
#[must_use]
pub fn shape(mut bytes: [u8; DRAW_LEN]) -> u64 {
    bytes[4] = (bytes[4] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;

    let value = bytes
        .iter()
        .fold(0_u64, |acc, &b| (acc << 8) | u64::from(b));
    value & RANDOM_MASK
}

/// Approximate probability that `count` independent draws over `bits` bits
/// contain at least one collision: `1 - exp(-n² / 2^(bits+1))`, which is about
/// `n² / (2 · 2^bits)` while small.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn birthday_bound(count: u64, bits: u32) -> f64 {
    let n = count as f64;
    let space = f64::from(bits).exp2();
    -(-(n * n) / (2.0 * space)).exp_m1()
}

/// Mints unpredictable ids from a cryptographically strong source.
pub struct RandomIdGenerator {
    entropy: Arc<dyn EntropySource>,
}

impl RandomIdGenerator {
    /// Creates a generator drawing from `entropy`.
    #[must_use]
    pub fn new(entropy: Arc<dyn EntropySource>) -> Self {
        Self { entropy }
    }

    /// Collision probability for `count` ids from this generator.
    #[must_use]
    pub fn collision_probability(count: u64) -> f64 {
        birthday_bound(count, ENTROPY_BITS)
    }
}

impl Default for RandomIdGenerator {
    fn default() -> Self {
        Self::new(Arc::new(ThreadRngEntropy))
    }
}

impl IdGenerator for RandomIdGenerator {
    fn generate(&self) -> GeneratedId {
        let mut bytes = [0_u8; DRAW_LEN];
        self.entropy.fill(&mut bytes);
        GeneratedId::from_bits(shape(bytes))
    }
}
