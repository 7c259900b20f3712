//! Identifier types and the time-ordered bit layout.
//!
//! A time-ordered id packs three fields into the low 63 bits of a `u64`:
//!
//! ```text
//! | 41 bits: ms since EPOCH_MILLIS | 10 bits: node id | 12 bits: sequence |
//! ```
//!
//! The top bit is always clear, so every id fits an `i64`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{IdError, Result};

/// 2023-01-01T00:00:00Z in milliseconds since the Unix epoch.
pub const EPOCH_MILLIS: i64 = 1_672_531_200_000;

/// Width of the node id field.
pub const NODE_BITS: u32 = 10;
/// Width of the per-millisecond sequence field.
pub const SEQUENCE_BITS: u32 = 12;
/// Width of the timestamp delta field.
pub const TIMESTAMP_BITS: u32 = 63 - NODE_BITS - SEQUENCE_BITS;

/// Largest node id.
pub const MAX_NODE_ID: u16 = (1 << NODE_BITS) - 1;
/// Largest sequence value within one millisecond.
pub const MAX_SEQUENCE: u16 = (1 << SEQUENCE_BITS) - 1;
/// Largest timestamp delta the layout can hold (about 69 years past the epoch).
pub const MAX_TIMESTAMP_DELTA: u64 = (1 << TIMESTAMP_BITS) - 1;

const NODE_SHIFT: u32 = SEQUENCE_BITS;
const TIMESTAMP_SHIFT: u32 = NODE_BITS + SEQUENCE_BITS;

/// A minted identifier.
///
/// Always non-negative and never above `i64::MAX`, so it converts losslessly
/// to `i64` as well as to its decimal string form. Serializes as a JSON
/// number; use [`as_string`] for consumers limited to 53-bit integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u64", try_from = "u64")]
pub struct GeneratedId(u64);

impl GeneratedId {
    /// Largest representable id, `i64::MAX`.
    pub const MAX: u64 = u64::MAX >> 1;

    /// Wraps a raw value, returning `None` above [`GeneratedId::MAX`].
    #[must_use]
    pub fn new(raw: u64) -> Option<Self> {
        (raw <= Self::MAX).then_some(Self(raw))
    }

    /// Returns the raw unsigned value.
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }

    /// Returns the id as a signed 64-bit integer.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn as_i64(self) -> i64 {
        // Never above i64::MAX, see `new`.
        self.0 as i64
    }

    /// Only for values the caller has already bounded to 63 bits.
    pub(crate) fn from_bits(raw: u64) -> Self {
        debug_assert!(raw <= Self::MAX);
        Self(raw & Self::MAX)
    }
}

impl fmt::Display for GeneratedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for GeneratedId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let raw: u64 = trimmed.parse().map_err(|e: std::num::ParseIntError| IdError::InvalidId {
            input: s.to_string(),
            reason: e.to_string(),
        })?;
        Self::try_from(raw).map_err(|_| IdError::InvalidId {
            input: s.to_string(),
            reason: format!("exceeds {}", Self::MAX),
        })
    }
}

impl TryFrom<u64> for GeneratedId {
    type Error = IdError;

    fn try_from(raw: u64) -> Result<Self> {
        Self::new(raw).ok_or_else(|| IdError::InvalidId {
            input: raw.to_string(),
            reason: format!("exceeds {}", Self::MAX),
        })
    }
}

impl TryFrom<i64> for GeneratedId {
    type Error = IdError;

    fn try_from(raw: i64) -> Result<Self> {
        u64::try_from(raw).map(Self).map_err(|_| IdError::InvalidId {
            input: raw.to_string(),
            reason: "ids are never negative".into(),
        })
    }
}

impl From<GeneratedId> for u64 {
    fn from(id: GeneratedId) -> Self {
        id.0
    }
}

impl From<GeneratedId> for i64 {
    fn from(id: GeneratedId) -> Self {
        id.as_i64()
    }
}

/// Serde adapter that writes a [`GeneratedId`] as a decimal string.
///
/// ```
/// # use idmint::id::GeneratedId;
/// #[derive(serde::Serialize)]
/// struct Row {
///     #[serde(with = "idmint::id::as_string")]
///     id: GeneratedId,
/// }
/// let row = Row { id: GeneratedId::new(9_007_199_254_740_993).unwrap() };
/// assert_eq!(serde_json::to_string(&row).unwrap(), r#"{"id":"9007199254740993"}"#);
/// ```
pub mod as_string {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::GeneratedId;

    /// Serializes the id as its decimal string.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(id: &GeneratedId, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(id)
    }

    /// Parses the id back from its decimal string.
    ///
    /// # Errors
    ///
    /// Fails when the string is not a non-negative decimal `i64`.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<GeneratedId, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// A node identifier in `[0, MAX_NODE_ID]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeId(u16);

impl NodeId {
    /// Validates an explicitly configured node id.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::Configuration`] when `value` exceeds [`MAX_NODE_ID`].
    pub fn new(value: u16) -> Result<Self> {
        if value > MAX_NODE_ID {
            return Err(IdError::Configuration(format!(
                "node id {value} is outside 0..={MAX_NODE_ID}"
            )));
        }
        Ok(Self(value))
    }

    /// Keeps the low [`NODE_BITS`] bits of a hash.
    #[must_use]
    pub fn from_hash(hash: u64) -> Self {
        // Masked to 10 bits, so the narrowing cannot truncate.
        let low = hash & u64::from(MAX_NODE_ID);
        Self(u16::try_from(low).unwrap_or(MAX_NODE_ID))
    }

    /// Returns the numeric value.
    #[must_use]
    pub fn get(self) -> u16 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The three fields of a time-ordered id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SnowflakeParts {
    /// Milliseconds since [`EPOCH_MILLIS`].
    pub timestamp_delta: u64,
    /// Node that minted the id.
    pub node_id: NodeId,
    /// Position within the millisecond.
    pub sequence: u16,
}

impl SnowflakeParts {
    /// Packs the fields into an id. Each field is masked to its width.
    #[must_use]
    pub fn compose(self) -> GeneratedId {
        let timestamp = (self.timestamp_delta & MAX_TIMESTAMP_DELTA) << TIMESTAMP_SHIFT;
        let node = u64::from(self.node_id.get()) << NODE_SHIFT;
        let sequence = u64::from(self.sequence & MAX_SEQUENCE);
        GeneratedId::from_bits(timestamp | node | sequence)
    }

    /// Splits an id back into its fields.
    #[must_use]
    pub fn decompose(id: GeneratedId) -> Self {
        let raw = id.get();
        let sequence = raw & u64::from(MAX_SEQUENCE);
        Self {
            timestamp_delta: (raw >> TIMESTAMP_SHIFT) & MAX_TIMESTAMP_DELTA,
            node_id: NodeId::from_hash(raw >> NODE_SHIFT),
            sequence: u16::try_from(sequence).unwrap_or(MAX_SEQUENCE),
        }
    }

    /// Absolute time of the id in milliseconds since the Unix epoch.
    #[must_use]
    pub fn unix_millis(&self) -> i64 {
        EPOCH_MILLIS.saturating_add_unsigned(self.timestamp_delta)
    }

    /// Absolute time of the id as a UTC instant.
    #[must_use]
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.unix_millis())
    }
}
