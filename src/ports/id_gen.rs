//! ID generator port consumed by the persistence layer.

use crate::id::GeneratedId;

/// Mints surrogate identifiers.
///
/// The persistence layer holds one of these per entity type (see
/// [`crate::strategies::IdStrategies`]) and calls `generate` once per new
/// record, right before inserting it.
pub trait IdGenerator: Send + Sync {
    /// Returns a fresh identifier.
    fn generate(&self) -> GeneratedId;
}
