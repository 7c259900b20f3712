//! Deterministic adapters for tests and reproducible runs.

pub mod clock;
pub mod entropy;
pub mod host;

pub use clock::ManualClock;
pub use entropy::FixedEntropy;
pub use host::FixedHostIdentity;
