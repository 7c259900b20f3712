//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the id engine and something it
//! does not own (time, the host network, the entropy pool) or, for
//! [`IdGenerator`], the boundary the persistence layer consumes.
//! Implementations live in `src/adapters/` and `src/engine/`.

pub mod clock;
pub mod entropy;
pub mod host;
pub mod id_gen;

pub use clock::Clock;
pub use entropy::EntropySource;
pub use host::HostIdentity;
pub use id_gen::IdGenerator;
