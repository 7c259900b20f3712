//! Live adapters backed by the operating system.

pub mod clock;
pub mod entropy;
pub mod host;

pub use clock::LiveClock;
pub use entropy::ThreadRngEntropy;
pub use host::LiveHostIdentity;
