//! Service context bundling all port trait objects.

use std::sync::Arc;

use crate::adapters::live::{LiveClock, LiveHostIdentity, ThreadRngEntropy};
use crate::ports::clock::Clock;
use crate::ports::entropy::EntropySource;
use crate::ports::host::HostIdentity;

/// Bundles the ports the generators depend on.
///
/// Each field provides access to one external boundary. `live` wires the
/// system adapters; tests build the struct directly with fixed adapters.
#[derive(Clone)]
pub struct ServiceContext {
    /// Clock for obtaining the current time.
    pub clock: Arc<dyn Clock>,
    /// Source of the host's network address.
    pub host: Arc<dyn HostIdentity>,
    /// Source of random bytes for random ids.
    pub entropy: Arc<dyn EntropySource>,
}

impl ServiceContext {
    /// Creates a live context with real adapters for every port.
    #[must_use]
    pub fn live() -> Self {
        Self {
            clock: Arc::new(LiveClock),
            host: Arc::new(LiveHostIdentity),
            entropy: Arc::new(ThreadRngEntropy),
        }
    }
}
