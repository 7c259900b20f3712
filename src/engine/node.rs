//! Node identity resolution.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::error::{IdError, Result};
use crate::id::NodeId;
use crate::ports::HostIdentity;

/// Address hashed when the host reports none.
pub const LOOPBACK_ADDRESS: &str = "127.0.0.1";

const HASH_SEED: u64 = 0;

/// Where a resolved node id came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeSource {
    /// Set explicitly through configuration.
    Configured,
    /// Hashed from the host's network address.
    HostAddress(String),
    /// Hashed from [`LOOPBACK_ADDRESS`] because the host had no address.
    Loopback,
}

impl fmt::Display for NodeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configured => write!(f, "configured"),
            Self::HostAddress(address) => write!(f, "host address {address}"),
            Self::Loopback => write!(f, "loopback fallback {LOOPBACK_ADDRESS}"),
        }
    }
}

/// A node id together with its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeIdentity {
    /// The resolved id.
    pub node_id: NodeId,
    /// How it was obtained.
    pub source: NodeSource,
}

/// Derives the node id embedded in time-ordered ids.
///
/// A configured id wins. Otherwise the host's address (or loopback, when it
/// has none) is hashed and masked to 10 bits, so every process on one host
/// agrees on the same id without coordination.
pub struct NodeIdentityResolver {
    host: Arc<dyn HostIdentity>,
    configured: Option<u16>,
}

impl NodeIdentityResolver {
    /// Creates a resolver that consults `host`.
    #[must_use]
    pub fn new(host: Arc<dyn HostIdentity>) -> Self {
        Self {
            host,
            configured: None,
        }
    }

    /// Pins the node id, bypassing the host lookup.
    #[must_use]
    pub fn with_configured(mut self, node_id: Option<u16>) -> Self {
        self.configured = node_id;
        self
    }

    /// Resolves the node id.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::Configuration`] when the configured id is out of
    /// range or the host's network identity cannot be determined.
    pub fn resolve(&self) -> Result<NodeId> {
        self.describe().map(|identity| identity.node_id)
    }

    /// Resolves the node id and reports where it came from.
    ///
    /// # Errors
    ///
    /// Same as [`NodeIdentityResolver::resolve`].
    pub fn describe(&self) -> Result<NodeIdentity> {
        if let Some(value) = self.configured {
            let node_id = NodeId::new(value)?;
            debug!(node_id = value, "using configured node id");
            return Ok(NodeIdentity {
                node_id,
                source: NodeSource::Configured,
            });
        }

        let address = self.host.local_address().map_err(|e| {
            IdError::Configuration(format!("cannot determine local network identity: {e}"))
        })?;

        let identity = match address {
            Some(ip) => {
                let text = ip.to_string();
                NodeIdentity {
                    node_id: hash_address(&text),
                    source: NodeSource::HostAddress(text),
                }
            }
            None => NodeIdentity {
                node_id: hash_address(LOOPBACK_ADDRESS),
                source: NodeSource::Loopback,
            },
        };
        debug!(node_id = identity.node_id.get(), source = %identity.source, "resolved node id");
        Ok(identity)
    }
}

/// Hashes a textual address down to a node id.
#[must_use]
pub fn hash_address(address: &str) -> NodeId {
    NodeId::from_hash(museair::bfast::hash(address.as_bytes(), HASH_SEED))
}

#[cfg(test)]
mod tests {
    use std::net::IpAddr;

    use super::*;
    use crate::adapters::fixed::FixedHostIdentity;

    fn resolver(host: FixedHostIdentity) -> NodeIdentityResolver {
        NodeIdentityResolver::new(Arc::new(host))
    }

    #[test]
    fn hashes_host_address() {
        let ip: IpAddr = "10.20.30.40".parse().unwrap();
        let r = resolver(FixedHostIdentity::Address(ip));
        let identity = r.describe().unwrap();
        let expected = NodeSource::HostAddress("10.20.30.40".into());
        assert_eq!(identity.node_id, hash_address("10.20.30.40"));
        assert_eq!(identity.source, expected);
        assert!(identity.node_id.get() <= crate::id::MAX_NODE_ID);
    }

    #[test]
    fn resolution_is_stable() {
        let ip: IpAddr = "192.168.1.77".parse().unwrap();
        let r = resolver(FixedHostIdentity::Address(ip));
        assert_eq!(r.resolve().unwrap(), r.resolve().unwrap());
    }

    #[test]
    fn falls_back_to_loopback() {
        let r = resolver(FixedHostIdentity::Unavailable);
        let identity = r.describe().unwrap();
        assert_eq!(identity.node_id, hash_address(LOOPBACK_ADDRESS));
        assert_eq!(identity.source, NodeSource::Loopback);
    }

    #[test]
    fn lookup_failure_is_a_configuration_error() {
        let r = resolver(FixedHostIdentity::Failing("no interfaces".into()));
        let err = r.resolve().unwrap_err();
        assert!(matches!(err, IdError::Configuration(_)));
        assert!(err.to_string().contains("no interfaces"));
    }

    #[test]
    fn configured_id_skips_host_lookup() {
        let host = FixedHostIdentity::Failing("unreachable".into());
        let r = resolver(host).with_configured(Some(17));
        let identity = r.describe().unwrap();
        assert_eq!(identity.node_id.get(), 17);
        assert_eq!(identity.source, NodeSource::Configured);
    }

    #[test]
    fn configured_id_out_of_range_is_rejected() {
        let host = FixedHostIdentity::Unavailable;
        let r = resolver(host).with_configured(Some(1024));
        assert!(matches!(r.resolve(), Err(IdError::Configuration(_))));
    }

    #[test]
    fn different_addresses_usually_differ() {
        let ids: std::collections::HashSet<_> = (1..=50)
            .map(|i| hash_address(&format!("10.0.0.{i}")))
            .collect();
        let distinct = ids.len();
        assert!(distinct > 40, "poor hash spread: {distinct} of 50");
    }
}
