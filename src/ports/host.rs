//! Host identity port for discovering this machine's network address.

use std::net::IpAddr;

/// Reports the local network address of the host.
pub trait HostIdentity: Send + Sync {
    /// Returns the address other nodes would see, or `None` when the host has
    /// no usable address (callers fall back to loopback).
    ///
    /// # Errors
    ///
    /// Returns an error if the network identity cannot be determined at all.
    fn local_address(&self) -> Result<Option<IpAddr>, Box<dyn std::error::Error + Send + Sync>>;
}
