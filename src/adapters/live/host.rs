//! Live host identity using the routing table.

use std::net::{IpAddr, Ipv4Addr, SocketAddr, UdpSocket};

use crate::ports::HostIdentity;

/// Address used only to pick the outbound interface. UDP `connect` sends
/// nothing, so this never leaves the host.
const ROUTE_TARGET: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1)), 9);

/// Reports the address of the interface the host would use for outbound
/// traffic.
#[derive(Debug, Default, Clone, Copy)]
pub struct LiveHostIdentity;

impl HostIdentity for LiveHostIdentity {
    fn local_address(&self) -> Result<Option<IpAddr>, Box<dyn std::error::Error + Send + Sync>> {
        let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))
            .map_err(|e| format!("cannot open a socket to find the local address: {e}"))?;

        // No route means no usable address; the resolver falls back to loopback.
        if socket.connect(ROUTE_TARGET).is_err() {
            return Ok(None);
        }

        let ip = socket.local_addr()?.ip();
        Ok((!ip.is_unspecified()).then_some(ip))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_reports_unspecified_address() {
        let address = LiveHostIdentity.local_address().unwrap();
        if let Some(ip) = address {
            assert!(!ip.is_unspecified());
        }
    }
}
