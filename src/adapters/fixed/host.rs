//! Host identity with a predetermined answer.

use std::net::IpAddr;

use crate::ports::HostIdentity;

/// Answers `local_address` with a fixed outcome.
#[derive(Debug, Clone)]
pub enum FixedHostIdentity {
    /// The host has this address.
    Address(IpAddr),
    /// The host has no usable address.
    Unavailable,
    /// The lookup fails with this message.
    Failing(String),
}

impl HostIdentity for FixedHostIdentity {
    fn local_address(&self) -> Result<Option<IpAddr>, Box<dyn std::error::Error + Send + Sync>> {
        match self {
            Self::Address(ip) => Ok(Some(*ip)),
            Self::Unavailable => Ok(None),
            Self::Failing(message) => Err(message.clone().into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_variant_answers_as_configured() {
        let ip: IpAddr = "10.1.2.3".parse().unwrap();
        let found = FixedHostIdentity::Address(ip).local_address();
        assert_eq!(found.unwrap(), Some(ip));
        let missing = FixedHostIdentity::Unavailable.local_address();
        assert_eq!(missing.unwrap(), None);

        let failing = FixedHostIdentity::Failing("no interfaces".into());
        let err = failing.local_address().unwrap_err();
        assert_eq!(err.to_string(), "no interfaces");
    }
}
