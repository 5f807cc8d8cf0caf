//! Validated acquisition requests
//!
//! All bounds checking happens here, so the acquisition routines never see a
//! count of zero, an oversized batch, or a range smaller than the count.

#[cfg(feature = "serde-support")]
use serde::Serialize;

use crate::error::{Error, Result};
use crate::types::{AddressFamily, PortRange, Protocol};

/// Largest number of ports a single request may ask for.
pub const MAX_PORTS: usize = 1024;

/// How a request is served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Bind every socket to port 0 and hold them all while reading back
    Unconstrained,
    /// Try-bind candidate ports of the range, one at a time
    Ranged(PortRange),
}

/// One invocation's worth of configuration. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde-support", derive(Serialize))]
pub struct AcquisitionRequest {
    count: usize,
    protocol: Protocol,
    family: AddressFamily,
    range: Option<PortRange>,
}

impl AcquisitionRequest {
    /// Build a request, rejecting it before any socket is touched if the
    /// bounds are violated.
    ///
    /// # Errors
    /// - [`Error::InvalidCount`] if `count` is 0 or above [`MAX_PORTS`]
    /// - [`Error::RangeTooSmall`] if `range` holds fewer than `count` ports
    pub fn new(
        count: usize,
        protocol: Protocol,
        family: AddressFamily,
        range: Option<PortRange>,
    ) -> Result<Self> {
        if count == 0 || count > MAX_PORTS {
            return Err(Error::InvalidCount {
                count,
                max: MAX_PORTS,
            });
        }

        if let Some(range) = range {
            if count > range.len() {
                return Err(Error::RangeTooSmall {
                    requested: count,
                    available: range.len(),
                });
            }
        }

        Ok(Self {
            count,
            protocol,
            family,
            range,
        })
    }

    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    #[must_use]
    pub const fn protocol(&self) -> Protocol {
        self.protocol
    }

    #[must_use]
    pub const fn family(&self) -> AddressFamily {
        self.family
    }

    #[must_use]
    pub const fn range(&self) -> Option<PortRange> {
        self.range
    }

    /// The acquisition strategy selected by the presence of a range
    #[must_use]
    pub const fn strategy(&self) -> Strategy {
        match self.range {
            Some(range) => Strategy::Ranged(range),
            None => Strategy::Unconstrained,
        }
    }
}

/// A single TCP/IPv4 port with no range, the tool's default.
impl Default for AcquisitionRequest {
    fn default() -> Self {
        Self {
            count: 1,
            protocol: Protocol::Tcp,
            family: AddressFamily::Ipv4,
            range: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_bounds() {
        assert!(matches!(
            AcquisitionRequest::new(0, Protocol::Tcp, AddressFamily::Ipv4, None),
            Err(Error::InvalidCount { count: 0, .. })
        ));
        assert!(matches!(
            AcquisitionRequest::new(MAX_PORTS + 1, Protocol::Tcp, AddressFamily::Ipv4, None),
            Err(Error::InvalidCount { .. })
        ));
        assert!(AcquisitionRequest::new(MAX_PORTS, Protocol::Tcp, AddressFamily::Ipv4, None).is_ok());
        assert!(AcquisitionRequest::new(1, Protocol::Udp, AddressFamily::Ipv6, None).is_ok());
    }

    #[test]
    fn test_count_larger_than_range_rejected() {
        let range = PortRange::new(8000, 8010).unwrap();
        let err = AcquisitionRequest::new(200, Protocol::Tcp, AddressFamily::Ipv4, Some(range))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::RangeTooSmall {
                requested: 200,
                available: 11
            }
        ));
        assert!(err.is_config());
    }

    #[test]
    fn test_count_equal_to_range_accepted() {
        let range = PortRange::new(8000, 8010).unwrap();
        let request =
            AcquisitionRequest::new(11, Protocol::Tcp, AddressFamily::Ipv4, Some(range)).unwrap();
        assert_eq!(request.strategy(), Strategy::Ranged(range));
    }

    #[test]
    fn test_strategy_selection() {
        let request = AcquisitionRequest::new(3, Protocol::Udp, AddressFamily::Ipv6, None).unwrap();
        assert_eq!(request.strategy(), Strategy::Unconstrained);
        assert_eq!(request.protocol(), Protocol::Udp);
        assert_eq!(request.family(), AddressFamily::Ipv6);
        assert_eq!(request.count(), 3);
        assert!(request.range().is_none());
    }

    #[test]
    fn test_default_request() {
        let request = AcquisitionRequest::default();
        assert_eq!(request.count(), 1);
        assert_eq!(request.protocol(), Protocol::Tcp);
        assert_eq!(request.family(), AddressFamily::Ipv4);
        assert_eq!(request.strategy(), Strategy::Unconstrained);
    }
}
