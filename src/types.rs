use std::str::FromStr;

#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Transport protocol of the probe sockets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub enum Protocol {
    /// Transmission Control Protocol (stream sockets)
    #[default]
    Tcp,
    /// User Datagram Protocol (datagram sockets)
    Udp,
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tcp => write!(f, "TCP"),
            Self::Udp => write!(f, "UDP"),
        }
    }
}

/// IP version used for the loopback probes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub enum AddressFamily {
    /// IPv4, probing on 127.0.0.1
    #[default]
    Ipv4,
    /// IPv6, probing on ::1
    Ipv6,
}

impl std::fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ipv4 => write!(f, "IPv4"),
            Self::Ipv6 => write!(f, "IPv6"),
        }
    }
}

/// A closed interval of ports `lo..=hi` with `1 <= lo <= hi <= 65535`.
///
/// Only constructed through [`PortRange::new`] or parsing, so it is
/// serialize-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-support", derive(Serialize))]
pub struct PortRange {
    lo: u16,
    hi: u16,
}

impl PortRange {
    /// Create a range, rejecting port 0 and reversed bounds.
    ///
    /// # Errors
    /// Returns [`Error::InvalidRange`] if `lo == 0` or `lo > hi`
    pub fn new(lo: u16, hi: u16) -> Result<Self, Error> {
        if lo == 0 || lo > hi {
            return Err(Error::InvalidRange {
                lo: u32::from(lo),
                hi: u32::from(hi),
            });
        }
        Ok(Self { lo, hi })
    }

    /// Lowest port in the range
    #[must_use]
    pub const fn lo(&self) -> u16 {
        self.lo
    }

    /// Highest port in the range
    #[must_use]
    pub const fn hi(&self) -> u16 {
        self.hi
    }

    /// Number of ports in the range (never zero)
    #[must_use]
    #[allow(clippy::len_without_is_empty)]
    pub const fn len(&self) -> usize {
        (self.hi - self.lo) as usize + 1
    }

    /// Returns true if `port` lies inside the range
    #[must_use]
    pub const fn contains(&self, port: u16) -> bool {
        port >= self.lo && port <= self.hi
    }

    /// Every port of the range exactly once, starting at `start` and
    /// wrapping from `hi` back to `lo`.
    ///
    /// A `start` outside the range is clamped to `lo`.
    pub fn candidates_from(&self, start: u16) -> impl Iterator<Item = u16> {
        let lo = u32::from(self.lo);
        let len = self.len() as u32;
        let offset = if self.contains(start) {
            u32::from(start) - lo
        } else {
            0
        };
        // lo + (x % len) <= hi <= u16::MAX, so the cast is lossless
        (0..len).map(move |i| (lo + (offset + i) % len) as u16)
    }
}

impl std::fmt::Display for PortRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.lo, self.hi)
    }
}

impl FromStr for PortRange {
    type Err = Error;

    /// Parse `MIN:MAX`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lo, hi) = s
            .split_once(':')
            .ok_or_else(|| Error::invalid_format("range", format!("'{s}' (use MIN:MAX)")))?;

        let parse = |part: &str| {
            part.trim()
                .parse::<u32>()
                .map_err(|_| Error::invalid_format("range", format!("'{s}' (use MIN:MAX)")))
        };
        let (lo, hi) = (parse(lo)?, parse(hi)?);

        match (u16::try_from(lo), u16::try_from(hi)) {
            (Ok(lo), Ok(hi)) => Self::new(lo, hi),
            _ => Err(Error::InvalidRange { lo, hi }),
        }
    }
}
