//! Range-constrained search
//!
//! Candidates are probed one at a time with an exact-port bind, starting at
//! a random port of the range and wrapping around, so that concurrent
//! callers asking for the same range spread out instead of all racing for
//! `lo`. Each candidate is visited at most once, which keeps the result free
//! of duplicates and bounds the work to one probe per port in the range.
//!
//! Unlike the unconstrained batch, a found port is released before the next
//! probe, so another process can take it before the caller binds it.

use log::{debug, trace};
use rand::Rng;

use crate::error::{Error, Result};
use crate::socket::probe::ProbeSocket;
use crate::types::{AddressFamily, PortRange, Protocol};

/// A single availability check for an exact port.
#[cfg_attr(test, mockall::automock)]
pub trait PortProbe {
    /// Returns `Ok(true)` if `port` could be bound, `Ok(false)` if the bind
    /// was refused.
    ///
    /// # Errors
    /// Errors mean the port could not be judged at all and abort the scan
    fn try_bind(&self, port: u16) -> Result<bool>;
}

/// Probes exact ports on the loopback interface with short-lived sockets.
#[derive(Debug, Clone, Copy)]
pub struct LoopbackProbe {
    protocol: Protocol,
    family: AddressFamily,
}

impl LoopbackProbe {
    #[must_use]
    pub const fn new(protocol: Protocol, family: AddressFamily) -> Self {
        Self { protocol, family }
    }
}

impl PortProbe for LoopbackProbe {
    fn try_bind(&self, port: u16) -> Result<bool> {
        let probe = ProbeSocket::open(self.protocol, self.family)?;
        match probe.bind(port) {
            Ok(()) => Ok(true),
            Err(e) => {
                trace!("port {port} unavailable: {e}");
                Ok(false)
            }
        }
    }
}

/// Uniformly random starting port inside `range`
pub fn random_start<R: Rng + ?Sized>(range: PortRange, rng: &mut R) -> u16 {
    rng.random_range(range.lo()..=range.hi())
}

/// Scan `range` from `start`, wrapping to `lo`, until `count` ports pass
/// `probe` or every port has been tried once.
///
/// Ports are returned in discovery order.
///
/// # Errors
/// - [`Error::RangeTooSmall`] if `count` exceeds the range, before any probe
/// - [`Error::NoFreePort`] if the full range was scanned without enough hits
/// - any error returned by `probe`
pub fn scan_range<P: PortProbe + ?Sized>(
    probe: &P,
    range: PortRange,
    count: usize,
    start: u16,
) -> Result<Vec<u16>> {
    if count > range.len() {
        return Err(Error::RangeTooSmall {
            requested: count,
            available: range.len(),
        });
    }

    let mut found = Vec::with_capacity(count);
    for port in range.candidates_from(start) {
        if found.len() == count {
            break;
        }
        if probe.try_bind(port)? {
            found.push(port);
        }
    }

    if found.len() < count {
        return Err(Error::NoFreePort {
            requested: count,
            found: found.len(),
            range,
        });
    }
    Ok(found)
}

/// Find `count` distinct free ports inside `range` using loopback probes and
/// a start offset drawn from `rng`.
///
/// A refused bind only marks that port unavailable. Failing to create the
/// probe socket itself aborts the scan, since it says nothing about the port
/// and would otherwise be misreported as [`Error::NoFreePort`].
///
/// # Errors
/// See [`scan_range`]; socket creation failures surface as
/// [`Error::SystemCall`]
pub fn acquire_in_range<R: Rng + ?Sized>(
    range: PortRange,
    count: usize,
    protocol: Protocol,
    family: AddressFamily,
    rng: &mut R,
) -> Result<Vec<u16>> {
    let start = random_start(range, rng);
    debug!("scanning {family} {protocol} range {range} from {start} for {count} ports");

    let ports = scan_range(&LoopbackProbe::new(protocol, family), range, count, start)?;
    debug!("found {family} {protocol} ports in {range}: {ports:?}");
    Ok(ports)
}
