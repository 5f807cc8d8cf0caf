#![cfg_attr(docsrs, feature(doc_cfg))]

//! # Freeport
//!
//! Find TCP or UDP ports that are free right now by letting the operating
//! system allocate them, instead of guessing from `/proc` or `netstat`.
//!
//! - Without a range, a batch of sockets is bound to port 0 on loopback and
//!   held open together, so the kernel never assigns the same port twice
//!   within the batch.
//! - With a range, exact ports are try-bound starting from a random offset
//!   and wrapping around, until enough are found or the range is exhausted.
//!
//! Ports are only guaranteed free at the moment of the query. Uniqueness
//! holds within one call, not across processes: once the probe sockets are
//! released, anything else on the host may bind the same ports, so callers
//! should bind their own service promptly.
//!
//! ## Quick Start
//!
//! ```rust
//! use freeport::{acquire, AcquisitionRequest, AddressFamily, PortRange, Protocol};
//!
//! // Three TCP ports anywhere
//! let request = AcquisitionRequest::new(3, Protocol::Tcp, AddressFamily::Ipv4, None)?;
//! let ports = acquire(&request)?;
//! assert_eq!(ports.len(), 3);
//!
//! // Two UDP ports between 20000 and 20100
//! let range: PortRange = "20000:20100".parse()?;
//! let request = AcquisitionRequest::new(2, Protocol::Udp, AddressFamily::Ipv4, Some(range))?;
//! for port in acquire(&request)? {
//!     assert!(range.contains(port));
//! }
//! # Ok::<(), freeport::Error>(())
//! ```
//!
//! ## Features
//!
//! - `serde-support` - Serialize the request and value types

mod error;
mod request;
mod types;

pub mod socket;

use log::debug;
use rand::Rng;

pub use error::{Error, Result};
pub use request::{AcquisitionRequest, Strategy, MAX_PORTS};
pub use types::{AddressFamily, PortRange, Protocol};

/// Acquire the ports described by `request`, using the thread-local RNG for
/// the range search start offset.
///
/// Returns exactly `request.count()` distinct ports in discovery order, or
/// an error; partial results are never returned.
///
/// # Errors
/// - [`Error::SystemCall`] if the OS refuses a socket or bind
/// - [`Error::NoFreePort`] if a range is exhausted
pub fn acquire(request: &AcquisitionRequest) -> Result<Vec<u16>> {
    acquire_with_rng(request, &mut rand::rng())
}

/// Same as [`acquire`], drawing the range start offset from `rng`.
///
/// # Errors
/// See [`acquire`]
pub fn acquire_with_rng<R: Rng + ?Sized>(
    request: &AcquisitionRequest,
    rng: &mut R,
) -> Result<Vec<u16>> {
    debug!(
        "acquiring {} {} {} port(s) via {:?}",
        request.count(),
        request.family(),
        request.protocol(),
        request.strategy()
    );

    match request.strategy() {
        Strategy::Unconstrained => {
            socket::acquire_ephemeral(request.count(), request.protocol(), request.family())
        }
        Strategy::Ranged(range) => socket::acquire_in_range(
            range,
            request.count(),
            request.protocol(),
            request.family(),
            rng,
        ),
    }
}
