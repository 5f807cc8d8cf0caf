//! Unconstrained batch acquisition
//!
//! Every socket of the batch is bound to port 0 and kept open until all of
//! them are bound. The kernel never hands the same port to two sockets that
//! are open at the same time, so the batch is free of duplicates without any
//! bookkeeping on our side.
//!
//! The guarantee is per batch: once the sockets are released another process
//! may bind the same ports, and a concurrent invocation may receive a port
//! this batch returned after it is released.

use log::{debug, warn};

use crate::error::{Error, Result};
use crate::socket::limits::ensure_descriptor_headroom;
use crate::socket::probe::ProbeSocket;
use crate::types::{AddressFamily, Protocol};

/// Acquire `count` distinct ports chosen by the kernel.
///
/// Fails atomically: if any socket cannot be created or bound, every socket
/// opened so far is released and no ports are returned.
///
/// # Errors
/// Returns [`Error::SystemCall`] on the first socket, bind or address query
/// failure
pub fn acquire_ephemeral(
    count: usize,
    protocol: Protocol,
    family: AddressFamily,
) -> Result<Vec<u16>> {
    if let Err(e) = ensure_descriptor_headroom(count) {
        warn!("could not adjust descriptor limit for {count} sockets: {e}");
    }

    let mut held = Vec::with_capacity(count);
    for _ in 0..count {
        let probe = ProbeSocket::open(protocol, family)?;
        probe
            .bind(0)
            .map_err(|e| Error::system_call(format!("bind {family} {protocol} port 0"), e))?;
        held.push(probe);
    }

    // Read back only once the whole batch is held.
    let ports = held
        .iter()
        .map(ProbeSocket::local_port)
        .collect::<Result<Vec<_>>>()?;
    drop(held);

    debug!("kernel assigned {} {family} {protocol} ports: {ports:?}", ports.len());
    Ok(ports)
}
