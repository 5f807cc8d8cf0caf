//! Probe sockets
//!
//! A [`ProbeSocket`] owns exactly one OS socket. The descriptor is closed when
//! the value is dropped, so every exit path of the acquisition routines,
//! including `?` on errors, releases what it opened.

use std::io;

use log::trace;
use socket2::{SockAddr, Socket, Type};

use crate::error::{Error, Result};
use crate::socket::addr::{assigned_port, domain, loopback};
use crate::types::{AddressFamily, Protocol};

/// An open socket used for a single bind attempt on the loopback interface
#[derive(Debug)]
pub struct ProbeSocket {
    inner: Socket,
    protocol: Protocol,
    family: AddressFamily,
}

impl ProbeSocket {
    /// Create an unbound socket of the given protocol and family.
    ///
    /// # Errors
    /// Returns [`Error::SystemCall`] if the OS refuses to create the socket
    pub fn open(protocol: Protocol, family: AddressFamily) -> Result<Self> {
        let (ty, proto) = match protocol {
            Protocol::Tcp => (Type::STREAM, socket2::Protocol::TCP),
            Protocol::Udp => (Type::DGRAM, socket2::Protocol::UDP),
        };

        let inner = Socket::new(domain(family), ty, Some(proto))
            .map_err(|e| Error::system_call(format!("{family} {protocol} socket"), e))?;
        trace!("opened {family} {protocol} probe socket");

        Ok(Self {
            inner,
            protocol,
            family,
        })
    }

    /// Bind to `port` on the loopback address. Port 0 asks the kernel to
    /// pick a free ephemeral port.
    ///
    /// # Errors
    /// Returns the raw OS error, e.g. `AddrInUse` when the port is taken
    pub fn bind(&self, port: u16) -> io::Result<()> {
        let addr = SockAddr::from(loopback(self.family, port));
        self.inner.bind(&addr)
    }

    /// The port the socket is currently bound to.
    ///
    /// # Errors
    /// Returns [`Error::SystemCall`] if the local address cannot be queried
    /// or the socket is not bound yet
    pub fn local_port(&self) -> Result<u16> {
        let addr = self
            .inner
            .local_addr()
            .map_err(|e| Error::system_call("getsockname", e))?;
        assigned_port(&addr)
    }
}

impl Drop for ProbeSocket {
    fn drop(&mut self) {
        trace!("released {} {} probe socket", self.family, self.protocol);
    }
}
