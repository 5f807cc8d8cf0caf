use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, SocketAddrV4, SocketAddrV6};

use socket2::{Domain, SockAddr};

use crate::error::{Error, Result};
use crate::types::AddressFamily;

/// Loopback socket address for `family` and `port`.
///
/// Probes never bind the wildcard address: availability is judged on the
/// local host only.
#[must_use]
pub fn loopback(family: AddressFamily, port: u16) -> SocketAddr {
    match family {
        AddressFamily::Ipv4 => SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, port)),
        AddressFamily::Ipv6 => SocketAddr::V6(SocketAddrV6::new(Ipv6Addr::LOCALHOST, port, 0, 0)),
    }
}

/// Socket domain for `family`
#[must_use]
pub const fn domain(family: AddressFamily) -> Domain {
    match family {
        AddressFamily::Ipv4 => Domain::IPV4,
        AddressFamily::Ipv6 => Domain::IPV6,
    }
}

/// Read the port back out of a bound socket's local address.
///
/// # Errors
/// Returns [`Error::SystemCall`] if the OS reported a non-IP address or
/// port 0 for the socket
pub fn assigned_port(addr: &SockAddr) -> Result<u16> {
    let invalid = |details: &str| {
        Error::system_call(
            "getsockname",
            io::Error::new(io::ErrorKind::InvalidData, details.to_string()),
        )
    };

    let port = addr
        .as_socket()
        .map(|a| a.port())
        .ok_or_else(|| invalid("not an IP socket address"))?;

    if port == 0 {
        return Err(invalid("socket is not bound to a port"));
    }
    Ok(port)
}
