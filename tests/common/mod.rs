//! Helpers shared by the integration tests

use std::collections::HashSet;
use std::net::TcpListener;

/// True when the host has a usable IPv6 loopback.
pub fn ipv6_available() -> bool {
    TcpListener::bind("[::1]:0").is_ok()
}

/// Assert that `ports` has exactly `count` pairwise-distinct, non-zero entries.
pub fn assert_distinct(ports: &[u16], count: usize) {
    assert_eq!(ports.len(), count, "wrong number of ports: {ports:?}");
    let unique: HashSet<_> = ports.iter().collect();
    assert_eq!(unique.len(), count, "duplicate port in {ports:?}");
    assert!(ports.iter().all(|&p| p > 0), "port 0 in {ports:?}");
}
