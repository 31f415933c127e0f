//! # Resolved Address
//!
//! The one shape resolution is allowed to produce: an IPv4 stream endpoint.
//! Encoding the family in the type means the connect path never has to
//! re-check what the resolver already filtered.

use std::fmt;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

/// One IPv4 stream candidate for a connection attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedAddr {
    addr: SocketAddrV4,
}

impl ResolvedAddr {
    pub fn new(ip: Ipv4Addr, port: u16) -> Self {
        Self { addr: SocketAddrV4::new(ip, port) }
    }

    pub fn ip(&self) -> Ipv4Addr {
        *self.addr.ip()
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Widens back to the general form `connect` calls take.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::V4(self.addr)
    }
}

impl From<SocketAddrV4> for ResolvedAddr {
    fn from(addr: SocketAddrV4) -> Self {
        Self { addr }
    }
}

impl fmt::Display for ResolvedAddr {
    /// Rendered the way the resolution dump prints candidates.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (family=ipv4, type=stream)", self.addr)
    }
}



// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
