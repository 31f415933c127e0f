use std::fs;
use std::net::IpAddr;

use pnet::datalink::{self, NetworkInterface};

/// Where the platform records its resolvers.
const RESOLV_CONF: &str = "/etc/resolv.conf";

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ViabilityError {
    /// The interface is operationally down.
    IsDown,
    /// Loopback cannot carry traffic to an external host.
    IsLoopback,
    /// The interface has no address to source a connection from.
    NoAddress,
}

/// Checks whether `interface` could plausibly carry a fetch to a remote host.
pub fn link_viability(interface: &NetworkInterface) -> Result<(), ViabilityError> {
    if !interface.is_up() {
        return Err(ViabilityError::IsDown);
    }
    if interface.is_loopback() {
        return Err(ViabilityError::IsLoopback);
    }
    if interface.ips.is_empty() {
        return Err(ViabilityError::NoAddress);
    }

    Ok(())
}

/// Every interface on this host that passes [`link_viability`].
pub fn viable_links() -> Vec<NetworkInterface> {
    datalink::interfaces()
        .into_iter()
        .filter(|interface| link_viability(interface).is_ok())
        .collect()
}

/// Resolvers this host is configured with, in configuration order.
pub fn dns_servers() -> Vec<IpAddr> {
    match fs::read_to_string(RESOLV_CONF) {
        Ok(contents) => parse_resolv_conf(&contents),
        Err(_) => Vec::new(),
    }
}

/// Pulls `nameserver` entries out of resolv.conf contents. Unparseable
/// addresses and every other directive are skipped.
pub fn parse_resolv_conf(contents: &str) -> Vec<IpAddr> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('#') && !line.starts_with(';'))
        .filter_map(|line| line.strip_prefix("nameserver"))
        .filter_map(|rest| rest.trim().parse::<IpAddr>().ok())
        .collect()
}



// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
