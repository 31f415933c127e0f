//! # Network Event Model
//!
//! Connectivity notifications as the platform reports them. Buses deliver
//! these to registered handlers; only three kinds matter for readiness,
//! everything else is folded into [`NetEvent::Other`].

use std::net::IpAddr;

/// One connectivity notification from the platform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NetEvent {
    /// A link came up. Informational; readiness still waits for DNS.
    InterfaceUp { iface: String },
    /// A link went down. The network can no longer be trusted.
    InterfaceDown { iface: String },
    /// A DNS server became available, the last prerequisite for a fetch.
    DnsServerAdded { server: IpAddr },
    /// Anything the readiness tracker does not care about.
    Other,
}

/// Registration key for event subscriptions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    InterfaceUp,
    InterfaceDown,
    DnsServerAdded,
}

impl NetEvent {
    /// The subscription kind this event belongs to, `None` for noise.
    pub fn kind(&self) -> Option<EventKind> {
        match self {
            NetEvent::InterfaceUp { .. } => Some(EventKind::InterfaceUp),
            NetEvent::InterfaceDown { .. } => Some(EventKind::InterfaceDown),
            NetEvent::DnsServerAdded { .. } => Some(EventKind::DnsServerAdded),
            NetEvent::Other => None,
        }
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
