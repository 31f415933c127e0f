//! # Address Resolution
//!
//! The stock [`Resolver`]: system name resolution narrowed to IPv4 stream
//! candidates. Numeric addresses short-circuit inside the lookup, so the
//! same call covers hostnames and literal IPs.

use async_trait::async_trait;
use tokio::net;

use fetchr_common::network::addr::ResolvedAddr;
use fetchr_common::platform::{ResolveError, Resolver};

/// Resolves through the host's configured name service.
#[derive(Debug, Default)]
pub struct DnsResolver;

impl DnsResolver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Resolver for DnsResolver {
    async fn resolve(&self, host: &str, port: u16) -> Result<Vec<ResolvedAddr>, ResolveError> {
        if host.is_empty() {
            return Err(ResolveError::EmptyHost);
        }

        let addrs = net::lookup_host((host, port))
            .await
            .map_err(|source| ResolveError::Lookup { source })?;

        let candidates: Vec<ResolvedAddr> = addrs
            .filter_map(|addr| match addr {
                std::net::SocketAddr::V4(v4) => Some(ResolvedAddr::from(v4)),
                std::net::SocketAddr::V6(_) => None,
            })
            .collect();

        if candidates.is_empty() {
            return Err(ResolveError::NoCandidates { host: host.to_string() });
        }

        Ok(candidates)
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
