//! # Fetch Configuration
//!
//! Everything one fetch needs to know, resolved before the service starts:
//! where to connect, how the request line is formed and how patiently the
//! readiness gate polls.

use std::time::Duration;

use crate::tls::TlsConfig;

/// Host queried when the caller does not name one.
pub const DEFAULT_HOST: &str = "google.com";

/// Path requested when the caller does not name one.
pub const DEFAULT_PATH: &str = "/";

/// Port for plain connections.
pub const HTTP_PORT: u16 = 80;

/// Port for TLS connections.
pub const HTTPS_PORT: u16 = 443;

/// Pause between readiness polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Picks the conventional port for the requested connection mode.
pub fn default_port(tls_enabled: bool) -> u16 {
    if tls_enabled { HTTPS_PORT } else { HTTP_PORT }
}

/// Parameters of a single one-shot fetch.
#[derive(Clone, Debug)]
pub struct FetchConfig {
    /// Host name the request is addressed to.
    pub host: String,
    /// TCP port on the remote end.
    pub port: u16,
    /// Absolute path placed on the request line.
    pub path: String,
    /// TLS session parameters; `None` keeps the connection plain.
    pub tls: Option<TlsConfig>,
    /// Pause between readiness polls while the network is not up yet.
    pub poll_interval: Duration,
    /// Upper bound on the whole readiness wait; `None` waits forever.
    pub wait_deadline: Option<Duration>,
}

impl FetchConfig {
    /// URL scheme implied by the connection mode.
    pub fn scheme(&self) -> &'static str {
        if self.tls.is_some() { "https" } else { "http" }
    }

    /// Renders the target as a URL for diagnostics. The port stays explicit
    /// even when it matches the scheme default.
    pub fn url(&self) -> String {
        format!("{}://{}:{}{}", self.scheme(), self.host, self.port, self.path)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: HTTP_PORT,
            path: DEFAULT_PATH.to_string(),
            tls: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
            wait_deadline: None,
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
