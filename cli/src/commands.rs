pub mod get;
pub mod info;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use fetchr_common::config;

#[derive(Parser)]
#[command(name = "fetchr")]
#[command(about = "A readiness-gated, one-shot HTTP GET client.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch one resource over HTTP/1.0
    #[command(alias = "g")]
    Get(GetArgs),
    /// Show networking information about this device
    #[command(alias = "i")]
    Info,
}

#[derive(Args)]
pub struct GetArgs {
    /// Host to fetch from
    #[arg(long, default_value = config::DEFAULT_HOST)]
    pub host: String,

    /// Port to connect to; defaults to 80, or 443 with --tls
    #[arg(long)]
    pub port: Option<u16>,

    /// Path to request
    #[arg(long, default_value = config::DEFAULT_PATH)]
    pub path: String,

    /// Fetch over TLS, verifying the peer against --ca-file
    #[arg(long, requires = "ca_file")]
    pub tls: bool,

    /// Trust anchor for peer verification, PEM or raw DER
    #[arg(long, requires = "tls", value_name = "FILE")]
    pub ca_file: Option<PathBuf>,

    /// Security tag the trust anchor is registered under
    #[arg(long, default_value_t = 1)]
    pub sec_tag: u32,

    /// Seconds between readiness polls
    #[arg(long, value_name = "SECS", default_value_t = config::DEFAULT_POLL_INTERVAL.as_secs())]
    pub poll_interval: u64,

    /// Give up when the network is still not ready after this many seconds
    #[arg(long, value_name = "SECS")]
    pub wait_timeout: Option<u64>,

    /// Simulate network attach after this many seconds instead of sampling
    /// the host
    #[arg(long, value_name = "SECS")]
    pub ready_after: Option<u64>,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
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
