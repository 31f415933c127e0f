//! # Fetch Service
//!
//! Implements the core "one-shot fetch" use case.
//!
//! This service owns the strict sequence between process start and a drained
//! response: arm the readiness tracker, pass the modem gate, wait for the
//! network, resolve, connect, exchange, close. Every step talks to the
//! platform through the seams in `fetchr_common::platform`, so the same
//! sequence runs against the real host, the simulator or test stubs.

use std::time::{Duration, Instant};

use thiserror::Error;
use tokio::io::AsyncWrite;
use tokio::time;
use tracing::{Instrument, info_span};

use fetchr_common::config::FetchConfig;
use fetchr_common::network::addr::ResolvedAddr;
use fetchr_common::platform::{
    EventBus, ModemControl, ModemError, ResolveError, Resolver, SubscribeError,
};
use fetchr_common::readiness::NetReadiness;
use fetchr_common::tls::CredentialStore;
use fetchr_common::{debug, info, warn};

use crate::events;
use crate::http::{self, IoError};
use crate::network::connect::{self, ConnectError, Connection};

/// Any way a fetch can fail, one variant per sequence step. The first
/// failing step wins; nothing downstream of it runs.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("cannot subscribe to network events")]
    Subscribe(#[from] SubscribeError),
    #[error(transparent)]
    Modem(#[from] ModemError),
    #[error("network not ready after {waited:?}")]
    ReadyTimeout { waited: Duration },
    #[error("unable to resolve address, quitting")]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Connect(#[from] ConnectError),
    #[error(transparent)]
    Io(#[from] IoError),
}

/// What a completed fetch produced.
#[derive(Clone, Copy, Debug)]
pub struct FetchReport {
    /// Response bytes forwarded to the sink.
    pub bytes_received: u64,
    /// Peer the response came from.
    pub peer: ResolvedAddr,
}

/// Application service for one-shot fetches.
///
/// Orchestrates a fetch by:
/// 1. wiring the readiness tracker to the [`EventBus`].
/// 2. passing the [`ModemControl`] gate and polling until the network is up.
/// 3. resolving, connecting and streaming through the injected seams.
pub struct FetchService {
    bus: Box<dyn EventBus>,
    modem: Box<dyn ModemControl>,
    resolver: Box<dyn Resolver>,
    credentials: Box<dyn CredentialStore>,
}

impl FetchService {
    pub fn new(
        bus: Box<dyn EventBus>,
        modem: Box<dyn ModemControl>,
        resolver: Box<dyn Resolver>,
        credentials: Box<dyn CredentialStore>,
    ) -> Self {
        Self {
            bus,
            modem,
            resolver,
            credentials,
        }
    }

    /// Runs one fetch to completion, writing response bytes into `sink`.
    ///
    /// An established connection is closed on every path out of the
    /// exchange; a close failure is logged, never allowed to mask the
    /// fetch result. Whatever the sink received before a mid-stream error
    /// stays received.
    pub async fn run<W>(
        &self,
        config: &FetchConfig,
        sink: &mut W,
    ) -> Result<FetchReport, FetchError>
    where
        W: AsyncWrite + Unpin + Send,
    {
        let readiness = NetReadiness::new();
        events::subscribe_readiness(self.bus.as_ref(), &readiness)?;

        self.modem.reset().await?;

        wait_for_ready(&readiness, config.poll_interval, config.wait_deadline).await?;

        info!("Preparing HTTP GET request for {}", config.url());

        let candidates: Vec<ResolvedAddr> =
            self.resolver.resolve(&config.host, config.port).await?;
        for candidate in &candidates {
            debug!("{candidate}");
        }

        // Single-shot contract: the first candidate carries the fetch.
        let target: ResolvedAddr = candidates
            .first()
            .copied()
            .ok_or_else(|| ResolveError::NoCandidates { host: config.host.clone() })?;

        let connection: Connection =
            connect::establish(target, config.tls.as_ref(), self.credentials.as_ref()).await?;
        let peer: ResolvedAddr = connection.peer();

        let bytes_received = exchange(connection, config, sink).await?;
        Ok(FetchReport { bytes_received, peer })
    }
}

/// Drives the request/response pair over `connection`, closing it exactly
/// once whether the exchange succeeded or not.
async fn exchange<W>(
    mut connection: Connection,
    config: &FetchConfig,
    sink: &mut W,
) -> Result<u64, FetchError>
where
    W: AsyncWrite + Unpin + Send,
{
    let outcome: Result<u64, IoError> = async {
        let request: String = http::build_request(&config.host, &config.path);
        http::send_request(&mut connection, request.as_bytes()).await?;

        info!("Response:");
        http::stream_response(&mut connection, sink).await
    }
    .await;

    if let Err(err) = connection.close().await {
        warn!("error closing connection: {err}");
    }

    Ok(outcome?)
}

/// Polls the readiness flag until it is set, sleeping `poll_interval`
/// between polls. `deadline` bounds the whole wait; `None` waits forever.
/// Timeout granularity is the poll interval, and a deadline can only fire
/// while the flag is still unset.
pub async fn wait_for_ready(
    readiness: &NetReadiness,
    poll_interval: Duration,
    deadline: Option<Duration>,
) -> Result<(), FetchError> {
    let span = info_span!("waiting for network", indicatif.pb_show = true);

    async {
        let started: Instant = Instant::now();

        while !readiness.is_ready() {
            if let Some(limit) = deadline
                && started.elapsed() >= limit
            {
                return Err(FetchError::ReadyTimeout { waited: started.elapsed() });
            }

            info!("Waiting for network to be ready...");
            time::sleep(poll_interval).await;
        }

        Ok(())
    }
    .instrument(span)
    .await
}



// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
