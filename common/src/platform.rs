//! # Platform Seams
//!
//! The three places a fetch touches the machine it runs on: the event bus
//! that reports connectivity changes, the modem gate that must pass before
//! anything else happens, and name resolution. Each is a trait so the
//! service can be wired to the real host, to a simulator or to test stubs.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::events::{EventKind, NetEvent};
use crate::network::addr::ResolvedAddr;

/// Callback registered for one event kind.
///
/// Buses are free to hand a handler any event, so handlers re-check the kind
/// before acting.
pub type EventHandler = Arc<dyn Fn(&NetEvent) + Send + Sync>;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("event bus rejected registration for {kind:?}")]
pub struct SubscribeError {
    pub kind: EventKind,
}

/// Source of connectivity notifications.
pub trait EventBus: Send + Sync {
    /// Registers `handler` for events of `kind`. Handlers stay registered
    /// for the life of the bus.
    fn subscribe(&self, kind: EventKind, handler: EventHandler) -> Result<(), SubscribeError>;
}

/// Modem initialization status as the driver reports it, non-zero is failure.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("modem init err: {status}")]
pub struct ModemError {
    pub status: i32,
}

/// Gate on platforms where a modem must come up before networking works.
#[async_trait]
pub trait ModemControl: Send + Sync {
    /// Resets the modem and waits for it to report in.
    async fn reset(&self) -> Result<(), ModemError>;
}

#[derive(Debug, Error)]
pub enum ResolveError {
    /// An empty host name never resolves; refuse it before asking anyone.
    #[error("cannot resolve an empty host name")]
    EmptyHost,
    /// The lookup itself failed.
    #[error("unable to resolve address: {source}")]
    Lookup {
        #[source]
        source: std::io::Error,
    },
    /// The lookup succeeded but produced nothing this client can use.
    #[error("no IPv4 stream candidates for {host:?}")]
    NoCandidates { host: String },
}

/// Name resolution, narrowed to what the connection path can use.
#[async_trait]
pub trait Resolver: Send + Sync {
    /// Resolves `host` to IPv4 stream candidates, never an empty list.
    async fn resolve(&self, host: &str, port: u16) -> Result<Vec<ResolvedAddr>, ResolveError>;
}
