//! # Fetchr Common
//!
//! Shared foundation for the fetchr workspace. This crate carries the pieces
//! every other member needs: the fetch configuration, the network event
//! model, the readiness flag, TLS credential types and the platform trait
//! seams (event bus, modem gate, name resolution). Apart from host link
//! probing in [`network::interface`] it performs no I/O of its own.

pub mod config;
pub mod events;
pub mod network;
pub mod platform;
pub mod readiness;
pub mod tls;

mod macros;

// The exported macros expand against this path.
pub use tracing;
