//! # Fetchr Core
//!
//! The fetch engine: everything between "the process started" and "the
//! response has been drained". The [`fetch::FetchService`] runs the sequence
//! (subscribe to connectivity events, pass the modem gate, wait for
//! readiness, resolve, connect, stream the response) against the platform
//! seams defined in `fetchr-common`. The [`platform`] module supplies the
//! stock implementations of those seams.

pub mod events;
pub mod fetch;
pub mod http;
pub mod network;
pub mod platform;
pub mod tls;
