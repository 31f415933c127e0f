//! # Readiness Tracker
//!
//! A shared boolean that event handlers flip and the wait loop polls. DNS
//! availability is what actually arms it; a link coming up alone is not
//! enough to resolve anything.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::events::NetEvent;
use crate::{info, success, warn};

/// Cloneable handle on the network-ready flag. Starts not ready.
///
/// Clones share one flag, so a handle captured by an event handler and a
/// handle held by the wait loop observe the same state.
#[derive(Clone, Debug, Default)]
pub struct NetReadiness {
    ready: Arc<AtomicBool>,
}

impl NetReadiness {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one event to the flag.
    ///
    /// * `DnsServerAdded` arms it.
    /// * `InterfaceDown` clears it.
    /// * `InterfaceUp` is logged but changes nothing.
    /// * Anything else is ignored.
    pub fn on_event(&self, event: &NetEvent) {
        match event {
            NetEvent::DnsServerAdded { .. } => {
                success!("DNS ready");
                self.ready.store(true, Ordering::Relaxed);
            }
            NetEvent::InterfaceUp { .. } => {
                info!("interface is up");
            }
            NetEvent::InterfaceDown { .. } => {
                warn!("Interface is down");
                self.ready.store(false, Ordering::Relaxed);
            }
            NetEvent::Other => {}
        }
    }

    /// Current state of the flag.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Relaxed)
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
