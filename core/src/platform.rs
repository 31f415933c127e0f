//! # Platform Adapters
//!
//! Stock implementations of the seams in `fetchr_common::platform`: an event
//! bus that samples the real host, a simulated bus with scripted behavior,
//! and the matching modem gates.

use std::sync::{Arc, Mutex};

use fetchr_common::events::{EventKind, NetEvent};
use fetchr_common::platform::EventHandler;

pub mod host;
pub mod sim;

/// Registration table shared by the bus implementations.
///
/// Delivery is broadcast: every handler sees every event and filters by kind
/// itself. That is the loosest delivery contract a platform bus is allowed
/// to have, and handlers are written for it.
#[derive(Default)]
pub(crate) struct HandlerTable {
    handlers: Mutex<Vec<(EventKind, EventHandler)>>,
}

impl HandlerTable {
    pub(crate) fn register(&self, kind: EventKind, handler: EventHandler) {
        self.handlers.lock().unwrap().push((kind, handler));
    }

    /// Invokes every handler with `event`, outside the registry lock.
    pub(crate) fn broadcast(&self, event: &NetEvent) {
        let handlers: Vec<EventHandler> = self
            .handlers
            .lock()
            .unwrap()
            .iter()
            .map(|(_kind, handler)| Arc::clone(handler))
            .collect();

        for handler in handlers {
            handler(event);
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
