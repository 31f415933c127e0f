//! # Readiness Subscription
//!
//! Wires the readiness tracker to an event bus, one handler per event kind.
//! Registration happens once per run and is never torn down; a bus refusing
//! any of the three registrations is fatal before networking starts.

use std::sync::Arc;

use fetchr_common::events::EventKind;
use fetchr_common::platform::{EventBus, EventHandler, SubscribeError};
use fetchr_common::readiness::NetReadiness;

/// Event kinds the tracker listens for, in registration order.
pub const READINESS_EVENTS: [EventKind; 3] = [
    EventKind::DnsServerAdded,
    EventKind::InterfaceUp,
    EventKind::InterfaceDown,
];

/// Registers `readiness` for every kind in [`READINESS_EVENTS`].
///
/// Buses are free to fan any event to any handler, so each handler re-checks
/// the delivered kind and drops mismatches rather than trusting bus-side
/// routing.
pub fn subscribe_readiness(
    bus: &dyn EventBus,
    readiness: &NetReadiness,
) -> Result<(), SubscribeError> {
    for kind in READINESS_EVENTS {
        let tracker: NetReadiness = readiness.clone();
        let handler: EventHandler = Arc::new(move |event| {
            if event.kind() == Some(kind) {
                tracker.on_event(event);
            }
        });
        bus.subscribe(kind, handler)?;
    }
    Ok(())
}



// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
