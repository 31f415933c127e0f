//! # Simulated Platform
//!
//! Event source and modem with scripted behavior, for tests and for the
//! CLI's `--ready-after` mode. The simulated bus shares the host bus's
//! registry and broadcast rules; only the event origin differs.

use std::net::{IpAddr, Ipv4Addr};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time;

use fetchr_common::events::{EventKind, NetEvent};
use fetchr_common::platform::{EventBus, EventHandler, ModemControl, ModemError, SubscribeError};

use super::HandlerTable;

/// Interface name the simulator reports.
pub const SIM_IFACE: &str = "sim0";
/// Resolver address the simulator announces.
pub const SIM_DNS: IpAddr = IpAddr::V4(Ipv4Addr::new(192, 0, 2, 53));

/// Caller-driven event bus.
///
/// Clones share one registry, so a clone kept by the caller publishes to
/// handlers registered through the fetch sequence.
#[derive(Clone, Default)]
pub struct SimBus {
    handlers: Arc<HandlerTable>,
    ready_after: Arc<Mutex<Option<Duration>>>,
    refuse: Option<EventKind>,
}

impl SimBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bus that reports link-up and DNS availability `delay` after the
    /// readiness subscription lands, simulating a network attaching on its
    /// own schedule.
    pub fn with_ready_after(delay: Duration) -> Self {
        Self {
            ready_after: Arc::new(Mutex::new(Some(delay))),
            ..Self::default()
        }
    }

    /// Bus that refuses registrations for `kind`.
    pub fn rejecting(kind: EventKind) -> Self {
        Self { refuse: Some(kind), ..Self::default() }
    }

    /// Delivers `event` to every registered handler.
    pub fn publish(&self, event: &NetEvent) {
        self.handlers.broadcast(event);
    }

    /// Fires the scripted attach at most once. Armed from the DNS
    /// registration so a zero delay still finds its handler in place.
    fn arm_ready_timer(&self) {
        let Some(delay) = self.ready_after.lock().unwrap().take() else {
            return;
        };

        let bus: SimBus = self.clone();
        tokio::spawn(async move {
            time::sleep(delay).await;
            bus.publish(&NetEvent::InterfaceUp { iface: SIM_IFACE.to_string() });
            bus.publish(&NetEvent::DnsServerAdded { server: SIM_DNS });
        });
    }
}

impl EventBus for SimBus {
    fn subscribe(&self, kind: EventKind, handler: EventHandler) -> Result<(), SubscribeError> {
        if self.refuse == Some(kind) {
            return Err(SubscribeError { kind });
        }

        self.handlers.register(kind, handler);
        if kind == EventKind::DnsServerAdded {
            self.arm_ready_timer();
        }
        Ok(())
    }
}

/// Modem gate with a scripted result, nonzero status fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimModem {
    pub status: i32,
}

#[async_trait]
impl ModemControl for SimModem {
    async fn reset(&self) -> Result<(), ModemError> {
        if self.status != 0 {
            return Err(ModemError { status: self.status });
        }
        Ok(())
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
