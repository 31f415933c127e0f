//! # Host Event Source
//!
//! Samples the machine's interfaces and resolver configuration on an
//! interval and turns the deltas into bus events: snapshot differences
//! become `InterfaceUp`/`InterfaceDown`, and the first configured resolver
//! is announced once per link-up period.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time;

use fetchr_common::events::{EventKind, NetEvent};
use fetchr_common::network::interface;
use fetchr_common::platform::{EventBus, EventHandler, ModemControl, ModemError, SubscribeError};

use super::HandlerTable;

/// How often the sampler re-reads interfaces and resolv.conf.
pub const DEFAULT_SAMPLE_INTERVAL: Duration = Duration::from_secs(1);

/// Event bus backed by a background sampler of the host's network state.
pub struct HostBus {
    handlers: Arc<HandlerTable>,
}

impl HostBus {
    /// Starts the sampler task and returns the bus handle.
    ///
    /// The task runs for the life of the process; a one-shot fetch exits
    /// long before tearing it down would matter.
    pub fn start(sample_interval: Duration) -> Self {
        let handlers: Arc<HandlerTable> = Arc::new(HandlerTable::default());
        let sampler = Arc::clone(&handlers);

        tokio::spawn(async move {
            let mut links: BTreeSet<String> = BTreeSet::new();
            let mut dns_announced = false;

            loop {
                let current: BTreeSet<String> = interface::viable_links()
                    .into_iter()
                    .map(|link| link.name)
                    .collect();

                for event in link_edges(&links, &current) {
                    sampler.broadcast(&event);
                }

                if current.is_empty() {
                    // Next link-up gets a fresh DNS announcement.
                    dns_announced = false;
                } else if !dns_announced
                    && let Some(server) = interface::dns_servers().first().copied()
                {
                    sampler.broadcast(&NetEvent::DnsServerAdded { server });
                    dns_announced = true;
                }

                links = current;
                time::sleep(sample_interval).await;
            }
        });

        Self { handlers }
    }
}

impl EventBus for HostBus {
    fn subscribe(&self, kind: EventKind, handler: EventHandler) -> Result<(), SubscribeError> {
        self.handlers.register(kind, handler);
        Ok(())
    }
}

/// Events implied by the difference between two link snapshots.
fn link_edges(previous: &BTreeSet<String>, current: &BTreeSet<String>) -> Vec<NetEvent> {
    let mut events: Vec<NetEvent> = Vec::new();

    for iface in current.difference(previous) {
        events.push(NetEvent::InterfaceUp { iface: iface.clone() });
    }
    for iface in previous.difference(current) {
        events.push(NetEvent::InterfaceDown { iface: iface.clone() });
    }

    events
}

/// Modem gate for hosts that have no modem.
#[derive(Debug, Default)]
pub struct NoopModem;

#[async_trait]
impl ModemControl for NoopModem {
    async fn reset(&self) -> Result<(), ModemError> {
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

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn new_links_come_up() {
        let events = link_edges(&snapshot(&[]), &snapshot(&["eth0", "wlan0"]));
        assert_eq!(
            events,
            vec![
                NetEvent::InterfaceUp { iface: "eth0".into() },
                NetEvent::InterfaceUp { iface: "wlan0".into() },
            ]
        );
    }

    #[test]
    fn vanished_links_go_down() {
        let events = link_edges(&snapshot(&["eth0"]), &snapshot(&[]));
        assert_eq!(events, vec![NetEvent::InterfaceDown { iface: "eth0".into() }]);
    }

    #[test]
    fn stable_links_stay_quiet() {
        let events = link_edges(&snapshot(&["eth0"]), &snapshot(&["eth0"]));
        assert!(events.is_empty());
    }

    #[test]
    fn replacement_raises_both_edges() {
        let events = link_edges(&snapshot(&["eth0"]), &snapshot(&["wlan0"]));
        assert_eq!(
            events,
            vec![
                NetEvent::InterfaceUp { iface: "wlan0".into() },
                NetEvent::InterfaceDown { iface: "eth0".into() },
            ]
        );
    }

    #[tokio::test]
    async fn noop_modem_always_passes() {
        assert!(NoopModem.reset().await.is_ok());
    }
}
