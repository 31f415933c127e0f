use std::net::IpAddr;

use colored::*;
use pnet::datalink::{self, NetworkInterface};

use crate::{
    fprint,
    terminal::{
        colors, network_fmt,
        print::{self, GLOBAL_KEY_WIDTH},
    },
};
use fetchr_common::network::interface;
use fetchr_common::{success, warn};

pub fn info() -> anyhow::Result<()> {
    print::print(
        format!(
            "{}",
            "Fetchr waits for the network, performs one HTTP GET and exits."
                .color(colors::TEXT_DEFAULT)
        )
        .as_str(),
    );
    fprint!();

    GLOBAL_KEY_WIDTH.set(12);
    print::aligned_line("Version", env!("CARGO_PKG_VERSION"));
    print::aligned_line("License", "MIT");

    print::header("network interfaces");
    let interfaces: Vec<NetworkInterface> = datalink::interfaces();
    for (idx, intf) in interfaces.iter().enumerate() {
        network_fmt::print_interface(intf, idx);
        if idx + 1 != interfaces.len() {
            fprint!();
        }
    }

    print::header("readiness");
    let viable: Vec<NetworkInterface> = interface::viable_links();
    let dns_servers: Vec<IpAddr> = interface::dns_servers();

    print::aligned_line("Viable links", names_or_none(&viable));
    print::aligned_line("DNS servers", servers_or_none(&dns_servers));
    fprint!();

    // The same two conditions the event-driven readiness flag waits on: a
    // usable link and a known resolver.
    if !viable.is_empty() && !dns_servers.is_empty() {
        success!("network is ready for a fetch");
    } else {
        warn!("network is not ready, a fetch would wait");
    }

    Ok(())
}

fn names_or_none(links: &[NetworkInterface]) -> ColoredString {
    if links.is_empty() {
        return "none".red().bold();
    }

    links
        .iter()
        .map(|link| link.name.clone())
        .collect::<Vec<String>>()
        .join(", ")
        .green()
}

fn servers_or_none(servers: &[IpAddr]) -> ColoredString {
    if servers.is_empty() {
        return "none".red().bold();
    }

    servers
        .iter()
        .map(|server| {
            let color = if server.is_ipv4() { colors::IPV4_ADDR } else { colors::IPV6_ADDR };
            server.to_string().color(color).to_string()
        })
        .collect::<Vec<String>>()
        .join(", ")
        .normal()
}
