use crate::terminal::{colors, print};
use colored::*;
use fetchr_common::network::interface::{self, ViabilityError};
use pnet::datalink::NetworkInterface;
use pnet::ipnetwork::IpNetwork;

pub fn to_key_value_pair_net(ip_net: &[IpNetwork]) -> Vec<(String, ColoredString)> {
    ip_net
        .iter()
        .map(|ip_network| match ip_network {
            IpNetwork::V4(ipv4_network) => {
                let address: ColoredString = ipv4_network.ip().to_string().color(colors::IPV4_ADDR);
                let prefix: ColoredString =
                    ipv4_network.prefix().to_string().color(colors::IPV4_PREFIX);
                let result: ColoredString = format!("{address}/{prefix}").color(colors::SEPARATOR);
                ("IPv4".to_string(), result)
            }
            IpNetwork::V6(ipv6_network) => {
                let address: ColoredString = ipv6_network.ip().to_string().color(colors::IPV6_ADDR);
                let prefix: ColoredString =
                    ipv6_network.prefix().to_string().color(colors::IPV6_PREFIX);
                let value: ColoredString = format!("{address}/{prefix}").color(colors::SEPARATOR);
                ("IPv6".to_string(), value)
            }
        })
        .collect()
}

pub fn print_interface(interface: &NetworkInterface, idx: usize) {
    print::tree_head(idx, &interface.name);
    let mut key_value_pair: Vec<(String, ColoredString)> = to_key_value_pair_net(&interface.ips);
    if let Some(mac_addr) = interface.mac {
        key_value_pair.push((
            "MAC".to_string(),
            mac_addr.to_string().color(colors::MAC_ADDR),
        ));
    }
    key_value_pair.push(("State".to_string(), state_of(interface)));
    print::as_tree_one_level(key_value_pair);
}

fn state_of(interface: &NetworkInterface) -> ColoredString {
    match interface::link_viability(interface) {
        Ok(()) => "up".green().bold(),
        Err(ViabilityError::IsDown) => "down".red(),
        Err(ViabilityError::IsLoopback) => "loopback".yellow(),
        Err(ViabilityError::NoAddress) => "no address".yellow(),
    }
}
