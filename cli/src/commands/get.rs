use std::fs;
use std::time::{Duration, Instant};

use anyhow::Context;
use colored::*;
use tokio::io::{self, AsyncWriteExt};

use crate::commands::GetArgs;
use crate::terminal::{colors, print};
use fetchr_common::config::{self, FetchConfig};
use fetchr_common::platform::EventBus;
use fetchr_common::tls::{SecTag, TlsConfig};
use fetchr_core::fetch::{FetchReport, FetchService};
use fetchr_core::network::resolver::DnsResolver;
use fetchr_core::platform::host::{DEFAULT_SAMPLE_INTERVAL, HostBus, NoopModem};
use fetchr_core::platform::sim::SimBus;
use fetchr_core::tls::MemoryCredentialStore;

pub async fn get(args: GetArgs) -> anyhow::Result<()> {
    let cfg: FetchConfig = build_config(&args)?;

    let bus: Box<dyn EventBus> = match args.ready_after {
        Some(secs) => Box::new(SimBus::with_ready_after(Duration::from_secs(secs))),
        None => Box::new(HostBus::start(DEFAULT_SAMPLE_INTERVAL)),
    };

    let service = FetchService::new(
        bus,
        Box::new(NoopModem),
        Box::new(DnsResolver::new()),
        Box::new(MemoryCredentialStore::new()),
    );

    let start_time: Instant = Instant::now();
    let mut stdout = io::stdout();
    let report: FetchReport = service.run(&cfg, &mut stdout).await?;

    // Body then one newline, on the success path only.
    stdout.write_all(b"\n").await?;
    stdout.flush().await?;

    fetch_ends(&report, start_time.elapsed());
    Ok(())
}

fn build_config(args: &GetArgs) -> anyhow::Result<FetchConfig> {
    let tls: Option<TlsConfig> = match (args.tls, &args.ca_file) {
        (true, Some(ca_file)) => {
            let trust_anchor: Vec<u8> = fs::read(ca_file)
                .with_context(|| format!("reading CA certificate {}", ca_file.display()))?;

            Some(TlsConfig {
                trust_anchor,
                tag: SecTag(args.sec_tag),
                hostname: args.host.clone(),
            })
        }
        _ => None,
    };

    Ok(FetchConfig {
        host: args.host.clone(),
        port: args.port.unwrap_or_else(|| config::default_port(tls.is_some())),
        path: args.path.clone(),
        tls,
        poll_interval: Duration::from_secs(args.poll_interval),
        wait_deadline: args.wait_timeout.map(Duration::from_secs),
    })
}

fn fetch_ends(report: &FetchReport, total_time: Duration) {
    let bytes: ColoredString = format!("{} bytes", report.bytes_received).bold().green();
    let peer: ColoredString = report.peer.socket_addr().to_string().bold().cyan();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output: &ColoredString = &format!("Fetch complete: {bytes} from {peer} in {total_time}")
        .color(colors::TEXT_DEFAULT);

    print::fat_separator();
    print::centerln(output);
}



// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
