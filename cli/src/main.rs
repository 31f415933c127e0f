mod commands;
mod terminal;

use std::process::ExitCode;

use commands::{CommandLine, Commands, get, info};
use fetchr_common::error;
use fetchr_core::fetch::FetchError;
use terminal::{logging, print};

#[tokio::main]
async fn main() -> ExitCode {
    let commands = CommandLine::parse_args();

    logging::init();
    print::banner();

    let result: anyhow::Result<()> = match commands.command {
        Commands::Get(args) => {
            print::header("one-shot http get");
            get::get(args).await
        }
        Commands::Info => {
            print::header("about this device");
            info::info()
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}

/// Every fetch failure carries its own exit code; anything else is the
/// generic failure.
fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<FetchError>() {
        Some(FetchError::Subscribe(_)) => 2,
        Some(FetchError::Modem(_)) => 3,
        Some(FetchError::ReadyTimeout { .. }) => 4,
        Some(FetchError::Resolve(_)) => 5,
        Some(FetchError::Connect(_)) => 6,
        Some(FetchError::Io(_)) => 7,
        None => 1,
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
