use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use hiraku_core::config;
use hiraku_core::ipc::UnixSocketTransport;
use hiraku_core::launcher::OsLauncher;
use hiraku_core::Dispatcher;

/// Open mpv:// URIs in a local media player.
#[derive(Debug, Parser)]
#[command(name = "hiraku", version, about)]
struct Cli {
    /// The mpv:// URI to handle, as dispatched by the browser.
    uri: String,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("hiraku_core=info,hiraku_cli=info")),
        )
        .init();

    let cli = Cli::parse();

    let registry = match config::load_registry() {
        Ok(registry) => registry,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let transport = UnixSocketTransport;
    let launcher = OsLauncher;
    let dispatcher = Dispatcher::new(&registry, &transport, &launcher);

    match dispatcher.run(&cli.uri) {
        Ok(outcome) => {
            debug!(?outcome, "Done");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
