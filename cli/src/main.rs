use clap::Parser;
use std::io;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};
use voting_cli::{App, Config};
use voting_core::VotingService;

fn main() -> ExitCode {
    let config = Config::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    if let Err(e) = fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    info!("🚀 Starting voting booth ({} store)", config.store);
    let service = VotingService::with_backend(config.store);

    let mut app = match App::new(service, config.seed_defaults(), io::stdin().lock(), io::stdout().lock()) {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to prepare session: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match app.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Session aborted: {}", e);
            ExitCode::FAILURE
        }
    }
}
